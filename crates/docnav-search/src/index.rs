//! In-memory full-text index built on tantivy.
//!
//! Each document is indexed over two text fields, title and body, plus its
//! stored href and corpus position. Queries are analyzed with the same
//! pipeline as documents. Every query token must match (AND). A token
//! matches its exact term with BM25 scoring, and any indexed term it is a
//! prefix of at a flat, lower weight. Title clauses carry [`TITLE_BOOST`].

use std::collections::HashSet;
use std::fmt;

use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, BoostQuery, Occur, Query, RegexQuery, TermQuery};
use tantivy::schema::{
    Field, INDEXED, IndexRecordOption, STORED, STRING, Schema, TextFieldIndexing, TextOptions,
    Value,
};
use tantivy::tokenizer::TextAnalyzer;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, Score, TantivyDocument, Term, doc};
use tracing::debug;

use crate::analyzer::{DOCNAV_TOKENIZER, analyze, build_analyzer};
use crate::document::Corpus;
use crate::error::SearchError;

/// Boost applied to title matches.
pub const TITLE_BOOST: Score = 10.0;
/// Boost applied to body matches.
pub const BODY_BOOST: Score = 1.0;
/// Weight of a prefix expansion relative to its field boost.
const PREFIX_WEIGHT: Score = 0.5;

/// Single-threaded writer budget; the corpus is small.
const WRITER_MEMORY_BYTES: usize = 50_000_000;

/// A ranked index hit.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit {
    /// Href of the matching document.
    pub href: String,
    /// Relevance, higher is better.
    pub score: Score,
}

/// Schema field handles.
#[derive(Clone, Copy, Debug)]
struct Fields {
    title: Field,
    body: Field,
    href: Field,
    position: Field,
}

impl Fields {
    fn schema() -> (Schema, Self) {
        let text = TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(DOCNAV_TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqs),
        );

        let mut builder = Schema::builder();
        let fields = Self {
            title: builder.add_text_field("title", text.clone()),
            body: builder.add_text_field("body", text),
            href: builder.add_text_field("href", STRING | STORED),
            position: builder.add_u64_field("position", INDEXED | STORED),
        };
        (builder.build(), fields)
    }
}

/// Immutable full-text index over a [`Corpus`].
pub struct SearchIndex {
    reader: IndexReader,
    fields: Fields,
    analyzer: TextAnalyzer,
    len: usize,
}

impl fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchIndex")
            .field("documents", &self.len)
            .finish_non_exhaustive()
    }
}

impl SearchIndex {
    /// Build the index from every document in `corpus`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyHref`] or [`SearchError::DuplicateHref`]
    /// when documents cannot be told apart, and [`SearchError::Index`] if
    /// tantivy fails to write the index.
    pub fn build(corpus: &Corpus) -> Result<Self, SearchError> {
        let mut seen = HashSet::new();
        for (position, document) in corpus.documents().iter().enumerate() {
            if document.href.is_empty() {
                return Err(SearchError::EmptyHref(position));
            }
            if !seen.insert(document.href.as_str()) {
                return Err(SearchError::DuplicateHref(document.href.clone()));
            }
        }

        let (schema, fields) = Fields::schema();
        let index = Index::create_in_ram(schema);
        let analyzer = build_analyzer();
        index.tokenizers().register(DOCNAV_TOKENIZER, analyzer.clone());

        let mut writer: IndexWriter = index.writer_with_num_threads(1, WRITER_MEMORY_BYTES)?;
        for (position, document) in (0_u64..).zip(corpus.documents()) {
            writer.add_document(doc!(
                fields.title => document.title.as_str(),
                fields.body => document.body.as_str(),
                fields.href => document.href.as_str(),
                fields.position => position,
            ))?;
        }
        writer.commit()?;

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        debug!(documents = corpus.len(), "Built search index");

        Ok(Self {
            reader,
            fields,
            analyzer,
            len: corpus.len(),
        })
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no document is indexed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Run a query and return every matching document, best first.
    ///
    /// Ties keep corpus order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Index`] if tantivy fails to execute the query.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        let tokens = analyze(&mut self.analyzer.clone(), query);
        if tokens.is_empty() || self.is_empty() {
            return Ok(Vec::new());
        }

        let clauses = tokens
            .iter()
            .map(|token| Ok((Occur::Must, self.token_query(token)?)))
            .collect::<Result<Vec<_>, SearchError>>()?;
        let query = BooleanQuery::new(clauses);

        let searcher = self.reader.searcher();
        let top_docs = searcher.search(&query, &TopDocs::with_limit(self.len))?;

        let mut ranked = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address)?;
            let href = doc
                .get_first(self.fields.href)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_owned();
            let position = doc
                .get_first(self.fields.position)
                .and_then(|v| v.as_u64())
                .unwrap_or(u64::MAX);
            ranked.push((position, SearchHit { href, score }));
        }

        ranked.sort_by(|(pa, a), (pb, b)| b.score.total_cmp(&a.score).then_with(|| pa.cmp(pb)));
        Ok(ranked.into_iter().map(|(_, hit)| hit).collect())
    }

    /// Title and body clauses for one analyzed token, exact and prefix.
    fn token_query(&self, token: &str) -> Result<Box<dyn Query>, SearchError> {
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::with_capacity(4);
        for (field, boost) in [(self.fields.title, TITLE_BOOST), (self.fields.body, BODY_BOOST)] {
            let exact: Box<dyn Query> = Box::new(TermQuery::new(
                Term::from_field_text(field, token),
                IndexRecordOption::WithFreqs,
            ));
            let exact: Box<dyn Query> = Box::new(BoostQuery::new(exact, boost));
            clauses.push((Occur::Should, exact));

            // Analyzed tokens are alphanumeric, so they are regex literals
            let prefix: Box<dyn Query> =
                Box::new(RegexQuery::from_pattern(&format!("{token}.*"), field)?);
            let prefix: Box<dyn Query> = Box::new(BoostQuery::new(prefix, boost * PREFIX_WEIGHT));
            clauses.push((Occur::Should, prefix));
        }
        Ok(Box::new(BooleanQuery::new(clauses)))
    }
}
