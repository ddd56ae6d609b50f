//! Text analysis shared by indexing and querying.
//!
//! The pipeline is:
//! 1. `SimpleTokenizer` - splits on whitespace and punctuation
//! 2. `RemoveLongFilter` - drops tokens longer than 40 bytes
//! 3. `LowerCaser` - normalizes tokens to lowercase
//!
//! No stemming or stop-word removal is applied.

use tantivy::tokenizer::{
    LowerCaser, RemoveLongFilter, SimpleTokenizer, TextAnalyzer, TokenStream,
};

/// Name the analyzer is registered under in the index.
pub(crate) const DOCNAV_TOKENIZER: &str = "docnav_text";

/// Maximum token length in bytes before filtering.
const MAX_TOKEN_LENGTH: usize = 40;

/// Build the docnav text analyzer.
pub(crate) fn build_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .filter(LowerCaser)
        .build()
}

/// Split text into the terms the search index stores.
///
/// Tokens only ever contain alphanumeric characters, so `"Getting-Started!"`
/// yields `["getting", "started"]`.
pub fn tokenize(text: &str) -> Vec<String> {
    analyze(&mut build_analyzer(), text)
}

/// Run `text` through an existing analyzer.
pub(crate) fn analyze(analyzer: &mut TextAnalyzer, text: &str) -> Vec<String> {
    let mut stream = analyzer.token_stream(text);
    let mut tokens = Vec::new();
    while let Some(token) = stream.next() {
        tokens.push(token.text.clone());
    }
    tokens
}
