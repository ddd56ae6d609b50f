//! CLI command implementations.

pub(crate) mod nav;
pub(crate) mod search;

pub(crate) use nav::NavArgs;
pub(crate) use search::{ResultsArgs, SearchArgs};
