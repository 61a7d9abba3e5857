//! Quote collection loading
//!
//! Quotes are owned by an external data layer; this module only reads the
//! files it exports. Both a bare list and a `{"quotes": [...]}` wrapper are
//! accepted, in JSON or YAML.

use serde::Deserialize;
use std::path::Path;

use super::file_io::read_structured;
use crate::error::{QuoteError, QuoteResult};
use crate::models::Quote;

#[derive(Deserialize)]
#[serde(untagged)]
enum QuoteFile {
    List(Vec<Quote>),
    Wrapped { quotes: Vec<Quote> },
}

/// Load every quote from a file
pub fn load_quotes<P: AsRef<Path>>(path: P) -> QuoteResult<Vec<Quote>> {
    let path = path.as_ref();
    let quotes = match read_structured::<QuoteFile, _>(path)? {
        QuoteFile::List(quotes) | QuoteFile::Wrapped { quotes } => quotes,
    };
    tracing::debug!(path = %path.display(), count = quotes.len(), "loaded quotes");
    Ok(quotes)
}

/// Find a quote by identifier
pub fn find_quote<'a>(quotes: &'a [Quote], id: &str) -> QuoteResult<&'a Quote> {
    quotes
        .iter()
        .find(|q| q.id.as_ref().is_some_and(|qid| qid.as_str() == id))
        .ok_or_else(|| QuoteError::quote_not_found(id))
}
