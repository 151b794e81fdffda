use crate::{Card, CardQuery};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Remote card database: one random card for one search expression.
pub trait CardSource {
    fn random_card(&mut self, search: &str) -> Result<Card, LookupError>;
}

/// Source backed by a closure, for offline use and tests.
pub struct FnSource<F>(pub F);

impl<F> CardSource for FnSource<F>
where
    F: FnMut(&str) -> Result<Card, LookupError>,
{
    fn random_card(&mut self, search: &str) -> Result<Card, LookupError> {
        (self.0)(search)
    }
}

/// Resolves a query to at most one card. Lookup failures are logged and
/// reported as absence; retrying is up to the caller.
pub fn fetch_card(source: &mut dyn CardSource, query: &CardQuery) -> Option<Card> {
    let search = query.search_expression();
    match source.random_card(&search) {
        Ok(card) => Some(card),
        Err(err) => {
            warn!(%search, error = %err, "card lookup failed");
            None
        }
    }
}
