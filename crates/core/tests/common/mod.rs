#![allow(dead_code)]

use booster_core::{Card, CardSource, LookupError};

/// Offline source that answers every search with a card named after it.
/// Rarity and set are read back from the search clauses.
#[derive(Default)]
pub struct EchoSource {
    pub searches: Vec<String>,
    pub fail_when: Option<&'static str>,
}

impl EchoSource {
    pub fn failing_on(fragment: &'static str) -> Self {
        Self {
            fail_when: Some(fragment),
            ..Self::default()
        }
    }

    pub fn count_matching(&self, fragment: &str) -> usize {
        self.searches
            .iter()
            .filter(|search| search.contains(fragment))
            .count()
    }
}

impl CardSource for EchoSource {
    fn random_card(&mut self, search: &str) -> Result<Card, LookupError> {
        self.searches.push(search.to_string());
        if self.fail_when.is_some_and(|fragment| search.contains(fragment)) {
            return Err(LookupError::Status(404));
        }
        let rarity = clause(search, "rarity:").unwrap_or("common");
        let mut card = Card::named(search, rarity);
        if let Some(set) = clause(search, "set:") {
            card.set = set.to_string();
        }
        if let Some(number) = clause(search, "cn:") {
            card.collector_number = number.to_string();
        }
        Ok(card)
    }
}

fn clause<'a>(search: &'a str, prefix: &str) -> Option<&'a str> {
    search
        .split_whitespace()
        .find_map(|token| token.strip_prefix(prefix))
}
