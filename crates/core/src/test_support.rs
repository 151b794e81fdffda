use crate::{Card, LookupError};

/// Builds a card that mirrors the search it answers: the name is the full
/// search, rarity and collector number come from the matching clauses.
pub(crate) fn echo_card(search: &str) -> Card {
    let mut card = Card::named(search, clause_value(search, &["rarity:", "r:"]).unwrap_or("common"));
    if let Some(number) = clause_value(search, &["cn:"]) {
        card.collector_number = number.to_string();
    }
    if let Some(set) = clause_value(search, &["set:"]) {
        card.set = set.to_string();
    }
    card
}

pub(crate) fn echo(search: &str) -> Result<Card, LookupError> {
    Ok(echo_card(search))
}

fn clause_value<'a>(search: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    search.split_whitespace().find_map(|token| {
        prefixes
            .iter()
            .find_map(|prefix| token.strip_prefix(prefix))
    })
}
