use crate::{fetch_card, pick_weighted, BonusSheet, Card, CardFilters, CardSource, RngState, SelectError};
use tracing::debug;

/// Attempts allowed to land a bonus card inside the configured collector range.
pub const BONUS_SHEET_ATTEMPTS: usize = 12;

/// Draws one card from the bonus sheet.
///
/// Without a collector range the first card found is kept. With a range the
/// draw is repeated until a card falls inside it; after
/// [`BONUS_SHEET_ATTEMPTS`] misses the pack simply has no bonus card.
pub fn draw_bonus_card(
    sheet: &BonusSheet,
    rng: &mut RngState,
    source: &mut dyn CardSource,
) -> Result<Option<Card>, SelectError> {
    for attempt in 1..=BONUS_SHEET_ATTEMPTS {
        let mut filters = CardFilters::sheet(sheet.code.as_str());
        if let Some(weights) = sheet.weights.as_ref() {
            filters.rarity = Some(pick_weighted(weights, rng)?.to_string());
        }
        let Some(card) = fetch_card(source, &filters.into()) else {
            continue;
        };
        let Some(range) = sheet.cn_range else {
            return Ok(Some(card));
        };
        match card.collector_number_value() {
            Some(number) if range.contains(number) => return Ok(Some(card)),
            number => debug!(
                sheet = %sheet.code,
                attempt,
                ?number,
                "bonus card outside collector range"
            ),
        }
    }
    debug!(sheet = %sheet.code, "bonus sheet attempts exhausted");
    Ok(None)
}
