use crate::hooks::{collect_extras, resolve_slot, HookContext, HookParamsError, HookRegistry, PackHook, Slot};
use crate::{
    draw_bonus_card, fetch_card, pick_from_table, pick_weighted, Card, CardFilters, CardQuery, CardSource,
    ProductConfig, RngState, SelectError, WeightedEntry, REGULAR_TREATMENT,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Foil rare draws allowed to hit a name on the lottery list.
pub const FOIL_LOTTERY_ATTEMPTS: usize = 8;

#[derive(Debug, Error)]
pub enum PackError {
    #[error(transparent)]
    Selection(#[from] SelectError),
    #[error(transparent)]
    HookParams(#[from] HookParamsError),
}

/// One position in the main card list. A failed lookup leaves `card` empty
/// rather than shrinking the pack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackEntry {
    #[serde(serialize_with = "serialize_slot")]
    pub slot: Slot,
    pub card: Option<Card>,
}

fn serialize_slot<S: serde::Serializer>(slot: &Slot, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(slot.label())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pack {
    pub code: String,
    pub entries: Vec<PackEntry>,
    pub foil: Option<Card>,
    pub bonus: Option<Card>,
    pub token_count: u32,
}

impl Pack {
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.entries.iter().filter_map(|entry| entry.card.as_ref())
    }

    pub fn count_slot(&self, slot: Slot) -> usize {
        self.entries.iter().filter(|entry| entry.slot == slot).count()
    }

    /// Sum of every priced card, foil slot at foil prices.
    pub fn total_value(&self) -> f64 {
        let main: f64 = self
            .cards()
            .chain(self.bonus.iter())
            .map(|card| card.prices.amount(card.foil_print))
            .sum();
        main + self.foil.as_ref().map_or(0.0, |card| card.prices.amount(true))
    }
}

/// Opens one booster of `code` using an already resolved product record.
pub fn open_booster(
    code: &str,
    config: &ProductConfig,
    registry: &HookRegistry,
    rng: &mut RngState,
    source: &mut dyn CardSource,
) -> Result<Pack, PackError> {
    let config = config.stamped(code);
    let hooks = registry.resolve(&config.hooks)?;
    debug!(product = %config.code, hooks = hooks.len(), "opening booster");
    let run = BoosterRun {
        config: &config,
        hooks,
        rng,
        source,
    };
    run.open()
}

struct BoosterRun<'a> {
    config: &'a ProductConfig,
    hooks: Vec<Box<dyn PackHook>>,
    rng: &'a mut RngState,
    source: &'a mut dyn CardSource,
}

impl BoosterRun<'_> {
    fn open(mut self) -> Result<Pack, PackError> {
        let mut entries = Vec::new();

        let (bonus, common_slots) = self.draw_bonus()?;
        for _ in 0..common_slots {
            let card = self.hooked_slot(Slot::Common, None)?;
            let card = card.or_else(|| self.main_set("common"));
            entries.push(PackEntry { slot: Slot::Common, card });
        }
        for _ in 0..self.config.uncommon_slots {
            let card = self.hooked_slot(Slot::Uncommon, None)?;
            let card = card.or_else(|| self.main_set("uncommon"));
            entries.push(PackEntry { slot: Slot::Uncommon, card });
        }

        let rare = self.rare_slot()?;
        entries.push(PackEntry { slot: Slot::Rare, card: rare });
        let wildcard = self.wildcard_slot()?;
        entries.push(PackEntry { slot: Slot::Wildcard, card: wildcard });
        let foil = self.foil_slot()?;

        let hooks = std::mem::take(&mut self.hooks);
        let extras = collect_extras(&hooks, &mut self.context())?;
        if !extras.is_empty() {
            debug!(count = extras.len(), "hooks added cards");
        }
        entries.extend(extras.into_iter().map(|card| PackEntry {
            slot: Slot::Post,
            card: Some(card),
        }));

        Ok(Pack {
            code: self.config.code.clone(),
            entries,
            foil,
            bonus,
            token_count: self.config.token_count,
        })
    }

    fn context(&mut self) -> HookContext<'_> {
        HookContext {
            product: &self.config.code,
            rng: &mut *self.rng,
            source: &mut *self.source,
        }
    }

    /// Bonus pre-draw. A replacement only takes a common slot when it
    /// actually produced a card.
    fn draw_bonus(&mut self) -> Result<(Option<Card>, u32), SelectError> {
        let config = self.config;
        let commons = config.common_slots;
        let Some(sheet) = config.active_bonus() else {
            return Ok((None, commons));
        };
        if sheet.is_addition() {
            let card = draw_bonus_card(sheet, self.rng, self.source)?;
            debug!(sheet = %sheet.code, found = card.is_some(), "bonus card added");
            return Ok((card, commons));
        }
        if !self.rng.roll(sheet.chance) {
            return Ok((None, commons));
        }
        let card = draw_bonus_card(sheet, self.rng, self.source)?;
        debug!(sheet = %sheet.code, found = card.is_some(), "bonus card replaces a common");
        let commons = if card.is_some() {
            commons.saturating_sub(1)
        } else {
            commons
        };
        Ok((card, commons))
    }

    fn hooked_slot(&mut self, slot: Slot, initial: Option<Card>) -> Result<Option<Card>, SelectError> {
        if self.hooks.is_empty() {
            return Ok(initial);
        }
        let hooks = std::mem::take(&mut self.hooks);
        let result = {
            let mut ctx = self.context();
            resolve_slot(&hooks, slot, &mut ctx, initial)
        };
        self.hooks = hooks;
        result
    }

    fn main_set(&mut self, rarity: &str) -> Option<Card> {
        let filters = CardFilters::for_set(self.config.code.as_str()).with_rarity(rarity);
        fetch_card(self.source, &filters.into())
    }

    fn rare_slot(&mut self) -> Result<Option<Card>, SelectError> {
        let config = self.config;
        if let Some(table) = config.rare_table.as_deref() {
            let row = pick_from_table(table, self.rng)?;
            debug!(query = %row.query.search_expression(), "rare table row");
            let card = self.resolve_row(row, false);
            return self.hooked_slot(Slot::Rare, card);
        }
        let rarity = pick_weighted(&config.rare_weights, self.rng)?;
        debug!(%rarity, "rare slot rarity");
        let card = self.hooked_slot(Slot::Rare, None)?;
        Ok(card.or_else(|| self.main_set(rarity)))
    }

    /// Table-driven wildcards never consult hooks.
    fn wildcard_slot(&mut self) -> Result<Option<Card>, SelectError> {
        let config = self.config;
        if let Some(table) = config.wildcard_table.as_deref() {
            let row = pick_from_table(table, self.rng)?;
            debug!(query = %row.query.search_expression(), "wildcard table row");
            return Ok(self.resolve_row(row, false));
        }
        let rarity = pick_weighted(&config.wildcard_weights, self.rng)?;
        debug!(%rarity, "wildcard rarity");
        let card = self.hooked_slot(Slot::Wildcard, None)?;
        Ok(card.or_else(|| self.main_set(rarity)))
    }

    fn foil_slot(&mut self) -> Result<Option<Card>, SelectError> {
        let config = self.config;
        if let Some(table) = config.foil_table.as_deref() {
            let row = pick_from_table(table, self.rng)?;
            debug!(query = %row.query.search_expression(), "foil table row");
            return Ok(self.resolve_row(row, true));
        }
        if let Some(card) = self.foil_lottery() {
            return Ok(Some(card));
        }
        let rarity = pick_weighted(&config.foil_weights, self.rng)?;
        debug!(%rarity, "foil rarity");
        let filters = CardFilters::for_set(config.code.as_str())
            .with_rarity(rarity)
            .foil_only();
        Ok(fetch_card(self.source, &filters.into()).map(|card| foil_print(card, true)))
    }

    fn foil_lottery(&mut self) -> Option<Card> {
        let config = self.config;
        let lottery = &config.foil_lottery;
        if !lottery.enabled || !self.rng.roll(lottery.chance) {
            return None;
        }
        let filters = CardFilters::for_set(config.code.as_str())
            .with_rarity("rare")
            .foil_only();
        let query = CardQuery::from(filters);
        for attempt in 1..=FOIL_LOTTERY_ATTEMPTS {
            match fetch_card(self.source, &query) {
                Some(card) if lottery.accepts(&card.name) => {
                    debug!(name = %card.name, attempt, "foil lottery hit");
                    return Some(foil_print(card, true));
                }
                _ => {}
            }
        }
        debug!("foil lottery missed");
        None
    }

    /// Structured rows without a product fall back to the one being opened.
    fn resolve_row(&mut self, row: &WeightedEntry, foil_slot: bool) -> Option<Card> {
        let query = match &row.query {
            CardQuery::Filters(filters) if filters.effective_set().is_none() => {
                CardQuery::Filters(CardFilters {
                    set: Some(self.config.code.clone()),
                    ..filters.clone()
                })
            }
            query => query.clone(),
        };
        let treatment = row.treatment.as_deref().unwrap_or(REGULAR_TREATMENT);
        fetch_card(self.source, &query)
            .map(|card| foil_print(card.with_treatment(treatment), foil_slot))
    }
}

fn foil_print(mut card: Card, foil: bool) -> Card {
    card.foil_print = foil;
    card
}
