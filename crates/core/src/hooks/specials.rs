use super::{parse_params, HookContext, HookOutcome, PackHook, Slot};
use crate::{distribution, pick_weighted, CardFilters, Distribution, SelectError};
use serde::Deserialize;
use tracing::debug;

const PRODUCT: &str = "clb";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpecialItem {
    pub enabled: bool,
    pub frequency: f64,
    pub rarities: Distribution,
    /// Defaults to the product code.
    pub sheet_code: Option<String>,
}

impl Default for SpecialItem {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency: 0.0,
            rarities: distribution(&[("rare", 1.0)]),
            sheet_code: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpecialsParams {
    pub foil_etched_legendary_bg: Option<SpecialItem>,
    pub legendary_creature_pw: Option<SpecialItem>,
    pub legendary_background: Option<SpecialItem>,
}

impl SpecialsParams {
    fn items(&self) -> impl Iterator<Item = (&'static str, &SpecialItem)> {
        [
            ("foil_etched_legendary_bg", self.foil_etched_legendary_bg.as_ref()),
            ("legendary_creature_pw", self.legendary_creature_pw.as_ref()),
            ("legendary_background", self.legendary_background.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, item)| item.map(|item| (name, item)))
    }
}

/// Independent extra-card rolls for the legendary specials sheets.
#[derive(Debug, Clone)]
pub struct SpecialsHook {
    params: SpecialsParams,
}

impl SpecialsHook {
    pub const NAME: &'static str = "clb_specials";

    pub fn new(params: SpecialsParams) -> Self {
        Self { params }
    }

    pub fn build(params: &serde_json::Value) -> Result<Box<dyn PackHook>, serde_json::Error> {
        Ok(Box::new(Self::new(parse_params(params)?)))
    }
}

impl PackHook for SpecialsHook {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn evaluate(&self, slot: Slot, ctx: &mut HookContext<'_>) -> Result<HookOutcome, SelectError> {
        if ctx.product != PRODUCT || slot != Slot::Post {
            return Ok(HookOutcome::NoEffect);
        }
        let mut extras = Vec::new();
        for (name, item) in self.params.items() {
            if !item.enabled || ctx.rng.next_f64() > item.frequency {
                continue;
            }
            let rarity = pick_weighted(&item.rarities, ctx.rng)?.to_string();
            let sheet = item.sheet_code.as_deref().unwrap_or(ctx.product).to_string();
            debug!(item = name, %sheet, %rarity, "special item triggered");
            if let Some(card) = ctx.fetch(CardFilters::sheet(sheet).with_rarity(rarity)) {
                extras.push(card);
            }
        }
        Ok(HookOutcome::from_cards(extras))
    }
}
