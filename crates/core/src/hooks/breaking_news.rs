use super::{parse_params, HookContext, HookOutcome, PackHook, Slot};
use crate::{distribution, pick_weighted, CardFilters, Distribution, SelectError};
use serde::Deserialize;

const PRODUCT: &str = "otj";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BreakingNewsParams {
    pub otp_sheet_code: String,
    pub otp_odds: Distribution,
}

impl Default for BreakingNewsParams {
    fn default() -> Self {
        Self {
            otp_sheet_code: "otp".to_string(),
            otp_odds: distribution(&[("uncommon", 0.667), ("rare", 0.285), ("mythic", 0.048)]),
        }
    }
}

/// Adds one card from the Breaking News sheet once the pack is assembled.
#[derive(Debug, Clone)]
pub struct BreakingNewsHook {
    params: BreakingNewsParams,
}

impl BreakingNewsHook {
    pub const NAME: &'static str = "otj_breaking_news";

    pub fn new(params: BreakingNewsParams) -> Self {
        Self { params }
    }

    pub fn build(params: &serde_json::Value) -> Result<Box<dyn PackHook>, serde_json::Error> {
        Ok(Box::new(Self::new(parse_params(params)?)))
    }
}

impl PackHook for BreakingNewsHook {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn evaluate(&self, slot: Slot, ctx: &mut HookContext<'_>) -> Result<HookOutcome, SelectError> {
        if ctx.product != PRODUCT || slot != Slot::Post {
            return Ok(HookOutcome::NoEffect);
        }
        let rarity = pick_weighted(&self.params.otp_odds, ctx.rng)?.to_string();
        let filters = CardFilters::sheet(self.params.otp_sheet_code.as_str()).with_rarity(rarity);
        Ok(HookOutcome::from_cards(ctx.fetch(filters).into_iter().collect()))
    }
}
