use super::{parse_params, HookContext, HookOutcome, PackHook, Slot};
use crate::SelectError;
use serde::Deserialize;

const PRODUCT: &str = "fin";

/// Treatment label paired with the raw search for its collector range.
const SPECIAL_UNCOMMONS: &[(&str, &str)] = &[
    ("borderless woodblock", "set:fin cn>=323 cn<=373 r:uncommon"),
    ("borderless character", "set:fin cn>=374 cn<=405 r:uncommon"),
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UncommonSpecialsParams {
    pub chance: f64,
}

impl Default for UncommonSpecialsParams {
    fn default() -> Self {
        Self { chance: 0.003 }
    }
}

/// Rarely upgrades an uncommon to one of the borderless treatments.
#[derive(Debug, Clone)]
pub struct UncommonSpecialsHook {
    params: UncommonSpecialsParams,
}

impl UncommonSpecialsHook {
    pub const NAME: &'static str = "fin_uncommon_specials";

    pub fn new(params: UncommonSpecialsParams) -> Self {
        Self { params }
    }

    pub fn build(params: &serde_json::Value) -> Result<Box<dyn PackHook>, serde_json::Error> {
        Ok(Box::new(Self::new(parse_params(params)?)))
    }
}

impl PackHook for UncommonSpecialsHook {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn evaluate(&self, slot: Slot, ctx: &mut HookContext<'_>) -> Result<HookOutcome, SelectError> {
        if ctx.product != PRODUCT || slot != Slot::Uncommon {
            return Ok(HookOutcome::NoEffect);
        }
        if ctx.rng.next_f64() >= self.params.chance {
            return Ok(HookOutcome::NoEffect);
        }
        let Some(&(treatment, search)) = ctx.rng.choose(SPECIAL_UNCOMMONS) else {
            return Ok(HookOutcome::NoEffect);
        };
        let card = ctx.fetch(search).map(|card| card.with_treatment(treatment));
        Ok(HookOutcome::from_card(card))
    }
}
