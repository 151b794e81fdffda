use super::{parse_params, HookContext, HookOutcome, PackHook, Slot};
use crate::{CardFilters, SelectError};
use serde::Deserialize;

const PRODUCT: &str = "dsk";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LurkingNumbers {
    pub common: Vec<String>,
    pub uncommon: Vec<String>,
}

impl Default for LurkingNumbers {
    fn default() -> Self {
        Self {
            common: numbers(&["287", "295"]),
            uncommon: numbers(&["288", "291", "297", "300"]),
        }
    }
}

/// Defaults are the Duskmourn booster odds, so a bare declaration is live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LurkingParams {
    pub common_chance: f64,
    pub uncommon_le_chance: f64,
    pub uncommon_pf_chance: f64,
    pub pf_uncommon_numbers: Vec<String>,
    pub cn: LurkingNumbers,
}

impl Default for LurkingParams {
    fn default() -> Self {
        Self {
            common_chance: 0.25,
            uncommon_le_chance: 0.25,
            uncommon_pf_chance: 0.25,
            pf_uncommon_numbers: numbers(&["306", "309", "314", "319"]),
            cn: LurkingNumbers::default(),
        }
    }
}

fn numbers(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Swaps commons and uncommons for cards pinned to variant collector
/// numbers (lurking and paranormal frames).
#[derive(Debug, Clone)]
pub struct LurkingVariantHook {
    params: LurkingParams,
}

impl LurkingVariantHook {
    pub const NAME: &'static str = "dsk_lurking";

    pub fn new(params: LurkingParams) -> Self {
        Self { params }
    }

    pub fn build(params: &serde_json::Value) -> Result<Box<dyn PackHook>, serde_json::Error> {
        Ok(Box::new(Self::new(parse_params(params)?)))
    }

    fn pinned(&self, ctx: &mut HookContext<'_>, rarity: &str, numbers: &[String]) -> HookOutcome {
        let Some(number) = ctx.rng.choose(numbers).cloned() else {
            return HookOutcome::NoEffect;
        };
        let filters = CardFilters::for_set(PRODUCT)
            .with_rarity(rarity)
            .with_collector_number(number);
        HookOutcome::from_card(ctx.fetch(filters))
    }
}

impl PackHook for LurkingVariantHook {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn evaluate(&self, slot: Slot, ctx: &mut HookContext<'_>) -> Result<HookOutcome, SelectError> {
        if ctx.product != PRODUCT {
            return Ok(HookOutcome::NoEffect);
        }
        let params = &self.params;
        let outcome = match slot {
            Slot::Common => {
                if ctx.rng.roll(params.common_chance) {
                    self.pinned(ctx, "common", &params.cn.common)
                } else {
                    HookOutcome::NoEffect
                }
            }
            Slot::Uncommon => {
                let roll = ctx.rng.next_f64();
                let law_enforcement = params.uncommon_le_chance;
                let paranormal = law_enforcement + params.uncommon_pf_chance;
                if roll < law_enforcement {
                    self.pinned(ctx, "uncommon", &params.cn.uncommon)
                } else if roll < paranormal {
                    self.pinned(ctx, "uncommon", &params.pf_uncommon_numbers)
                } else {
                    HookOutcome::NoEffect
                }
            }
            _ => HookOutcome::NoEffect,
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::echo;
    use crate::{FnSource, RngState};
    use serde_json::json;

    fn hook(common: f64, le: f64, pf: f64) -> LurkingVariantHook {
        let params = json!({
            "common_chance": common,
            "uncommon_le_chance": le,
            "uncommon_pf_chance": pf,
            "pf_uncommon_numbers": ["306", "309"],
            "cn": {
                "common": ["287", "295"],
                "uncommon": ["288", "291"],
                "rare": ["289"]
            }
        });
        LurkingVariantHook::new(parse_params(&params).expect("params"))
    }

    fn evaluate(hook: &LurkingVariantHook, product: &str, slot: Slot) -> HookOutcome {
        evaluate_seeded(hook, product, slot, 21)
    }

    fn evaluate_seeded(hook: &LurkingVariantHook, product: &str, slot: Slot, seed: u64) -> HookOutcome {
        let mut rng = RngState::from_seed(seed);
        let mut source = FnSource(echo);
        let mut ctx = HookContext {
            product,
            rng: &mut rng,
            source: &mut source,
        };
        hook.evaluate(slot, &mut ctx).expect("evaluate")
    }

    fn pinned_number(outcome: HookOutcome) -> String {
        match outcome {
            HookOutcome::Card(card) => card.collector_number,
            other => panic!("expected a card, got {other:?}"),
        }
    }

    #[test]
    fn common_slot_pins_lurking_number() {
        let number = pinned_number(evaluate(&hook(1.0, 0.0, 0.0), "dsk", Slot::Common));
        assert!(["287", "295"].contains(&number.as_str()));
    }

    #[test]
    fn uncommon_slot_uses_law_enforcement_bucket_first() {
        let number = pinned_number(evaluate(&hook(0.0, 1.0, 0.0), "dsk", Slot::Uncommon));
        assert!(["288", "291"].contains(&number.as_str()));
    }

    #[test]
    fn uncommon_slot_falls_to_paranormal_bucket() {
        let number = pinned_number(evaluate(&hook(0.0, 0.0, 1.0), "dsk", Slot::Uncommon));
        assert!(["306", "309"].contains(&number.as_str()));
    }

    #[test]
    fn zero_chances_leave_slots_alone() {
        let quiet = hook(0.0, 0.0, 0.0);
        assert_eq!(evaluate(&quiet, "dsk", Slot::Common), HookOutcome::NoEffect);
        assert_eq!(evaluate(&quiet, "dsk", Slot::Uncommon), HookOutcome::NoEffect);
    }

    #[test]
    fn other_products_and_slots_are_untouched() {
        let eager = hook(1.0, 1.0, 1.0);
        assert_eq!(evaluate(&eager, "woe", Slot::Common), HookOutcome::NoEffect);
        assert_eq!(evaluate(&eager, "dsk", Slot::Rare), HookOutcome::NoEffect);
        assert_eq!(evaluate(&eager, "dsk", Slot::Post), HookOutcome::NoEffect);
    }

    #[test]
    fn empty_number_list_means_no_effect() {
        let empty = LurkingVariantHook::new(LurkingParams {
            common_chance: 1.0,
            cn: LurkingNumbers {
                common: Vec::new(),
                uncommon: Vec::new(),
            },
            ..LurkingParams::default()
        });
        assert_eq!(evaluate(&empty, "dsk", Slot::Common), HookOutcome::NoEffect);
    }

    #[test]
    fn uncommon_buckets_stack_their_chances() {
        let split = hook(0.0, 0.3, 0.4);
        let mut seen = [0usize; 3];
        for seed in 0..200 {
            let roll = RngState::from_seed(seed).next_f64();
            let outcome = evaluate_seeded(&split, "dsk", Slot::Uncommon, seed);
            if roll < 0.3 {
                let number = pinned_number(outcome);
                assert!(["288", "291"].contains(&number.as_str()), "seed {seed}");
                seen[0] += 1;
            } else if roll < 0.7 {
                let number = pinned_number(outcome);
                assert!(["306", "309"].contains(&number.as_str()), "seed {seed}");
                seen[1] += 1;
            } else {
                assert_eq!(outcome, HookOutcome::NoEffect, "seed {seed}");
                seen[2] += 1;
            }
        }
        assert!(seen.iter().all(|count| *count > 0), "buckets {seen:?}");
    }

    #[test]
    fn bare_declaration_uses_duskmourn_odds() {
        let params: LurkingParams = parse_params(&serde_json::Value::Null).expect("params");
        assert_eq!(params.common_chance, 0.25);
        assert_eq!(params.uncommon_le_chance + params.uncommon_pf_chance, 0.5);
        assert_eq!(params.pf_uncommon_numbers.len(), 4);

        let bare = LurkingVariantHook::new(params);
        let pinned = (0..64)
            .filter_map(|seed| match evaluate_seeded(&bare, "dsk", Slot::Common, seed) {
                HookOutcome::Card(card) => Some(card.collector_number),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert!(!pinned.is_empty());
        assert!(pinned.iter().all(|number| ["287", "295"].contains(&number.as_str())));
    }
}
