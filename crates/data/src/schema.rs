use serde::Deserialize;
use std::collections::BTreeMap;

pub use booster_core::{
    BonusSheet, CollectorRange, Distribution, FoilLottery, HookDecl, ProductConfig, WeightedEntry,
};

/// On-disk registry: a template record, per-product patches on top of it,
/// and extra codes that open with the template alone.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryFile {
    pub default: ProductConfig,
    #[serde(default)]
    pub products: BTreeMap<String, ProductPatch>,
    #[serde(default)]
    pub fallback_codes: Vec<String>,
}

/// Fields a product overrides. Anything left out comes from the default record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductPatch {
    pub common_slots: Option<u32>,
    pub uncommon_slots: Option<u32>,
    pub rare_weights: Option<Distribution>,
    pub wildcard_weights: Option<Distribution>,
    pub foil_weights: Option<Distribution>,
    pub rare_table: Option<Vec<WeightedEntry>>,
    pub wildcard_table: Option<Vec<WeightedEntry>>,
    pub foil_table: Option<Vec<WeightedEntry>>,
    pub bonus: Option<BonusSheet>,
    pub hooks: Option<Vec<HookDecl>>,
    pub foil_lottery: Option<FoilLottery>,
    pub token_count: Option<u32>,
}

impl ProductPatch {
    pub fn apply(self, base: &ProductConfig, code: &str) -> ProductConfig {
        let mut config = base.stamped(code);
        if let Some(value) = self.common_slots {
            config.common_slots = value;
        }
        if let Some(value) = self.uncommon_slots {
            config.uncommon_slots = value;
        }
        if let Some(value) = self.rare_weights {
            config.rare_weights = value;
        }
        if let Some(value) = self.wildcard_weights {
            config.wildcard_weights = value;
        }
        if let Some(value) = self.foil_weights {
            config.foil_weights = value;
        }
        if self.rare_table.is_some() {
            config.rare_table = self.rare_table;
        }
        if self.wildcard_table.is_some() {
            config.wildcard_table = self.wildcard_table;
        }
        if self.foil_table.is_some() {
            config.foil_table = self.foil_table;
        }
        if self.bonus.is_some() {
            config.bonus = self.bonus;
        }
        if let Some(value) = self.hooks {
            config.hooks = value;
        }
        if let Some(value) = self.foil_lottery {
            config.foil_lottery = value;
        }
        if let Some(value) = self.token_count {
            config.token_count = value;
        }
        config
    }
}
