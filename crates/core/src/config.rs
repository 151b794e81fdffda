use crate::CardQuery;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome label (usually a rarity) to relative weight.
pub type Distribution = BTreeMap<String, f64>;

pub const DEFAULT_MYTHIC_CHANCE: f64 = 0.125;
pub const DEFAULT_LOTTERY_CHANCE: f64 = 0.057;
pub const DEFAULT_LOTTERY_NAMES: &[&str] = &[
    "Arid Mesa",
    "Marsh Flats",
    "Misty Rainforest",
    "Scalding Tarn",
    "Verdant Catacombs",
];

/// Anything that can be drawn proportionally to a weight.
pub trait Weighted {
    fn weight(&self) -> f64;
}

fn default_weight() -> f64 {
    1.0
}

/// One row of an override table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedEntry {
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub query: CardQuery,
    #[serde(default)]
    pub treatment: Option<String>,
    /// Marks rows meant for foil tables. Pricing follows the slot a row
    /// fills, not this flag.
    #[serde(default)]
    pub foil: bool,
}

impl Weighted for WeightedEntry {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Inclusive collector-number window, written as `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorRange(pub u32, pub u32);

impl CollectorRange {
    pub fn contains(self, number: u32) -> bool {
        self.0 <= number && number <= self.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusSheet {
    pub code: String,
    #[serde(default)]
    pub chance: f64,
    #[serde(default)]
    pub weights: Option<Distribution>,
    #[serde(default)]
    pub cn_range: Option<CollectorRange>,
}

impl BonusSheet {
    /// A chance of one or more adds the card on top of the commons.
    pub fn is_addition(&self) -> bool {
        self.chance >= 1.0
    }
}

fn default_lottery_chance() -> f64 {
    DEFAULT_LOTTERY_CHANCE
}

fn default_lottery_names() -> Vec<String> {
    DEFAULT_LOTTERY_NAMES.iter().map(|name| name.to_string()).collect()
}

/// Foil-slot mini lottery: a chance at a foil rare from a fixed name list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoilLottery {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_lottery_chance")]
    pub chance: f64,
    #[serde(default = "default_lottery_names")]
    pub names: Vec<String>,
}

impl Default for FoilLottery {
    fn default() -> Self {
        Self {
            enabled: false,
            chance: DEFAULT_LOTTERY_CHANCE,
            names: default_lottery_names(),
        }
    }
}

impl FoilLottery {
    pub fn accepts(&self, name: &str) -> bool {
        self.names.iter().any(|candidate| candidate == name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum RawHookDecl {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        params: serde_json::Value,
    },
}

/// A hook requested by a product, by name, with its parameter bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawHookDecl")]
pub struct HookDecl {
    pub name: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl HookDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: serde_json::Value::Null,
        }
    }

    pub fn with_params(name: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

impl From<RawHookDecl> for HookDecl {
    fn from(raw: RawHookDecl) -> Self {
        match raw {
            RawHookDecl::Name(name) => Self::new(name),
            RawHookDecl::Full { name, params } => Self { name, params },
        }
    }
}

fn default_token_count() -> u32 {
    1
}

/// Fully resolved slot structure of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    #[serde(default)]
    pub code: String,
    pub common_slots: u32,
    pub uncommon_slots: u32,
    #[serde(default)]
    pub rare_weights: Distribution,
    #[serde(default)]
    pub wildcard_weights: Distribution,
    #[serde(default)]
    pub foil_weights: Distribution,
    #[serde(default)]
    pub rare_table: Option<Vec<WeightedEntry>>,
    #[serde(default)]
    pub wildcard_table: Option<Vec<WeightedEntry>>,
    #[serde(default)]
    pub foil_table: Option<Vec<WeightedEntry>>,
    #[serde(default)]
    pub bonus: Option<BonusSheet>,
    #[serde(default)]
    pub hooks: Vec<HookDecl>,
    #[serde(default)]
    pub foil_lottery: FoilLottery,
    #[serde(default = "default_token_count")]
    pub token_count: u32,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            code: String::new(),
            common_slots: 6,
            uncommon_slots: 3,
            rare_weights: distribution(&[
                ("rare", 1.0 - DEFAULT_MYTHIC_CHANCE),
                ("mythic", DEFAULT_MYTHIC_CHANCE),
            ]),
            wildcard_weights: distribution(&[
                ("common", 0.50),
                ("uncommon", 0.30),
                ("rare", 0.15),
                ("mythic", 0.05),
            ]),
            foil_weights: distribution(&[
                ("common", 0.65),
                ("uncommon", 0.25),
                ("rare", 0.08),
                ("mythic", 0.02),
            ]),
            rare_table: None,
            wildcard_table: None,
            foil_table: None,
            bonus: None,
            hooks: Vec::new(),
            foil_lottery: FoilLottery::default(),
            token_count: default_token_count(),
        }
    }
}

impl ProductConfig {
    /// Copy of this configuration tagged with the product code of one run.
    pub fn stamped(&self, code: &str) -> Self {
        Self {
            code: code.to_lowercase(),
            ..self.clone()
        }
    }

    /// Bonus sheet that can actually trigger.
    pub fn active_bonus(&self) -> Option<&BonusSheet> {
        self.bonus
            .as_ref()
            .filter(|sheet| sheet.chance > 0.0 && !sheet.code.is_empty())
    }
}

pub fn distribution(pairs: &[(&str, f64)]) -> Distribution {
    pairs
        .iter()
        .map(|(label, weight)| (label.to_string(), *weight))
        .collect()
}
