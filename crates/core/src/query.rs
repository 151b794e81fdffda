use serde::{Deserialize, Serialize};

/// Appended to every search so the joke card never pollutes results.
pub const EXCLUDED_CARD_CLAUSE: &str = "-!\"Ragnarok, Divine Deliverance\"";

/// Products whose cards are not flagged as booster-legal by the database.
pub const BOOSTER_EXEMPT_SETS: &[&str] = &[
    "spg", "fca", "eos", "otp", "big", "wot", "mul", "brc", "dmc", "sta", "zne",
];

const BASIC_LAND_TYPE: &str = "basic land";
const TOKEN_TYPE: &str = "token";

/// Structured search filters. Each present field maps to one clause token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardFilters {
    pub set: Option<String>,
    pub rarity: Option<String>,
    pub foil: bool,
    pub variation: bool,
    pub frame: Option<String>,
    pub type_line: Option<String>,
    pub set_override: Option<String>,
    pub collector_number: Option<String>,
    pub produces: Option<String>,
    pub full_art: bool,
    pub price: Option<String>,
}

impl CardFilters {
    pub fn for_set(code: impl Into<String>) -> Self {
        Self {
            set: Some(code.into()),
            ..Self::default()
        }
    }

    /// Filters pinned to a sub-product, bypassing the main product code.
    pub fn sheet(code: impl Into<String>) -> Self {
        Self {
            set_override: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = Some(rarity.into());
        self
    }

    pub fn with_collector_number(mut self, number: impl Into<String>) -> Self {
        self.collector_number = Some(number.into());
        self
    }

    pub fn foil_only(mut self) -> Self {
        self.foil = true;
        self
    }

    pub fn effective_set(&self) -> Option<&str> {
        self.set_override
            .as_deref()
            .or(self.set.as_deref())
            .filter(|code| !code.is_empty())
    }

    pub fn search_expression(&self) -> String {
        let mut clauses: Vec<String> = Vec::new();
        let set = self.effective_set();
        let type_line = self.type_line.as_deref().filter(|value| !value.is_empty());

        if let Some(code) = set {
            clauses.push(format!("set:{code}"));
        }
        if type_line == Some(BASIC_LAND_TYPE) {
            clauses.push("t:basic".to_string());
        } else if !is_booster_exempt(set) && type_line != Some(TOKEN_TYPE) {
            clauses.push("is:booster".to_string());
        }
        if let Some(rarity) = non_empty(&self.rarity) {
            clauses.push(format!("rarity:{rarity}"));
        }
        if self.foil {
            clauses.push("is:foil".to_string());
        }
        if self.variation {
            clauses.push("variation:true".to_string());
        }
        if let Some(frame) = non_empty(&self.frame) {
            clauses.push(format!("frame:{frame}"));
        }
        if let Some(kind) = type_line.filter(|kind| *kind != BASIC_LAND_TYPE) {
            clauses.push(format!("type:{kind}"));
        }
        if self.full_art {
            clauses.push("t:full_art".to_string());
        }
        if let Some(number) = non_empty(&self.collector_number) {
            clauses.push(format!("cn:{number}"));
        }
        if let Some(colors) = non_empty(&self.produces) {
            clauses.push(format!("produces:{colors}"));
        }
        if let Some(price) = non_empty(&self.price) {
            clauses.push(price.to_string());
        }
        clauses.push(EXCLUDED_CARD_CLAUSE.to_string());
        clauses.join(" ")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|text| !text.is_empty())
}

fn is_booster_exempt(set: Option<&str>) -> bool {
    set.is_some_and(|code| BOOSTER_EXEMPT_SETS.contains(&code))
}

/// A search is either composed from filters or passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardQuery {
    Raw(String),
    Filters(CardFilters),
}

impl CardQuery {
    /// A blank raw query counts as no query and composes from empty filters.
    pub fn search_expression(&self) -> String {
        match self {
            Self::Raw(raw) => {
                let query = raw.trim();
                if query.is_empty() {
                    CardFilters::default().search_expression()
                } else if query.contains(EXCLUDED_CARD_CLAUSE) {
                    query.to_string()
                } else {
                    format!("{query} {EXCLUDED_CARD_CLAUSE}")
                }
            }
            Self::Filters(filters) => filters.search_expression(),
        }
    }
}

impl From<CardFilters> for CardQuery {
    fn from(filters: CardFilters) -> Self {
        Self::Filters(filters)
    }
}

impl From<&str> for CardQuery {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}
