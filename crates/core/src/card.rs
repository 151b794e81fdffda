use serde::{Deserialize, Serialize};

pub const REGULAR_TREATMENT: &str = "regular";

/// Suffix the card database appends to collector numbers of star variants.
const STAR_VARIANT_MARKER: char = '★';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Eur,
    Usd,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eur => "€",
            Self::Usd => "$",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prices {
    #[serde(default)]
    pub usd: Option<String>,
    #[serde(default)]
    pub usd_foil: Option<String>,
    #[serde(default)]
    pub eur: Option<String>,
    #[serde(default)]
    pub eur_foil: Option<String>,
}

impl Prices {
    /// Raw quote for the requested finish, preferring EUR and falling back to USD.
    pub fn quote(&self, foil: bool) -> Option<(&str, Currency)> {
        let (eur, usd) = if foil {
            (&self.eur_foil, &self.usd_foil)
        } else {
            (&self.eur, &self.usd)
        };
        non_empty(eur)
            .map(|value| (value, Currency::Eur))
            .or_else(|| non_empty(usd).map(|value| (value, Currency::Usd)))
    }

    /// Numeric quote; unparsable or missing prices count as zero.
    pub fn amount(&self, foil: bool) -> f64 {
        self.quote(foil)
            .and_then(|(value, _)| value.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.trim().is_empty())
}

/// Card record as returned by the card database, plus the metadata the
/// pack engine grafts on (treatment label, foil print).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub color_identity: Vec<String>,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub collector_number: String,
    #[serde(default)]
    pub prices: Prices,
    #[serde(default, skip_deserializing)]
    pub treatment: Option<String>,
    #[serde(default, skip_deserializing)]
    pub foil_print: bool,
}

impl Card {
    pub fn named(name: impl Into<String>, rarity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rarity: rarity.into(),
            ..Self::default()
        }
    }

    pub fn with_treatment(mut self, treatment: impl Into<String>) -> Self {
        self.treatment = Some(treatment.into());
        self
    }

    pub fn treatment_label(&self) -> &str {
        self.treatment
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(REGULAR_TREATMENT)
    }

    pub fn has_special_treatment(&self) -> bool {
        !self.treatment_label().eq_ignore_ascii_case(REGULAR_TREATMENT)
    }

    /// Collector number with any star-variant suffix removed, or `None`
    /// when what remains is not a plain number.
    pub fn collector_number_value(&self) -> Option<u32> {
        self.collector_number
            .split(STAR_VARIANT_MARKER)
            .next()
            .and_then(|digits| digits.trim().parse().ok())
    }

    pub fn is_rare_or_better(&self) -> bool {
        matches!(self.rarity.as_str(), "rare" | "mythic")
    }

    pub fn is_legendary(&self) -> bool {
        self.type_line.to_lowercase().contains("legendary")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_number_strips_star_marker() {
        let mut card = Card::named("Sample", "rare");
        card.collector_number = "112★".to_string();
        assert_eq!(card.collector_number_value(), Some(112));
        card.collector_number = "87".to_string();
        assert_eq!(card.collector_number_value(), Some(87));
    }

    #[test]
    fn collector_number_rejects_other_suffixes() {
        let mut card = Card::named("Sample", "rare");
        card.collector_number = "12a".to_string();
        assert_eq!(card.collector_number_value(), None);
        card.collector_number.clear();
        assert_eq!(card.collector_number_value(), None);
    }

    #[test]
    fn treatment_defaults_to_regular() {
        let card = Card::named("Sample", "common");
        assert_eq!(card.treatment_label(), REGULAR_TREATMENT);
        assert!(!card.has_special_treatment());
        let tagged = card.with_treatment("borderless");
        assert_eq!(tagged.treatment_label(), "borderless");
        assert!(tagged.has_special_treatment());
    }

    #[test]
    fn price_quote_prefers_eur_then_usd() {
        let prices = Prices {
            usd: Some("1.50".to_string()),
            usd_foil: Some("4.00".to_string()),
            eur: None,
            eur_foil: Some("3.20".to_string()),
        };
        assert_eq!(prices.quote(false), Some(("1.50", Currency::Usd)));
        assert_eq!(prices.quote(true), Some(("3.20", Currency::Eur)));
        assert_eq!(prices.amount(true), 3.2);
        assert_eq!(Prices::default().amount(false), 0.0);
    }

    #[test]
    fn deserializes_database_record() {
        let raw = r#"{
            "name": "Marsh Flats",
            "rarity": "rare",
            "set": "mh3",
            "color_identity": [],
            "type_line": "Land",
            "collector_number": "219",
            "prices": {"usd": "12.10", "usd_foil": null, "eur": "10.00", "eur_foil": "14.50"},
            "x_treatment": "ignored"
        }"#;
        let card: Card = serde_json::from_str(raw).expect("parse card");
        assert_eq!(card.name, "Marsh Flats");
        assert_eq!(card.collector_number_value(), Some(219));
        assert_eq!(card.prices.amount(true), 14.5);
        assert!(card.treatment.is_none());
    }
}
