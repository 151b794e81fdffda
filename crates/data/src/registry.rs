use crate::schema::ProductConfig;
use std::collections::BTreeMap;

/// Resolved product records keyed by lowercase code.
#[derive(Debug, Clone)]
pub struct ProductRegistry {
    default: ProductConfig,
    products: BTreeMap<String, ProductConfig>,
    fallback_codes: Vec<String>,
}

impl ProductRegistry {
    pub fn new(
        default: ProductConfig,
        products: BTreeMap<String, ProductConfig>,
        fallback_codes: Vec<String>,
    ) -> Self {
        Self {
            default,
            products,
            fallback_codes,
        }
    }

    /// Record for `code`, falling back to the default template for codes
    /// without their own entry.
    pub fn get(&self, code: &str) -> &ProductConfig {
        self.products
            .get(&code.trim().to_lowercase())
            .unwrap_or(&self.default)
    }

    pub fn default_config(&self) -> &ProductConfig {
        &self.default
    }

    pub fn has_own_entry(&self, code: &str) -> bool {
        self.products.contains_key(&code.trim().to_lowercase())
    }

    /// True for configured products and listed fallback codes.
    pub fn is_known(&self, code: &str) -> bool {
        let code = code.trim().to_lowercase();
        self.products.contains_key(&code) || self.fallback_codes.contains(&code)
    }

    pub fn configured_codes(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }

    pub fn fallback_codes(&self) -> &[String] {
        &self.fallback_codes
    }

    pub fn known_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self
            .configured_codes()
            .chain(self.fallback_codes.iter().map(String::as_str))
            .collect();
        codes.sort_unstable();
        codes
    }
}
