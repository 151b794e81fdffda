use crate::registry::ProductRegistry;
use crate::schema::{Distribution, ProductConfig, RegistryFile, WeightedEntry};
use anyhow::{bail, Context};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

const BUILTIN_JSON: &[u8] = include_bytes!("../products.json");

/// Product registry shipped with the crate.
pub fn load_builtin_registry() -> ProductRegistry {
    parse_registry(BUILTIN_JSON).expect("built-in products.json must be valid")
}

pub fn load_registry(path: &Path) -> anyhow::Result<ProductRegistry> {
    let raw = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    parse_registry(&raw).with_context(|| format!("load {}", path.display()))
}

pub fn parse_registry(json_bytes: &[u8]) -> anyhow::Result<ProductRegistry> {
    let file: RegistryFile = serde_json::from_slice(json_bytes).context("parse product registry")?;
    validate_product("default", &file.default)?;

    let mut products = BTreeMap::new();
    for (code, patch) in file.products {
        let code = code.trim().to_lowercase();
        if code.is_empty() {
            bail!("product code cannot be empty");
        }
        let config = patch.apply(&file.default, &code);
        validate_product(&code, &config)?;
        if products.insert(code.clone(), config).is_some() {
            bail!("duplicate product {code}");
        }
    }

    let mut fallback_codes = Vec::new();
    for code in file.fallback_codes {
        let code = code.trim().to_lowercase();
        if code.is_empty() {
            bail!("fallback code cannot be empty");
        }
        if products.contains_key(&code) || fallback_codes.contains(&code) {
            bail!("fallback code {code} is already listed");
        }
        fallback_codes.push(code);
    }

    debug!(
        products = products.len(),
        fallbacks = fallback_codes.len(),
        "product registry loaded"
    );
    Ok(ProductRegistry::new(file.default, products, fallback_codes))
}

fn validate_product(code: &str, config: &ProductConfig) -> anyhow::Result<()> {
    check_slot(code, "rare", &config.rare_weights, config.rare_table.as_deref())?;
    check_slot(code, "wildcard", &config.wildcard_weights, config.wildcard_table.as_deref())?;
    check_slot(code, "foil", &config.foil_weights, config.foil_table.as_deref())?;

    if let Some(bonus) = &config.bonus {
        check_chance(code, "bonus chance", bonus.chance)?;
        if let Some(weights) = &bonus.weights {
            check_distribution(code, "bonus weights", weights)?;
        }
        if let Some(range) = bonus.cn_range {
            if range.0 > range.1 {
                bail!(
                    "{code}: bonus collector range {}..={} is inverted",
                    range.0,
                    range.1
                );
            }
        }
    }
    check_chance(code, "foil lottery chance", config.foil_lottery.chance)?;
    if config.foil_lottery.enabled && config.foil_lottery.names.is_empty() {
        bail!("{code}: foil lottery is enabled without names");
    }
    for hook in &config.hooks {
        if hook.name.trim().is_empty() {
            bail!("{code}: hook name cannot be empty");
        }
    }
    Ok(())
}

/// A table replaces the flat weights of its slot, so only one of the two
/// has to be usable.
fn check_slot(
    code: &str,
    slot: &str,
    weights: &Distribution,
    table: Option<&[WeightedEntry]>,
) -> anyhow::Result<()> {
    match table {
        Some(rows) => check_table(code, slot, rows),
        None => check_distribution(code, &format!("{slot} weights"), weights),
    }
}

fn check_table(code: &str, slot: &str, rows: &[WeightedEntry]) -> anyhow::Result<()> {
    if rows.is_empty() {
        bail!("{code}: {slot} table is empty");
    }
    check_weights(code, &format!("{slot} table"), rows.iter().map(|row| row.weight))
}

fn check_distribution(code: &str, what: &str, weights: &Distribution) -> anyhow::Result<()> {
    if weights.is_empty() {
        bail!("{code}: {what} are empty");
    }
    check_weights(code, what, weights.values().copied())
}

fn check_weights(code: &str, what: &str, weights: impl Iterator<Item = f64>) -> anyhow::Result<()> {
    let mut total = 0.0;
    for weight in weights {
        if !weight.is_finite() || weight < 0.0 {
            bail!("{code}: {what} has invalid weight {weight}");
        }
        total += weight;
    }
    if total <= 0.0 {
        bail!("{code}: {what} has no positive weight");
    }
    Ok(())
}

fn check_chance(code: &str, what: &str, chance: f64) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&chance) {
        bail!("{code}: {what} {chance} is outside [0, 1]");
    }
    Ok(())
}
