use crate::{Distribution, RngState, Weighted};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectError {
    #[error("invalid distribution: {0}")]
    InvalidDistribution(&'static str),
}

/// Draws one label with probability proportional to its weight.
///
/// Weights are normalised by their actual sum, so authored percentages
/// that do not add up to 100 are fine.
pub fn pick_weighted<'a>(
    distribution: &'a Distribution,
    rng: &mut RngState,
) -> Result<&'a str, SelectError> {
    let idx = pick_index(distribution.values().copied(), rng)?;
    distribution
        .keys()
        .nth(idx)
        .map(String::as_str)
        .ok_or(SelectError::InvalidDistribution("index out of range"))
}

/// Draws one row of a weighted table.
pub fn pick_from_table<'a, T: Weighted>(
    rows: &'a [T],
    rng: &mut RngState,
) -> Result<&'a T, SelectError> {
    let idx = pick_index(rows.iter().map(Weighted::weight), rng)?;
    rows.get(idx)
        .ok_or(SelectError::InvalidDistribution("index out of range"))
}

fn pick_index(weights: impl Iterator<Item = f64>, rng: &mut RngState) -> Result<usize, SelectError> {
    let weights: Vec<f64> = weights.collect();
    if weights.is_empty() {
        return Err(SelectError::InvalidDistribution("no entries"));
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(SelectError::InvalidDistribution("negative or non-finite weight"));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(SelectError::InvalidDistribution("all weights are zero"));
    }
    let mut roll = rng.next_f64() * total;
    let mut last_positive = 0;
    for (idx, weight) in weights.iter().copied().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        if roll < weight {
            return Ok(idx);
        }
        roll -= weight;
        last_positive = idx;
    }
    // rounding left the roll just past the final bucket
    Ok(last_positive)
}
