//! Descriptive statistics over one numeric column.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub range: f64,
    pub standard_deviation: f64,
}

/// Computes statistics over the genuinely numeric values in `values`.
///
/// Numeric-looking text is ignored. Returns `None` when nothing numeric is
/// left, which callers treat as "no insight" rather than an error.
pub fn compute<'a, I>(values: I) -> Option<Statistics>
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let numbers: Vec<f64> = values
        .into_iter()
        .filter_map(|value| match value {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        })
        .collect();

    if numbers.is_empty() {
        return None;
    }

    let count = numbers.len() as f64;
    let mean = numbers.iter().sum::<f64>() / count;

    let mut sorted = numbers.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    let range = sorted[sorted.len() - 1] - sorted[0];

    let variance = numbers.iter().map(|n| (n - mean).powi(2)).sum::<f64>() / count;

    Some(Statistics {
        mean: round2(mean),
        median: round2(median),
        mode: round2(mode(&numbers)),
        range: round2(range),
        standard_deviation: round2(variance.sqrt()),
    })
}

/// Most frequent value; among equally frequent values the one that reached
/// the top count first in a left-to-right scan wins.
fn mode(numbers: &[f64]) -> f64 {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    let mut best = numbers[0];
    let mut best_count = 0;

    for &n in numbers {
        // -0.0 and 0.0 are the same value
        let key = if n == 0.0 { 0.0f64.to_bits() } else { n.to_bits() };
        let count = counts.entry(key).or_insert(0);
        *count += 1;
        if *count > best_count {
            best_count = *count;
            best = n;
        }
    }

    best
}

/// Rounds to two decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
