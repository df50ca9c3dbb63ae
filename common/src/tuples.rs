//! Satisfying-tuple tables for "exactly k mines among these cells".
//!
//! Rather than walking the full cartesian product of the scope's domains,
//! tables are enumerated by choosing which `k` positions hold a mine. Every
//! other position takes its non-mine value, so a table over `n` open cells
//! has exactly `C(n, k)` rows.

use crate::csp::{Tuple, Value};
use itertools::Itertools;

/// `n choose k`, saturating at `u128::MAX`.
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u128, |acc, i| {
        acc.saturating_mul((n - i) as u128) / (i as u128 + 1)
    })
}

/// Number of positions whose working domain still allows a mine.
pub fn mine_eligible(domains: &[&[Value]]) -> usize {
    domains
        .iter()
        .filter(|domain| domain.contains(&Value::Mine))
        .count()
}

/// How many subsets [`satisfying_tuples`] would inspect.
pub fn candidate_count(domains: &[&[Value]], mines: usize) -> u128 {
    binomial(mine_eligible(domains), mines)
}

/// Every tuple over `domains` with exactly `mines` positions set to
/// [`Value::Mine`], in lexicographic order of the mine positions.
///
/// A position can only hold a mine when its domain contains one. Positions
/// left without a mine take the first non-mine value of their domain; a
/// subset that leaves a mine-only position empty is skipped.
pub fn satisfying_tuples(domains: &[&[Value]], mines: usize) -> Vec<Tuple> {
    let safe_values: Vec<Option<Value>> = domains
        .iter()
        .map(|domain| domain.iter().copied().find(|value| !value.is_mine()))
        .collect();

    let eligible: Vec<usize> = domains
        .iter()
        .enumerate()
        .filter(|(_, domain)| domain.contains(&Value::Mine))
        .map(|(position, _)| position)
        .collect();

    eligible
        .into_iter()
        .combinations(mines)
        .filter_map(|chosen| {
            let mut chosen = chosen.into_iter().peekable();
            let mut tuple = Vec::with_capacity(safe_values.len());
            for (position, safe) in safe_values.iter().enumerate() {
                if chosen.next_if_eq(&position).is_some() {
                    tuple.push(Value::Mine);
                } else {
                    tuple.push((*safe)?);
                }
            }
            Some(tuple)
        })
        .collect()
}
