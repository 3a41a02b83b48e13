//! Parameters shared by every algorithm (§6), plus validation (§4.10, §7).

use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::report::NewSolutionCallback;
use crate::scheme::BranchingScheme;

/// The serializable subset of the common parameters, used for the `Parameters`
/// section of the JSON report (§6). Node-valued fields (`goal`, `cutoff`) and
/// the callback can't be serialized, so they're summarized as booleans here,
/// matching the original's `"HasGoal"` / `"HasCutoff"` fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommonParametersReport {
    pub maximum_size_of_the_solution_pool: usize,
    pub time_limit_seconds: Option<f64>,
    pub maximum_number_of_nodes: i64,
    pub has_goal: bool,
    pub has_cutoff: bool,
    pub verbosity_level: u8,
}

/// Parameters common to every algorithm in this crate.
pub struct CommonParameters<'cb, S: BranchingScheme> {
    /// Maximum number of nodes kept in the solution pool (§4.2).
    pub maximum_size_of_the_solution_pool: usize,
    /// Wall-clock budget. `Duration::MAX` means unbounded.
    pub time_limit: Duration,
    /// Node budget. `-1` means unbounded.
    pub maximum_number_of_nodes: i64,
    /// If set, the search stops as soon as no solution can beat `goal`.
    pub goal: Option<Rc<S::Node>>,
    /// If set, an additional pruning bound independent of the solution pool.
    pub cutoff: Option<Rc<S::Node>>,
    /// Invoked synchronously every time the pool's best strictly improves.
    pub new_solution_callback: Option<NewSolutionCallback<'cb>>,
    /// 0 = silent, 1 = summary, 2 = detailed; gates `tracing` verbosity.
    pub verbosity_level: u8,
}

impl<S: BranchingScheme> Default for CommonParameters<'_, S> {
    fn default() -> Self {
        Self {
            maximum_size_of_the_solution_pool: 1,
            time_limit: Duration::MAX,
            maximum_number_of_nodes: -1,
            goal: None,
            cutoff: None,
            new_solution_callback: None,
            verbosity_level: 1,
        }
    }
}

impl<S: BranchingScheme> CommonParameters<'_, S> {
    pub fn validate(&self) -> Result<()> {
        if self.maximum_size_of_the_solution_pool == 0 {
            return Err(Error::InvalidParameter {
                field: "maximum_size_of_the_solution_pool",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn report(&self) -> CommonParametersReport {
        CommonParametersReport {
            maximum_size_of_the_solution_pool: self.maximum_size_of_the_solution_pool,
            time_limit_seconds: if self.time_limit == Duration::MAX {
                None
            } else {
                Some(self.time_limit.as_secs_f64())
            },
            maximum_number_of_nodes: self.maximum_number_of_nodes,
            has_goal: self.goal.is_some(),
            has_cutoff: self.cutoff.is_some(),
            verbosity_level: self.verbosity_level,
        }
    }
}

/// Checks `minimum <= maximum` for the growing-queue-cap algorithms
/// (IMBBFS, IBS), and that `growth_factor > 1.0`.
pub fn validate_growth(
    field_min: &'static str,
    minimum: i64,
    field_max: &'static str,
    maximum: i64,
    growth_factor: f64,
) -> Result<()> {
    if minimum > maximum {
        return Err(Error::InvalidParameter {
            field: field_min,
            message: format!("must be <= `{field_max}` ({minimum} > {maximum})"),
        });
    }
    if growth_factor <= 1.0 {
        return Err(Error::InvalidParameter {
            field: "growth_factor",
            message: format!("must be > 1.0, got {growth_factor}"),
        });
    }
    Ok(())
}

/// `next = max(current + 1, floor(current * growth_factor))`, the growth
/// rule shared by IMBBFS (§4.5) and IBS (§4.6).
pub fn grow(current: i64, growth_factor: f64) -> i64 {
    let scaled = ((current as f64) * growth_factor).floor() as i64;
    (current + 1).max(scaled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_sequence_matches_the_documented_example() {
        let mut cap = 1;
        let mut sequence = vec![cap];
        for _ in 0..5 {
            cap = grow(cap, 1.5);
            sequence.push(cap);
        }
        assert_eq!(sequence, vec![1, 2, 3, 4, 6, 9]);
    }

    #[test]
    fn grow_always_makes_forward_progress() {
        for growth_factor in [1.01, 1.5, 2.0, 10.0] {
            for current in 1..20 {
                assert!(grow(current, growth_factor) > current);
            }
        }
    }

    #[test]
    fn validate_growth_rejects_non_increasing_factor() {
        assert!(validate_growth("min", 1, "max", 100, 1.0).is_err());
        assert!(validate_growth("min", 1, "max", 100, 0.5).is_err());
    }

    #[test]
    fn validate_growth_rejects_inverted_bounds() {
        assert!(validate_growth("min", 100, "max", 1, 1.5).is_err());
    }

    #[test]
    fn validate_growth_accepts_a_sane_range() {
        assert!(validate_growth("min", 1, "max", 1_000, 1.5).is_ok());
    }
}
