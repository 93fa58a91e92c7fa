//! Factor finder walkthrough
//!
//! [`generate`] narrates a trial-division search for every factor of a number.
//! Each tested divisor produces three records: a `checking` step, a `dividing`
//! step carrying the remainder and quotient, and then either `found` or
//! `not_found`. The run opens with `init` (plus `optimize` in optimized mode)
//! and closes with a single `result`.
//!
//! # Modes
//!
//! - **Optimized**: divisors are scanned while `d * d <= number`. Every hit
//!   yields the pair `d` and `number / d`; a perfect-square root is inserted once.
//! - **Naive**: every divisor from 1 to `number` is scanned and hits are
//!   appended in ascending order.
//!
//! The bound is tested with integer arithmetic so perfect squares never fall
//! off the end of the scan through floating-point rounding.

use super::{check_range, GenerateError, StepRecord, MAX_NUMBER};
use std::fmt;
use tracing::debug;

/// Stage tag of a factor walkthrough step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorStage {
    Init,
    Optimize,
    Checking,
    Dividing,
    Found,
    NotFound,
    Result,
}

impl FactorStage {
    pub fn as_str(self) -> &'static str {
        match self {
            FactorStage::Init => "init",
            FactorStage::Optimize => "optimize",
            FactorStage::Checking => "checking",
            FactorStage::Dividing => "dividing",
            FactorStage::Found => "found",
            FactorStage::NotFound => "not_found",
            FactorStage::Result => "result",
        }
    }
}

impl fmt::Display for FactorStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable snapshot of the factor search
#[derive(Debug, Clone, PartialEq)]
pub struct FactorStep {
    pub description: String,
    pub stage: FactorStage,
    /// The number being factorized, constant across a run
    pub number: u32,
    /// Divisor under test, `None` outside a check
    pub current_divisor: Option<u32>,
    /// Factors found so far, ascending and duplicate-free
    pub factors: Vec<u32>,
    pub checking: Option<u32>,
    /// `None` until the division for the current divisor has been evaluated
    pub is_divisible: Option<bool>,
    pub remainder: Option<u32>,
    pub quotient: Option<u32>,
    /// Set only on `found` steps
    pub new_factor: Option<u32>,
    /// Cofactor added alongside `new_factor` (optimized mode only)
    pub new_pair: Option<u32>,
    /// Upper bound of the scan: `sqrt(number)` when optimized, else `number`
    pub limit: f64,
    pub optimized: bool,
}

impl FactorStep {
    /// The scan bound floored for display ("check up to 4" for 24)
    pub fn display_limit(&self) -> u32 {
        self.limit.floor() as u32
    }

    /// Whether `value` was added by this step
    pub fn is_new(&self, value: u32) -> bool {
        self.new_factor == Some(value) || self.new_pair == Some(value)
    }
}

impl StepRecord for FactorStep {
    fn description(&self) -> &str {
        &self.description
    }

    fn stage_tag(&self) -> &'static str {
        self.stage.as_str()
    }
}

/// Generate the factor walkthrough for `number` with the default ceiling.
///
/// Fails with [`GenerateError::InvalidInput`] when `number` is outside
/// `1..=MAX_NUMBER`. Calling it twice with the same arguments yields equal
/// sequences.
pub fn generate(number: i64, optimized: bool) -> Result<Vec<FactorStep>, GenerateError> {
    generate_bounded(number, optimized, MAX_NUMBER)
}

/// Generate the factor walkthrough with a caller-configured ceiling.
///
/// The ceiling can only tighten [`MAX_NUMBER`], never raise it.
pub fn generate_bounded(
    number: i64,
    optimized: bool,
    max: u32,
) -> Result<Vec<FactorStep>, GenerateError> {
    let number = check_range(number, max.min(MAX_NUMBER))?;

    let limit = if optimized {
        f64::from(number).sqrt()
    } else {
        f64::from(number)
    };

    let template = FactorStep {
        description: String::new(),
        stage: FactorStage::Init,
        number,
        current_divisor: None,
        factors: Vec::new(),
        checking: None,
        is_divisible: None,
        remainder: None,
        quotient: None,
        new_factor: None,
        new_pair: None,
        limit,
        optimized,
    };

    let mut steps = Vec::new();
    steps.push(FactorStep {
        description: if optimized {
            format!("Find all factors of {} by testing divisors in pairs", number)
        } else {
            format!("Find all factors of {} by testing every divisor from 1 to {}", number, number)
        },
        ..template.clone()
    });

    if optimized {
        let root = integer_sqrt(number);
        steps.push(FactorStep {
            description: format!(
                "Factors come in pairs, so we only need to check divisors up to √{} ≈ {}",
                number, root
            ),
            stage: FactorStage::Optimize,
            ..template.clone()
        });
    }

    let in_range = |d: u32| {
        if optimized {
            u64::from(d) * u64::from(d) <= u64::from(number)
        } else {
            d <= number
        }
    };

    let mut factors: Vec<u32> = Vec::new();
    let mut d: u32 = 1;
    while in_range(d) {
        steps.push(FactorStep {
            description: format!("Check whether {} divides {}", d, number),
            stage: FactorStage::Checking,
            current_divisor: Some(d),
            checking: Some(d),
            factors: factors.clone(),
            ..template.clone()
        });

        let remainder = number % d;
        let quotient = number / d;
        let divisible = remainder == 0;
        let division = FactorStep {
            description: format!("{} ÷ {} = {} remainder {}", number, d, quotient, remainder),
            stage: FactorStage::Dividing,
            current_divisor: Some(d),
            checking: Some(d),
            is_divisible: Some(divisible),
            remainder: Some(remainder),
            quotient: Some(quotient),
            factors: factors.clone(),
            ..template.clone()
        };
        steps.push(division.clone());

        if divisible {
            let (description, new_pair) = if !optimized {
                factors.push(d);
                (
                    format!("{} divides {} evenly, so {} is a factor", d, number, d),
                    None,
                )
            } else if quotient == d {
                factors.push(d);
                factors.sort_unstable();
                (
                    format!("{} × {} = {}, so {} is a factor (counted once)", d, d, number, d),
                    Some(d),
                )
            } else {
                factors.push(d);
                factors.push(quotient);
                factors.sort_unstable();
                (
                    format!(
                        "{} × {} = {}, so both {} and {} are factors",
                        d, quotient, number, d, quotient
                    ),
                    Some(quotient),
                )
            };

            steps.push(FactorStep {
                description,
                stage: FactorStage::Found,
                factors: factors.clone(),
                new_factor: Some(d),
                new_pair,
                ..division
            });
        } else {
            steps.push(FactorStep {
                description: format!(
                    "{} leaves remainder {} when divided by {}, so {} is not a factor",
                    number, remainder, d, d
                ),
                stage: FactorStage::NotFound,
                ..division
            });
        }

        d += 1;
    }

    steps.push(FactorStep {
        description: format!(
            "Found {} factor{} of {}: {}",
            factors.len(),
            if factors.len() == 1 { "" } else { "s" },
            number,
            join(&factors)
        ),
        stage: FactorStage::Result,
        factors,
        ..template
    });

    debug!(number, optimized, steps = steps.len(), "generated factor walkthrough");
    Ok(steps)
}

/// Every factor of `number` in ascending order, by plain trial division
pub fn factors_of(number: u32) -> Vec<u32> {
    (1..=number).filter(|d| number % d == 0).collect()
}

/// Largest `r` with `r * r <= n`
pub fn integer_sqrt(n: u32) -> u32 {
    let mut r = f64::from(n).sqrt() as u64;
    let n = u64::from(n);
    while r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    r as u32
}

fn join(values: &[u32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stages(steps: &[FactorStep]) -> Vec<FactorStage> {
        steps.iter().map(|s| s.stage).collect()
    }

    #[test]
    fn test_stage_order_for_six_optimized() {
        let steps = generate(6, true).unwrap();
        use FactorStage::*;
        assert_eq!(
            stages(&steps),
            vec![
                Init, Optimize, Checking, Dividing, Found, Checking, Dividing, Found, Result
            ]
        );
        assert_eq!(steps.last().unwrap().factors, vec![1, 2, 3, 6]);
    }

    #[test]
    fn test_naive_has_no_optimize_step() {
        let steps = generate(5, false).unwrap();
        assert!(steps.iter().all(|s| s.stage != FactorStage::Optimize));
        assert_eq!(steps[0].stage, FactorStage::Init);
        assert_eq!(steps[0].limit, 5.0);
        assert_eq!(steps.last().unwrap().factors, vec![1, 5]);
    }

    #[test]
    fn test_dividing_step_fields() {
        let steps = generate(10, true).unwrap();
        let div3 = steps
            .iter()
            .find(|s| s.stage == FactorStage::Dividing && s.current_divisor == Some(3))
            .unwrap();
        assert_eq!(div3.remainder, Some(1));
        assert_eq!(div3.quotient, Some(3));
        assert_eq!(div3.is_divisible, Some(false));

        let check3 = steps
            .iter()
            .find(|s| s.stage == FactorStage::Checking && s.current_divisor == Some(3))
            .unwrap();
        assert_eq!(check3.remainder, None);
        assert_eq!(check3.quotient, None);
        assert_eq!(check3.is_divisible, None);
    }

    #[test]
    fn test_not_found_carries_remainder() {
        let steps = generate(7, false).unwrap();
        for step in steps.iter().filter(|s| s.stage == FactorStage::NotFound) {
            assert!(step.remainder.unwrap() > 0);
            assert_eq!(step.new_factor, None);
        }
    }

    #[test]
    fn test_display_limit_is_floored() {
        let steps = generate(24, true).unwrap();
        assert!((steps[0].limit - 24f64.sqrt()).abs() < 1e-12);
        assert_eq!(steps[0].display_limit(), 4);
        assert!(steps[1].description.ends_with("≈ 4"));
    }

    #[test]
    fn test_result_description_counts_factors() {
        let steps = generate(1, true).unwrap();
        assert_eq!(steps.last().unwrap().description, "Found 1 factor of 1: 1");
        let steps = generate(12, false).unwrap();
        assert_eq!(
            steps.last().unwrap().description,
            "Found 6 factors of 12: 1, 2, 3, 4, 6, 12"
        );
    }

    #[test]
    fn test_naive_found_has_no_pair() {
        let steps = generate(12, false).unwrap();
        assert!(steps
            .iter()
            .filter(|s| s.stage == FactorStage::Found)
            .all(|s| s.new_pair.is_none()));
    }

    #[test]
    fn test_ceiling_is_configurable() {
        assert!(generate_bounded(50, true, 40).is_err());
        assert!(generate_bounded(40, true, 40).is_ok());
    }

    #[test]
    fn test_ceiling_cannot_be_raised() {
        let err = generate_bounded(10_001, true, 20_000).unwrap_err();
        assert_eq!(err.reason(), "must be at most 10000");
        assert!(generate_bounded(i64::from(u32::MAX), false, u32::MAX).is_err());
        assert!(generate_bounded(10_000, true, 20_000).is_ok());
    }

    #[test]
    fn test_integer_sqrt() {
        assert_eq!(integer_sqrt(1), 1);
        assert_eq!(integer_sqrt(24), 4);
        assert_eq!(integer_sqrt(25), 5);
        assert_eq!(integer_sqrt(9999), 99);
        assert_eq!(integer_sqrt(10_000), 100);
    }

    #[test]
    fn test_factors_of() {
        assert_eq!(factors_of(1), vec![1]);
        assert_eq!(factors_of(28), vec![1, 2, 4, 7, 14, 28]);
    }
}
