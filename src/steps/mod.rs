//! Walkthrough generators
//!
//! Each generator is a pure function that turns a small input into an ordered,
//! immutable list of step records. The playback layer only ever indexes into
//! the returned list; nothing here keeps state between calls.
//!
//! - [`factors`]: trial-division factor finder, optimized (square-root bound)
//!   or naive (scan every divisor up to the number)
//! - [`find_max`]: linear scan for the largest value in an array
//! - [`errors`]: the [`GenerateError`] raised on unusable input

pub mod errors;
pub mod factors;
pub mod find_max;

pub use errors::GenerateError;

/// Largest number the factor finder accepts by default
pub const MAX_NUMBER: u32 = 10_000;

/// Largest array the find-max walkthrough accepts
pub const MAX_VALUES: usize = 32;

/// Common view of a step record, used by the narration pane and `--print`
pub trait StepRecord {
    /// Human-readable sentence describing this micro-step
    fn description(&self) -> &str;

    /// Stable lowercase tag of the step's stage (e.g. `not_found`)
    fn stage_tag(&self) -> &'static str;

    /// Key used to look up highlighted lines in a code listing
    fn listing_key(&self) -> &'static str {
        self.stage_tag()
    }
}

/// Parse a user-entered number for the factor finder.
///
/// Rejects empty text, fractional or non-numeric text, values below 1 and
/// values above `max`.
pub fn parse_number(input: &str, max: u32) -> Result<u32, GenerateError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GenerateError::invalid("", "enter a number"));
    }

    let value: i64 = match trimmed.parse() {
        Ok(v) => v,
        Err(_) => {
            let reason = if trimmed.parse::<f64>().is_ok() {
                "must be a whole number"
            } else {
                "not a number"
            };
            return Err(GenerateError::invalid(trimmed, reason));
        }
    };

    check_range(value, max)
}

/// Validate that `value` lies in `1..=max`
pub(crate) fn check_range(value: i64, max: u32) -> Result<u32, GenerateError> {
    if value < 1 {
        return Err(GenerateError::invalid(value, "must be at least 1"));
    }
    if value > i64::from(max) {
        return Err(GenerateError::invalid(value, format!("must be at most {}", max)));
    }
    Ok(value as u32)
}

/// Parse a comma-separated list of integers for the find-max walkthrough
pub fn parse_values(input: &str) -> Result<Vec<i64>, GenerateError> {
    let mut values = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let value = part
            .parse::<i64>()
            .map_err(|_| GenerateError::invalid(part, "not a whole number"))?;
        values.push(value);
    }

    if values.is_empty() {
        return Err(GenerateError::invalid(input.trim(), "enter at least one value"));
    }
    if values.len() > MAX_VALUES {
        return Err(GenerateError::invalid(
            input.trim(),
            format!("at most {} values", MAX_VALUES),
        ));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_accepts_bounds() {
        assert_eq!(parse_number("1", MAX_NUMBER), Ok(1));
        assert_eq!(parse_number(" 10000 ", MAX_NUMBER), Ok(10_000));
    }

    #[test]
    fn test_parse_number_rejects_out_of_range() {
        assert!(matches!(
            parse_number("0", MAX_NUMBER),
            Err(GenerateError::InvalidInput { .. })
        ));
        assert!(parse_number("-3", MAX_NUMBER).is_err());
        let err = parse_number("10001", MAX_NUMBER).unwrap_err();
        assert_eq!(err.reason(), "must be at most 10000");
    }

    #[test]
    fn test_parse_number_rejects_non_integers() {
        assert_eq!(
            parse_number("3.5", MAX_NUMBER).unwrap_err().reason(),
            "must be a whole number"
        );
        assert_eq!(
            parse_number("abc", MAX_NUMBER).unwrap_err().reason(),
            "not a number"
        );
        assert_eq!(
            parse_number("", MAX_NUMBER).unwrap_err().reason(),
            "enter a number"
        );
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_values("3, 7,2 ,9"), Ok(vec![3, 7, 2, 9]));
        assert_eq!(parse_values("-4"), Ok(vec![-4]));
        assert!(parse_values(" , ").is_err());
        assert!(parse_values("1,x").is_err());
    }

    #[test]
    fn test_parse_values_limit() {
        let list = |n: usize| vec!["1"; n].join(",");
        assert_eq!(parse_values(&list(MAX_VALUES)).map(|v| v.len()), Ok(MAX_VALUES));
        assert_eq!(
            parse_values(&list(MAX_VALUES + 1)).unwrap_err().reason(),
            "at most 32 values"
        );
    }

    #[test]
    fn test_error_display() {
        let err = parse_number("0", MAX_NUMBER).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input '0': must be at least 1");
    }
}
