//! Find-max walkthrough
//!
//! A single linear scan: the first value seeds the running maximum, then each
//! later index produces one `comparing` step that either keeps or replaces it.

use super::{GenerateError, StepRecord, MAX_VALUES};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxStage {
    Init,
    Comparing,
    Complete,
}

impl MaxStage {
    pub fn as_str(self) -> &'static str {
        match self {
            MaxStage::Init => "init",
            MaxStage::Comparing => "comparing",
            MaxStage::Complete => "complete",
        }
    }
}

impl fmt::Display for MaxStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One snapshot of the find-max scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxStep {
    pub description: String,
    pub stage: MaxStage,
    pub values: Vec<i64>,
    /// Index being compared, `None` on `init` and `complete`
    pub index: Option<usize>,
    pub current_max: i64,
    pub max_index: usize,
    /// True when this comparison replaced the running maximum
    pub updated: bool,
}

impl StepRecord for MaxStep {
    fn description(&self) -> &str {
        &self.description
    }

    fn stage_tag(&self) -> &'static str {
        self.stage.as_str()
    }

    fn listing_key(&self) -> &'static str {
        if self.updated {
            "update_max"
        } else {
            self.stage.as_str()
        }
    }
}

/// Generate the find-max walkthrough for `values`
pub fn generate(values: &[i64]) -> Result<Vec<MaxStep>, GenerateError> {
    let Some(&first) = values.first() else {
        return Err(GenerateError::invalid("", "the array is empty"));
    };
    if values.len() > MAX_VALUES {
        return Err(GenerateError::invalid(
            values.len(),
            format!("at most {} values", MAX_VALUES),
        ));
    }

    let mut steps = Vec::with_capacity(values.len() + 1);
    let mut max = first;
    let mut max_index = 0;

    steps.push(MaxStep {
        description: format!("Start with the first element: max = {}", first),
        stage: MaxStage::Init,
        values: values.to_vec(),
        index: None,
        current_max: max,
        max_index,
        updated: false,
    });

    for (i, &value) in values.iter().enumerate().skip(1) {
        let updated = value > max;
        let description = if updated {
            format!("arr[{}] = {} is greater than {}, so max becomes {}", i, value, max, value)
        } else {
            format!("arr[{}] = {} is not greater than {}, keep max", i, value, max)
        };
        if updated {
            max = value;
            max_index = i;
        }
        steps.push(MaxStep {
            description,
            stage: MaxStage::Comparing,
            values: values.to_vec(),
            index: Some(i),
            current_max: max,
            max_index,
            updated,
        });
    }

    steps.push(MaxStep {
        description: format!("The maximum value is {} at index {}", max, max_index),
        stage: MaxStage::Complete,
        values: values.to_vec(),
        index: None,
        current_max: max,
        max_index,
        updated: false,
    });

    debug!(len = values.len(), steps = steps.len(), "generated find-max walkthrough");
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_tracks_running_max() {
        let steps = generate(&[3, 7, 2, 9, 4]).unwrap();
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0].stage, MaxStage::Init);
        assert_eq!(steps[0].current_max, 3);

        assert!(steps[1].updated);
        assert_eq!(steps[1].current_max, 7);
        assert!(!steps[2].updated);
        assert_eq!(steps[2].current_max, 7);

        let last = steps.last().unwrap();
        assert_eq!(last.stage, MaxStage::Complete);
        assert_eq!(last.current_max, 9);
        assert_eq!(last.max_index, 3);
    }

    #[test]
    fn test_ties_keep_first_index() {
        let steps = generate(&[5, 5, 1]).unwrap();
        assert_eq!(steps.last().unwrap().max_index, 0);
    }

    #[test]
    fn test_single_value() {
        let steps = generate(&[-2]).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].current_max, -2);
    }

    #[test]
    fn test_empty_is_invalid() {
        assert!(matches!(
            generate(&[]),
            Err(GenerateError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_too_many_values_is_invalid() {
        let values: Vec<i64> = (0..=MAX_VALUES as i64).collect();
        let err = generate(&values).unwrap_err();
        assert_eq!(err.reason(), "at most 32 values");
        assert!(generate(&values[..MAX_VALUES]).is_ok());
    }
}
