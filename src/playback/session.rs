//! The active walkthrough and its playback state
//!
//! [`Session`] owns exactly one [`Walkthrough`] and the [`Autoplay`] ticker
//! driving it. Every change of input (number, mode, values, algorithm) stops
//! autoplay before the new sequence is generated, so a tick scheduled against
//! the old sequence can never move the cursor of the new one.

use super::{Autoplay, Cursor, PlaybackError, Tick, Timeline};
use crate::steps::factors::{self, FactorStep};
use crate::steps::find_max::{self, MaxStep};
use crate::steps::{GenerateError, StepRecord, MAX_NUMBER};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Which walkthrough is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Factors,
    FindMax,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Factors => "factors",
            Algorithm::FindMax => "find-max",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Algorithm::Factors => "Find Factors",
            Algorithm::FindMax => "Find Max",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Algorithm::Factors => Algorithm::FindMax,
            Algorithm::FindMax => Algorithm::Factors,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "factors" => Ok(Algorithm::Factors),
            "find-max" | "findmax" | "max" => Ok(Algorithm::FindMax),
            other => Err(format!("unknown algorithm '{}'", other)),
        }
    }
}

/// A generated walkthrough together with the input that produced it
#[derive(Debug, Clone)]
pub enum Walkthrough {
    Factors {
        number: u32,
        optimized: bool,
        timeline: Timeline<FactorStep>,
    },
    FindMax {
        values: Vec<i64>,
        timeline: Timeline<MaxStep>,
    },
}

impl Walkthrough {
    pub fn factors(number: i64, optimized: bool, max: u32) -> Result<Self, GenerateError> {
        let steps = factors::generate_bounded(number, optimized, max)?;
        Ok(Walkthrough::Factors {
            number: steps[0].number,
            optimized,
            timeline: Timeline::new(steps),
        })
    }

    pub fn find_max(values: Vec<i64>) -> Result<Self, GenerateError> {
        let steps = find_max::generate(&values)?;
        Ok(Walkthrough::FindMax {
            values,
            timeline: Timeline::new(steps),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Walkthrough::Factors { .. } => Algorithm::Factors,
            Walkthrough::FindMax { .. } => Algorithm::FindMax,
        }
    }

    pub fn cursor(&self) -> &dyn Cursor {
        match self {
            Walkthrough::Factors { timeline, .. } => timeline,
            Walkthrough::FindMax { timeline, .. } => timeline,
        }
    }

    pub fn cursor_mut(&mut self) -> &mut dyn Cursor {
        match self {
            Walkthrough::Factors { timeline, .. } => timeline,
            Walkthrough::FindMax { timeline, .. } => timeline,
        }
    }

    /// The step under the cursor
    pub fn current_record(&self) -> Option<&dyn StepRecord> {
        match self {
            Walkthrough::Factors { timeline, .. } => {
                timeline.current().map(|s| s as &dyn StepRecord)
            }
            Walkthrough::FindMax { timeline, .. } => {
                timeline.current().map(|s| s as &dyn StepRecord)
            }
        }
    }

    /// Every step in order
    pub fn records(&self) -> Vec<&dyn StepRecord> {
        match self {
            Walkthrough::Factors { timeline, .. } => timeline
                .steps()
                .iter()
                .map(|s| s as &dyn StepRecord)
                .collect(),
            Walkthrough::FindMax { timeline, .. } => timeline
                .steps()
                .iter()
                .map(|s| s as &dyn StepRecord)
                .collect(),
        }
    }

    /// Short label of the input, e.g. `24 (optimized)`
    pub fn input_label(&self) -> String {
        match self {
            Walkthrough::Factors {
                number, optimized, ..
            } => format!(
                "{} ({})",
                number,
                if *optimized { "optimized" } else { "naive" }
            ),
            Walkthrough::FindMax { values, .. } => format!("{:?}", values),
        }
    }
}

/// Inputs a session starts from
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub algorithm: Algorithm,
    pub number: i64,
    pub optimized: bool,
    pub max_number: u32,
    pub values: Vec<i64>,
    pub interval: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            algorithm: Algorithm::Factors,
            number: 24,
            optimized: true,
            max_number: MAX_NUMBER,
            values: vec![3, 7, 2, 9, 4, 1, 8],
            interval: Duration::from_millis(1000),
        }
    }
}

/// The current walkthrough plus its autoplay state
#[derive(Debug)]
pub struct Session {
    walkthrough: Walkthrough,
    autoplay: Autoplay,
    number: i64,
    optimized: bool,
    max_number: u32,
    values: Vec<i64>,
}

impl Session {
    /// Generate the walkthrough for `settings.algorithm`.
    ///
    /// Only the input that algorithm consumes is validated here; the other one
    /// is checked when [`Session::switch_algorithm`] first needs it.
    pub fn new(settings: SessionSettings) -> Result<Self, GenerateError> {
        let max_number = settings.max_number.min(MAX_NUMBER);
        let walkthrough = match settings.algorithm {
            Algorithm::Factors => {
                Walkthrough::factors(settings.number, settings.optimized, max_number)?
            }
            Algorithm::FindMax => Walkthrough::find_max(settings.values.clone())?,
        };
        info!(
            algorithm = %settings.algorithm,
            input = %walkthrough.input_label(),
            steps = walkthrough.cursor().len(),
            "session started"
        );

        Ok(Session {
            walkthrough,
            autoplay: Autoplay::new(settings.interval),
            number: settings.number,
            optimized: settings.optimized,
            max_number,
            values: settings.values,
        })
    }

    pub fn walkthrough(&self) -> &Walkthrough {
        &self.walkthrough
    }

    pub fn algorithm(&self) -> Algorithm {
        self.walkthrough.algorithm()
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn is_optimized(&self) -> bool {
        self.optimized
    }

    pub fn max_number(&self) -> u32 {
        self.max_number
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn is_playing(&self) -> bool {
        self.autoplay.is_playing()
    }

    pub fn position(&self) -> usize {
        self.walkthrough.cursor().position()
    }

    pub fn len(&self) -> usize {
        self.walkthrough.cursor().len()
    }

    pub fn is_empty(&self) -> bool {
        self.walkthrough.cursor().is_empty()
    }

    pub fn is_at_start(&self) -> bool {
        self.walkthrough.cursor().is_at_start()
    }

    pub fn is_at_end(&self) -> bool {
        self.walkthrough.cursor().is_at_end()
    }

    pub fn step_forward(&mut self) -> Result<(), PlaybackError> {
        self.autoplay.stop();
        self.walkthrough.cursor_mut().step_forward()
    }

    pub fn step_backward(&mut self) -> Result<(), PlaybackError> {
        self.autoplay.stop();
        self.walkthrough.cursor_mut().step_backward()
    }

    pub fn rewind_to_start(&mut self) -> Result<(), PlaybackError> {
        self.autoplay.stop();
        self.walkthrough.cursor_mut().rewind_to_start()
    }

    pub fn jump_to_end(&mut self) -> Result<(), PlaybackError> {
        self.autoplay.stop();
        self.walkthrough.cursor_mut().jump_to_end()
    }

    /// Step forward up to `n` times, returning how many steps were taken
    pub fn step_forward_by(&mut self, n: usize) -> usize {
        self.autoplay.stop();
        let cursor = self.walkthrough.cursor_mut();
        (0..n).take_while(|_| cursor.step_forward().is_ok()).count()
    }

    /// Toggle autoplay; starting from the last step replays from the beginning
    pub fn toggle_play(&mut self, now: Instant) -> bool {
        if !self.autoplay.is_playing() && self.is_at_end() {
            let _ = self.walkthrough.cursor_mut().rewind_to_start();
        }
        self.autoplay.toggle(now)
    }

    pub fn stop_autoplay(&mut self) {
        self.autoplay.stop();
    }

    /// Advance the cursor if an autoplay tick is due
    pub fn tick(&mut self, now: Instant) -> Tick {
        self.autoplay.poll(now, self.walkthrough.cursor_mut())
    }

    /// Regenerate the factor walkthrough for a new number, keeping the mode
    pub fn set_number(&mut self, number: i64) -> Result<(), GenerateError> {
        self.autoplay.stop();
        let walkthrough = Walkthrough::factors(number, self.optimized, self.max_number)
            .inspect_err(|e| warn!(error = %e, "rejected number"))?;
        self.number = number;
        self.install(walkthrough);
        Ok(())
    }

    /// Flip between optimized and naive mode and regenerate from scratch
    pub fn toggle_optimized(&mut self) -> Result<bool, GenerateError> {
        self.autoplay.stop();
        let optimized = !self.optimized;
        if self.algorithm() == Algorithm::Factors {
            let walkthrough =
                Walkthrough::factors(self.number, optimized, self.max_number)?;
            self.install(walkthrough);
        }
        self.optimized = optimized;
        Ok(optimized)
    }

    /// Replace the find-max input array
    pub fn set_values(&mut self, values: Vec<i64>) -> Result<(), GenerateError> {
        self.autoplay.stop();
        let walkthrough = Walkthrough::find_max(values.clone())
            .inspect_err(|e| warn!(error = %e, "rejected values"))?;
        self.values = values;
        self.install(walkthrough);
        Ok(())
    }

    /// Show a different algorithm, generated from the stored inputs
    pub fn switch_algorithm(&mut self, algorithm: Algorithm) -> Result<(), GenerateError> {
        self.autoplay.stop();
        let walkthrough = match algorithm {
            Algorithm::Factors => {
                Walkthrough::factors(self.number, self.optimized, self.max_number)?
            }
            Algorithm::FindMax => Walkthrough::find_max(self.values.clone())?,
        };
        self.install(walkthrough);
        Ok(())
    }

    fn install(&mut self, walkthrough: Walkthrough) {
        info!(
            algorithm = %walkthrough.algorithm(),
            input = %walkthrough.input_label(),
            steps = walkthrough.cursor().len(),
            "walkthrough regenerated"
        );
        self.walkthrough = walkthrough;
    }
}
