//! Playback over a generated walkthrough
//!
//! A walkthrough is generated once and never mutated; playback only moves a
//! cursor over it.
//!
//! - [`Cursor`]: index navigation shared by every timeline
//! - [`Timeline`]: owns a step list plus the cursor position
//! - [`Autoplay`]: fixed-interval ticker polled from the event loop
//! - [`session`]: the active walkthrough, regenerated on input changes

pub mod session;

use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Errors from moving the playback cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackError {
    /// The timeline holds no steps
    Empty,
    /// Already at the first step
    AtStart,
    /// Already at the last step
    AtEnd,
    /// Requested position is past the last step
    OutOfRange { position: usize, len: usize },
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::Empty => write!(f, "No steps available"),
            PlaybackError::AtStart => write!(f, "Already at the first step"),
            PlaybackError::AtEnd => write!(f, "Already at the last step"),
            PlaybackError::OutOfRange { position, len } => {
                write!(f, "Step {} is out of range for {} steps", position, len)
            }
        }
    }
}

impl std::error::Error for PlaybackError {}

/// Index navigation over an ordered list of steps
pub trait Cursor {
    fn position(&self) -> usize;

    fn len(&self) -> usize;

    /// Move directly to `position`
    fn seek(&mut self, position: usize) -> Result<(), PlaybackError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_at_start(&self) -> bool {
        self.position() == 0
    }

    fn is_at_end(&self) -> bool {
        self.position() + 1 >= self.len()
    }

    fn step_forward(&mut self) -> Result<(), PlaybackError> {
        if self.is_empty() {
            return Err(PlaybackError::Empty);
        }
        if self.is_at_end() {
            return Err(PlaybackError::AtEnd);
        }
        self.seek(self.position() + 1)
    }

    fn step_backward(&mut self) -> Result<(), PlaybackError> {
        if self.is_empty() {
            return Err(PlaybackError::Empty);
        }
        if self.is_at_start() {
            return Err(PlaybackError::AtStart);
        }
        self.seek(self.position() - 1)
    }

    fn rewind_to_start(&mut self) -> Result<(), PlaybackError> {
        if self.is_empty() {
            return Err(PlaybackError::Empty);
        }
        self.seek(0)
    }

    fn jump_to_end(&mut self) -> Result<(), PlaybackError> {
        if self.is_empty() {
            return Err(PlaybackError::Empty);
        }
        self.seek(self.len() - 1)
    }
}

/// A read-only step list with a playback position
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    steps: Vec<T>,
    position: usize,
}

impl<T> Timeline<T> {
    pub fn new(steps: Vec<T>) -> Self {
        Timeline { steps, position: 0 }
    }

    /// The step under the cursor
    pub fn current(&self) -> Option<&T> {
        self.steps.get(self.position)
    }

    pub fn steps(&self) -> &[T] {
        &self.steps
    }
}

impl<T> Cursor for Timeline<T> {
    fn position(&self) -> usize {
        self.position
    }

    fn len(&self) -> usize {
        self.steps.len()
    }

    fn seek(&mut self, position: usize) -> Result<(), PlaybackError> {
        if self.steps.is_empty() {
            return Err(PlaybackError::Empty);
        }
        if position >= self.steps.len() {
            return Err(PlaybackError::OutOfRange {
                position,
                len: self.steps.len(),
            });
        }
        self.position = position;
        Ok(())
    }
}

/// Outcome of polling the autoplay ticker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not playing, or the interval has not elapsed yet
    Idle,
    /// The cursor moved forward one step
    Advanced,
    /// The cursor reached the last step and playback stopped
    Finished,
}

/// Fixed-interval ticker that advances a cursor while playing.
///
/// Time is supplied by the caller, so the event loop passes `Instant::now()`
/// and tests pass synthetic instants. At most one pending tick exists:
/// [`Autoplay::start`] and [`Autoplay::stop`] both drop any tick already
/// scheduled.
#[derive(Debug, Clone)]
pub struct Autoplay {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl Autoplay {
    pub fn new(interval: Duration) -> Self {
        Autoplay {
            interval,
            next_tick: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Start playing; the first step lands one interval after `now`
    pub fn start(&mut self, now: Instant) {
        if self.next_tick.is_some() {
            debug!("replacing pending autoplay tick");
        }
        self.next_tick = Some(now + self.interval);
    }

    /// Stop playing and drop the pending tick
    pub fn stop(&mut self) {
        if self.next_tick.take().is_some() {
            debug!("autoplay stopped");
        }
    }

    /// Toggle between playing and paused
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.is_playing() {
            self.stop();
        } else {
            self.start(now);
        }
        self.is_playing()
    }

    /// Advance `cursor` by one step if the pending tick is due
    pub fn poll(&mut self, now: Instant, cursor: &mut dyn Cursor) -> Tick {
        let Some(due) = self.next_tick else {
            return Tick::Idle;
        };
        if now < due {
            return Tick::Idle;
        }

        match cursor.step_forward() {
            Ok(()) => {
                trace!(position = cursor.position(), "autoplay tick");
                if cursor.is_at_end() {
                    self.next_tick = None;
                    Tick::Finished
                } else {
                    self.next_tick = Some(now + self.interval);
                    Tick::Advanced
                }
            }
            Err(_) => {
                self.next_tick = None;
                Tick::Finished
            }
        }
    }
}
