//! # Introduction
//!
//! stepviz generates narrated, step-by-step walkthroughs of small algorithms
//! and plays them back in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Input → Validation → Generator → Step records → Timeline + cursor → TUI
//! ```
//!
//! 1. [`steps`]: pure generators: the factor finder (optimized or naive) and
//!    the find-max scan. Each returns the whole walkthrough up front or fails
//!    with [`steps::GenerateError::InvalidInput`] before emitting anything.
//! 2. [`playback`]: a [`playback::Timeline`] cursor over the records, a
//!    cancellable [`playback::Autoplay`] ticker and the
//!    [`playback::session::Session`] that regenerates on input changes.
//! 3. [`listing`]: fixed JavaScript and Python listings with per-stage line
//!    highlights.
//! 4. [`cli`]: command-line and environment configuration.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.

pub mod cli;
pub mod listing;
pub mod playback;
pub mod steps;
pub mod ui;
