//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, input mode
//! - **[`panes`]**: render functions for each visible pane (listing, visual,
//!   narration, status bar)
//! - **[`theme`]**: light and dark color palettes used by all panes
//!
//! Construct an [`App`] from a [`Session`] and call [`App::run`] to start the
//! event loop.
//!
//! [`Session`]: crate::playback::session::Session
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
