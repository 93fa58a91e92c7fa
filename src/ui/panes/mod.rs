//! TUI pane rendering modules
//!
//! - [`source`]: code listing with syntax highlighting and the current lines marked
//! - [`visual`]: derived picture of the current step (factor chips, array cells)
//! - [`narration`]: step descriptions up to the cursor
//! - [`status`]: status bar with keybindings, playback state and input prompt
//!
//! Each module exports one `render_*` function that draws into a [`ratatui::Frame`].

pub mod narration;
pub mod source;
pub mod status;
pub mod visual;

pub use narration::render_narration_pane;
pub use source::render_source_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use visual::render_visual_pane;
