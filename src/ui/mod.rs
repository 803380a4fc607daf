//! View functions
//!
//! - Header, state panels, results grid and footer (gallery.rs)
//! - Full-screen photo preview overlay (preview.rs)

use iced::Color;

pub mod gallery;
pub mod preview;

/// Brand red used for the title, counters and the error border
pub const ACCENT: Color = Color::from_rgb(0.94, 0.27, 0.27);
/// Secondary text
pub const MUTED: Color = Color::from_rgb(0.61, 0.64, 0.69);
