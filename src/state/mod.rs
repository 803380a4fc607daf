//! State management module
//!
//! This module holds all application state:
//! - The gallery controller and its view-state machine (gallery.rs)
//! - The scroll lock held by the full-screen preview (scroll_lock.rs)

pub mod gallery;
pub mod scroll_lock;
