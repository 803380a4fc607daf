//! Image bytes in and out
//!
//! This module handles:
//! - Decoding fetched photos into thumbnails and previews
//! - Saving full-resolution downloads to disk

pub mod download;
pub mod thumbnail;
