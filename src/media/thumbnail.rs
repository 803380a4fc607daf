use image::imageops::FilterType;
use thiserror::Error;
use tracing::warn;

use crate::unsplash::SharedSource;

/// Bounding box for grid thumbnails (square)
pub const THUMBNAIL_SIZE: u32 = 400;

/// Bounding box for the full-screen preview
pub const PREVIEW_SIZE: u32 = 1600;

/// Bounding box for the photographer's avatar
pub const AVATAR_SIZE: u32 = 64;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Task join error: {0}")]
    Join(String),
}

/// Decoded RGBA pixels ready for an iced image handle
#[derive(Debug, Clone)]
pub struct Decoded {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Decoded {
    pub fn into_handle(self) -> iced::widget::image::Handle {
        iced::widget::image::Handle::from_rgba(self.width, self.height, self.pixels)
    }
}

/// Decode fetched image bytes off the UI thread, shrinking to fit `max_size`
pub async fn decode(bytes: Vec<u8>, max_size: u32) -> Result<Decoded, DecodeError> {
    // Spawn blocking task for CPU-bound work
    tokio::task::spawn_blocking(move || decode_blocking(&bytes, max_size))
        .await
        .map_err(|e| DecodeError::Join(e.to_string()))?
}

/// Fetch an image and decode it into a handle bounded by `max_size`.
///
/// Errors are logged here and flattened to a string for the UI message.
pub async fn load(
    source: SharedSource,
    url: String,
    max_size: u32,
) -> Result<iced::widget::image::Handle, String> {
    let bytes = source.fetch(&url).await.map_err(|e| {
        warn!("Failed to fetch {}: {}", url, e);
        e.to_string()
    })?;

    let decoded = decode(bytes, max_size).await.map_err(|e| {
        warn!("Failed to decode {}: {}", url, e);
        e.to_string()
    })?;

    Ok(decoded.into_handle())
}

/// Blocking version of [`decode`]
fn decode_blocking(bytes: &[u8], max_size: u32) -> Result<Decoded, DecodeError> {
    let img = image::load_from_memory(bytes)?;

    // Only ever shrink; `resize` keeps the aspect ratio
    let img = if img.width() > max_size || img.height() > max_size {
        img.resize(max_size, max_size, FilterType::Triangle)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok(Decoded {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}
