use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::unsplash::models::DEFAULT_FILE_STEM;
use crate::unsplash::{ApiError, SharedSource};

/// Downloads are always saved with this extension
pub const FILE_EXTENSION: &str = "jpg";

/// Longest file stem we write, in characters
const MAX_STEM_CHARS: usize = 100;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Failed to fetch image: {0}")]
    Fetch(#[from] ApiError),
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// File name for a download: the suggested stem (or "imagem") plus `.jpg`.
///
/// Characters that are not allowed in file names are replaced with `_`.
pub fn file_name(stem: &str) -> String {
    let cleaned: String = stem
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .take(MAX_STEM_CHARS)
        .collect();

    let stem = cleaned.trim_matches('.').trim();
    let stem = if stem.is_empty() { DEFAULT_FILE_STEM } else { stem };
    format!("{}.{}", stem, FILE_EXTENSION)
}

/// Fetch `url` and save it.
///
/// With `dir` set the file goes straight there; otherwise a save dialog asks
/// for the destination. Returns `Ok(None)` when the dialog was cancelled.
pub async fn download(
    source: SharedSource,
    url: String,
    stem: String,
    dir: Option<PathBuf>,
) -> Result<Option<PathBuf>, DownloadError> {
    let bytes = source.fetch(&url).await?;
    let name = file_name(&stem);
    debug!("Downloaded {} bytes for {}", bytes.len(), name);

    let target = match dir {
        Some(dir) => dir.join(&name),
        None => match pick_destination(&name).await {
            Some(path) => path,
            None => {
                info!("Download of {} cancelled", name);
                return Ok(None);
            }
        },
    };

    save(&target, &bytes).await?;
    info!("💾 Saved {} ({} bytes)", target.display(), bytes.len());
    Ok(Some(target))
}

/// Ask the user where to save, starting in their downloads folder
async fn pick_destination(name: &str) -> Option<PathBuf> {
    let mut dialog = rfd::AsyncFileDialog::new()
        .set_title("Salvar imagem")
        .set_file_name(name);

    if let Some(dir) = dirs::download_dir() {
        dialog = dialog.set_directory(dir);
    }

    dialog
        .save_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

/// Write bytes to `path`, creating parent directories as needed
pub async fn save(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unsplash::fake::FakeSource;
    use std::sync::Arc;

    #[test]
    fn test_file_name_uses_stem() {
        assert_eq!(file_name("snow covered mountain"), "snow covered mountain.jpg");
        assert_eq!(file_name("eOLpJytrbsQ"), "eOLpJytrbsQ.jpg");
    }

    #[test]
    fn test_file_name_fallback() {
        assert_eq!(file_name(""), "imagem.jpg");
        assert_eq!(file_name("   "), "imagem.jpg");
        assert_eq!(file_name(".."), "imagem.jpg");
    }

    #[test]
    fn test_file_name_strips_separators() {
        assert_eq!(file_name("city/night: lights?"), "city_night_ lights_.jpg");
    }

    #[test]
    fn test_file_name_is_bounded() {
        let long = "a".repeat(500);
        assert_eq!(file_name(&long).len(), MAX_STEM_CHARS + ".jpg".len());
    }

    #[tokio::test]
    async fn test_download_to_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(FakeSource::default().with_file("https://img/full", b"jpeg bytes"));

        let saved = download(
            source,
            "https://img/full".to_string(),
            "red car".to_string(),
            Some(dir.path().join("shots")),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(saved, dir.path().join("shots").join("red car.jpg"));
        assert_eq!(std::fs::read(&saved).unwrap(), b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_failed_fetch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(FakeSource::default());

        let err = download(
            source,
            "https://img/missing".to_string(),
            "x".to_string(),
            Some(dir.path().to_path_buf()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DownloadError::Fetch(_)));
        assert!(!dir.path().join("x.jpg").exists());
    }
}
