/// Preview thumbnail pipeline
///
/// Grid tiles show a downscaled copy of each image. Fetched bytes are
/// decoded, resized to a fixed tier and cached as JPEGs on disk, so a
/// media item only hits the network once per machine. Video records never
/// enter this pipeline; they render as a static placeholder tile.
use std::fs;
use std::path::{Path, PathBuf};

use iced::widget::image::Handle;
use image::imageops::FilterType;
use tracing::warn;

use crate::api::{ApiError, GalleryApi};

/// Size of generated thumbnails (square bounding box)
const THUMBNAIL_SIZE: u32 = 256;

/// Get the thumbnail cache directory
/// Returns ~/.cache/gallery-admin/previews on Linux
pub fn cache_dir() -> PathBuf {
    let mut path = dirs_next::cache_dir()
        .or_else(dirs_next::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    path.push("gallery-admin");
    path.push("previews");

    if let Err(error) = fs::create_dir_all(&path) {
        warn!("could not create thumbnail cache {}: {error}", path.display());
    }

    path
}

/// Cache location for a media id (ids are opaque strings, so anything
/// outside [A-Za-z0-9._-] is mapped away before touching the filesystem).
pub fn cached_path(id: &str) -> PathBuf {
    let safe: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    cache_dir().join(format!("{safe}.jpg"))
}

/// Load the thumbnail for one media item: disk cache first, then fetch,
/// decode, downscale and cache.
pub async fn load(api: GalleryApi, id: String, file: String) -> Result<Handle, ApiError> {
    let target = cached_path(&id);
    if tokio::fs::try_exists(&target).await.unwrap_or(false) {
        return Ok(Handle::from_path(target));
    }

    let bytes = api.fetch_preview(&file).await?;

    // Decode + resize is CPU work, keep it off the UI runtime
    let path = tokio::task::spawn_blocking(move || write_thumbnail(&bytes, &target))
        .await
        .map_err(|error| ApiError::Decode(format!("task join error: {error}")))??;

    Ok(Handle::from_path(path))
}

/// Decode raw preview bytes, downscale and store as JPEG.
fn write_thumbnail(bytes: &[u8], target: &Path) -> Result<PathBuf, ApiError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|error| ApiError::Decode(format!("preview decode: {error}")))?;

    let thumbnail = decoded.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3);

    // JPEG has no alpha channel; flatten before saving
    thumbnail
        .to_rgb8()
        .save(target)
        .map_err(|error| ApiError::Decode(format!("thumbnail save: {error}")))?;

    Ok(target.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_path_sanitizes_opaque_ids() {
        let path = cached_path("a/b:c 1");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(name, "a_b_c_1.jpg");
    }

    #[test]
    fn cached_path_keeps_plain_ids() {
        let path = cached_path("64af3-cover.v2");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(name, "64af3-cover.v2.jpg");
    }
}
