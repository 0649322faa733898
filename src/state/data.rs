/// Shared data structures for the application state
///
/// These structs represent the media records that flow between
/// the API layer and the UI layer. Classification happens once,
/// when a record is ingested; the rest of the app only ever
/// matches on the resulting variants.
use chrono::NaiveDate;

/// File extensions treated as images (lowercase, no dot)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];

/// File extensions treated as videos (lowercase, no dot)
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "avi", "mkv", "m4v"];

/// Media classification, decided once at ingestion.
///
/// The renderer and preview pipeline dispatch on this variant instead of
/// re-matching file extensions at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a file by its extension. Returns `None` for anything that
    /// is not a recognized media extension.
    pub fn from_extension(file: &str) -> Option<Self> {
        let ext = std::path::Path::new(file)
            .extension()?
            .to_string_lossy()
            .to_lowercase();

        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// Resolve the kind from the backend's `fileType` field, falling back to
    /// the file extension when the field is missing or unrecognized.
    ///
    /// Unknown extensions degrade to `Image`: the image tile is the
    /// fallback renderer for anything the server accepted.
    pub fn from_file_type(file_type: Option<&str>, file: &str) -> Self {
        match file_type.map(str::to_lowercase).as_deref() {
            Some("image") => MediaKind::Image,
            Some("video") => MediaKind::Video,
            _ => Self::from_extension(file).unwrap_or(MediaKind::Image),
        }
    }
}

/// Album membership key for a media item.
///
/// An explicit variant instead of a nullable string, so "no album" can
/// never collide with an album that happens to share a sentinel name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupKey {
    /// The item does not belong to any album.
    #[default]
    None,
    /// The item belongs to the album with this exact title.
    Named(String),
}

impl GroupKey {
    /// Build a key from the backend's nullable `albumTitle` field.
    /// Empty and whitespace-only titles count as "no album".
    pub fn from_title(title: Option<String>) -> Self {
        match title {
            Some(t) if !t.trim().is_empty() => GroupKey::Named(t),
            _ => GroupKey::None,
        }
    }

    /// The album title, if the item belongs to one.
    pub fn name(&self) -> Option<&str> {
        match self {
            GroupKey::None => None,
            GroupKey::Named(title) => Some(title),
        }
    }
}

/// Represents a single media record in the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    /// Opaque unique identifier assigned by the backend
    pub id: String,
    /// Display label (may be empty)
    pub name: String,
    /// Reference to the stored binary content (path or URL)
    pub file: String,
    /// Image or video, derived once at ingestion
    pub kind: MediaKind,
    /// Optional calendar date attached to the record
    pub date: Option<NaiveDate>,
    /// Optional classification tag used by the category filter
    pub category: Option<String>,
    /// Album membership key
    pub album: GroupKey,
    /// Free-text labels, possibly empty
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_extension_recognizes_images_and_videos() {
        assert_eq!(MediaKind::from_extension("trip/01.JPG"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_extension("clip.webm"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_extension("notes.txt"), None);
        assert_eq!(MediaKind::from_extension("no_extension"), None);
    }

    #[test]
    fn kind_prefers_server_file_type_over_extension() {
        // The backend's classification wins even when the extension disagrees
        assert_eq!(
            MediaKind::from_file_type(Some("video"), "thumb.jpg"),
            MediaKind::Video
        );
        assert_eq!(
            MediaKind::from_file_type(Some("Image"), "clip.mp4"),
            MediaKind::Image
        );
    }

    #[test]
    fn kind_falls_back_to_extension_then_image() {
        assert_eq!(
            MediaKind::from_file_type(None, "photo.png"),
            MediaKind::Image
        );
        assert_eq!(
            MediaKind::from_file_type(Some("garbage"), "clip.mov"),
            MediaKind::Video
        );
        // Unknown everywhere degrades to the image tile
        assert_eq!(MediaKind::from_file_type(None, "blob.bin"), MediaKind::Image);
    }

    #[test]
    fn group_key_treats_blank_titles_as_none() {
        assert_eq!(GroupKey::from_title(None), GroupKey::None);
        assert_eq!(GroupKey::from_title(Some(String::new())), GroupKey::None);
        assert_eq!(GroupKey::from_title(Some("   ".into())), GroupKey::None);
        assert_eq!(
            GroupKey::from_title(Some("Trip".into())),
            GroupKey::Named("Trip".into())
        );
    }

    #[test]
    fn group_key_name_exposes_title() {
        assert_eq!(GroupKey::None.name(), None);
        assert_eq!(GroupKey::Named("Arts".into()).name(), Some("Arts"));
    }
}
