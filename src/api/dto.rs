/// Wire types for the gallery REST backend
///
/// The backend speaks camelCase JSON. Records are converted into domain
/// types exactly once, at ingestion: the media kind and the album group
/// key are decided here and nowhere else.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::state::data::{GroupKey, MediaItem, MediaKind};

/// One gallery record as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItemDto {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub file: String,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub category_title: Option<String>,
    #[serde(default)]
    pub album_title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<MediaItemDto> for MediaItem {
    fn from(dto: MediaItemDto) -> Self {
        let kind = MediaKind::from_file_type(dto.file_type.as_deref(), &dto.file);
        MediaItem {
            id: dto.id,
            name: dto.name,
            file: dto.file,
            kind,
            date: dto.date,
            category: dto.category_title.filter(|c| !c.trim().is_empty()),
            album: GroupKey::from_title(dto.album_title),
            tags: dto.tags,
        }
    }
}

/// One category record; soft-deleted entries are dropped client-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub title: String,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Envelope returned by every mutating endpoint. The caller checks
/// `success` before declaring the action complete.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Metadata sent with create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUpload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_title: Option<String>,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_record() {
        let json = r#"{
            "id": "64af3",
            "name": "Sports day",
            "file": "uploads/sports-day.jpg",
            "fileType": "image",
            "date": "2026-03-14",
            "categoryTitle": "Sports",
            "albumTitle": "Sports Day 2026",
            "tags": ["field", "students"]
        }"#;

        let item: MediaItem = serde_json::from_str::<MediaItemDto>(json).unwrap().into();
        assert_eq!(item.id, "64af3");
        assert_eq!(item.kind, MediaKind::Image);
        assert_eq!(item.date, NaiveDate::from_ymd_opt(2026, 3, 14));
        assert_eq!(item.category.as_deref(), Some("Sports"));
        assert_eq!(item.album, GroupKey::Named("Sports Day 2026".into()));
        assert_eq!(item.tags, vec!["field", "students"]);
    }

    #[test]
    fn missing_optionals_degrade_to_a_single() {
        let json = r#"{ "id": "7", "file": "clip.mp4" }"#;

        let item: MediaItem = serde_json::from_str::<MediaItemDto>(json).unwrap().into();
        assert_eq!(item.name, "");
        assert_eq!(item.kind, MediaKind::Video);
        assert_eq!(item.date, None);
        assert_eq!(item.category, None);
        assert_eq!(item.album, GroupKey::None);
        assert!(item.tags.is_empty());
    }

    #[test]
    fn null_album_title_maps_to_no_group() {
        let json = r#"{ "id": "8", "file": "a.png", "albumTitle": null, "categoryTitle": "" }"#;

        let item: MediaItem = serde_json::from_str::<MediaItemDto>(json).unwrap().into();
        assert_eq!(item.album, GroupKey::None);
        assert_eq!(item.category, None);
    }

    #[test]
    fn category_carries_its_deletion_flag() {
        let json = r#"[
            { "title": "Sports", "isDeleted": false },
            { "title": "Old news", "isDeleted": true },
            { "title": "Arts" }
        ]"#;

        let categories: Vec<CategoryDto> = serde_json::from_str(json).unwrap();
        let live: Vec<&str> = categories
            .iter()
            .filter(|c| !c.is_deleted)
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(live, vec!["Sports", "Arts"]);
    }

    #[test]
    fn mutation_envelope_defaults_to_failure() {
        let response: MutationResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.success);
        assert_eq!(response.message, None);

        let response: MutationResponse =
            serde_json::from_str(r#"{ "success": true, "message": "Saved" }"#).unwrap();
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("Saved"));
    }

    #[test]
    fn upload_serializes_camel_case_and_skips_empty_options() {
        let upload = MediaUpload {
            name: "Art week".into(),
            date: None,
            category_title: Some("Arts".into()),
            album_title: None,
            tags: vec!["gallery".into()],
        };

        let json = serde_json::to_value(&upload).unwrap();
        assert_eq!(json["name"], "Art week");
        assert_eq!(json["categoryTitle"], "Arts");
        assert!(json.get("date").is_none());
        assert!(json.get("albumTitle").is_none());
    }
}
