/// Add/edit media form modal
///
/// One form backs both flows: create (file pick + metadata, multipart
/// POST) and edit (metadata only, PUT). Validation happens on submit and
/// reports a single inline error line, like the form modals of the CMS.
use std::path::PathBuf;

use chrono::NaiveDate;
use iced::widget::{button, column, container, pick_list, row, text, text_input};
use iced::{Alignment, Element};

use crate::api::dto::MediaUpload;
use crate::state::data::MediaItem;
use crate::Message;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Editable state behind the modal. Free-text everywhere; parsing and
/// validation only happen when the user submits.
#[derive(Debug, Clone, Default)]
pub struct MediaForm {
    /// `Some` when editing an existing record, `None` when creating
    pub id: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub album_title: String,
    /// Comma-separated tag input
    pub tags: String,
    /// Date input, YYYY-MM-DD or empty
    pub date: String,
    /// File to upload (create only)
    pub file: Option<PathBuf>,
    /// Last validation failure, shown inline
    pub error: Option<String>,
}

impl MediaForm {
    /// Blank form for a new upload.
    pub fn create() -> Self {
        Self::default()
    }

    /// Form prefilled from an existing record.
    pub fn edit(item: &MediaItem) -> Self {
        Self {
            id: Some(item.id.clone()),
            name: item.name.clone(),
            category: item.category.clone(),
            album_title: item.album.name().unwrap_or_default().to_string(),
            tags: item.tags.join(", "),
            date: item
                .date
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            file: None,
            error: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Validate the inputs and build the upload payload.
    pub fn to_upload(&self) -> Result<MediaUpload, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required.".to_string());
        }

        if !self.is_edit() && self.file.is_none() {
            return Err("Choose a file to upload.".to_string());
        }

        let date = match self.date.trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .map_err(|_| "Date must look like 2026-03-14.".to_string())?,
            ),
        };

        let album_title = self.album_title.trim();
        let tags: Vec<String> = self
            .tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        Ok(MediaUpload {
            name: name.to_string(),
            date,
            category_title: self.category.clone(),
            album_title: (!album_title.is_empty()).then(|| album_title.to_string()),
            tags,
        })
    }
}

/// Render the modal body.
pub fn view<'a>(
    form: &'a MediaForm,
    categories: &'a [String],
    busy: bool,
) -> Element<'a, Message> {
    let title = if form.is_edit() {
        "Edit media"
    } else {
        "Add media"
    };

    let file_row: Element<'a, Message> = if form.is_edit() {
        // The stored file cannot be swapped from the edit flow
        text("Metadata only; the file itself stays as uploaded.")
            .size(12)
            .into()
    } else {
        let picked = form
            .file
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "No file selected".to_string());

        row![
            button("Choose file...").on_press(Message::FormPickFile),
            text(picked).size(12),
        ]
        .spacing(10)
        .align_y(Alignment::Center)
        .into()
    };

    let mut fields = column![
        text(title).size(24),
        text_input("Name", &form.name).on_input(Message::FormNameChanged),
        pick_list(
            categories,
            form.category.clone(),
            Message::FormCategoryPicked
        )
        .placeholder("Category (optional)"),
        text_input("Album title (optional)", &form.album_title)
            .on_input(Message::FormAlbumChanged),
        text_input("Tags, comma separated", &form.tags).on_input(Message::FormTagsChanged),
        text_input("Date (YYYY-MM-DD, optional)", &form.date)
            .on_input(Message::FormDateChanged),
        file_row,
    ]
    .spacing(12);

    if let Some(error) = &form.error {
        fields = fields.push(text(error).size(14).style(text::danger));
    }

    let submit_label = if form.is_edit() { "Save" } else { "Upload" };
    let actions = row![
        button(if busy { "Submitting..." } else { submit_label })
            .on_press_maybe((!busy).then_some(Message::FormSubmit)),
        button("Cancel").on_press_maybe((!busy).then_some(Message::FormCancel)),
    ]
    .spacing(10);

    container(fields.push(actions))
        .style(container::rounded_box)
        .padding(20)
        .max_width(420)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{GroupKey, MediaKind};

    fn form() -> MediaForm {
        MediaForm {
            name: "Sports day".into(),
            file: Some(PathBuf::from("/tmp/field.jpg")),
            ..MediaForm::create()
        }
    }

    #[test]
    fn a_valid_create_form_builds_an_upload() {
        let mut form = form();
        form.category = Some("Sports".into());
        form.tags = "field, students,".into();
        form.date = "2026-03-14".into();

        let upload = form.to_upload().unwrap();
        assert_eq!(upload.name, "Sports day");
        assert_eq!(upload.category_title.as_deref(), Some("Sports"));
        assert_eq!(upload.tags, vec!["field", "students"]);
        assert_eq!(upload.date, NaiveDate::from_ymd_opt(2026, 3, 14));
        assert_eq!(upload.album_title, None);
    }

    #[test]
    fn name_is_required() {
        let mut form = form();
        form.name = "   ".into();
        assert!(form.to_upload().is_err());
    }

    #[test]
    fn create_requires_a_file_but_edit_does_not() {
        let mut form = form();
        form.file = None;
        assert!(form.to_upload().is_err());

        form.id = Some("64af3".into());
        assert!(form.to_upload().is_ok());
    }

    #[test]
    fn a_malformed_date_is_rejected() {
        let mut form = form();
        form.date = "14/03/2026".into();
        let error = form.to_upload().unwrap_err();
        assert!(error.contains("2026-03-14"));
    }

    #[test]
    fn edit_prefills_from_the_record() {
        let item = MediaItem {
            id: "64af3".into(),
            name: "Art week".into(),
            file: "uploads/art.jpg".into(),
            kind: MediaKind::Image,
            date: NaiveDate::from_ymd_opt(2026, 5, 2),
            category: Some("Arts".into()),
            album: GroupKey::Named("Art Week".into()),
            tags: vec!["gallery".into(), "paint".into()],
        };

        let form = MediaForm::edit(&item);
        assert!(form.is_edit());
        assert_eq!(form.name, "Art week");
        assert_eq!(form.album_title, "Art Week");
        assert_eq!(form.tags, "gallery, paint");
        assert_eq!(form.date, "2026-05-02");
        assert!(form.file.is_none());
    }
}
