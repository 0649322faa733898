/// Album detail view and full-screen lightbox
///
/// Both render as modal overlays above the grid. The album view lists its
/// members as tiles; the lightbox shows one item with clamped prev/next
/// navigation, a position counter and the edit/delete actions. Keyboard
/// handling lives in the application subscription, not here.
use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::state::albums::Album;
use crate::state::data::{MediaItem, MediaKind};
use crate::{DeleteTarget, Message};

const MEMBER_TILE: f32 = 140.0;
const LIGHTBOX_SIZE: f32 = 520.0;

/// The open-album overlay: member tiles plus the album-wide actions.
pub fn album_view<'a>(
    album: &Album<'a>,
    thumbnails: &HashMap<String, Handle>,
    busy: bool,
) -> Element<'a, Message> {
    let mut tiles: Vec<Element<'a, Message>> = Vec::new();
    for (index, item) in album.items.iter().copied().enumerate() {
        tiles.push(member_tile(item, index, thumbnails));
    }

    let actions = row![
        button("Delete album")
            .style(button::danger)
            .on_press_maybe((!busy).then_some(Message::RequestDeleteAlbum)),
        button("Close").on_press(Message::CloseOverlay),
    ]
    .spacing(10);

    container(
        column![
            text(album.title).size(24),
            text(format!("{} items", album.items.len())).size(13),
            Wrap::with_elements(tiles).spacing(10.0).line_spacing(10.0),
            actions,
        ]
        .spacing(14),
    )
    .style(container::rounded_box)
    .padding(20)
    .max_width(640)
    .into()
}

fn member_tile<'a>(
    item: &'a MediaItem,
    index: usize,
    thumbnails: &HashMap<String, Handle>,
) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match item.kind {
        MediaKind::Image => match thumbnails.get(&item.id) {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fixed(MEMBER_TILE))
                .height(Length::Fixed(MEMBER_TILE))
                .into(),
            None => boxed_label("..."),
        },
        MediaKind::Video => boxed_label("Video"),
    };

    button(preview)
        .style(button::text)
        .on_press(Message::OpenAlbumItem(index))
        .into()
}

/// The full-screen item viewer.
pub fn item_view<'a>(
    item: &'a MediaItem,
    index: usize,
    len: usize,
    thumbnails: &HashMap<String, Handle>,
    busy: bool,
) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match item.kind {
        MediaKind::Image => match thumbnails.get(&item.id) {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fixed(LIGHTBOX_SIZE))
                .into(),
            None => boxed_label("Loading preview..."),
        },
        MediaKind::Video => boxed_label("Video - preview not available"),
    };

    let caption = if item.name.is_empty() {
        item.file.as_str()
    } else {
        item.name.as_str()
    };

    let nav = row![
        button("<").on_press_maybe((index > 0).then_some(Message::PrevItem)),
        text(format!("{} / {}", index + 1, len)).size(14),
        button(">").on_press_maybe((index + 1 < len).then_some(Message::NextItem)),
    ]
    .spacing(14)
    .align_y(Alignment::Center);

    let actions = row![
        button("Edit").on_press_maybe((!busy).then_some(Message::OpenEditForm)),
        button("Delete")
            .style(button::danger)
            .on_press_maybe((!busy).then_some(Message::RequestDeleteItem)),
        button("Close").on_press(Message::CloseOverlay),
    ]
    .spacing(10);

    container(
        column![preview, text(caption).size(16), nav, actions]
            .spacing(14)
            .align_x(Alignment::Center),
    )
    .style(container::rounded_box)
    .padding(20)
    .into()
}

/// Confirmation step in front of every destructive action.
pub fn confirm_view(target: &DeleteTarget, busy: bool) -> Element<'_, Message> {
    let prompt = match target {
        DeleteTarget::Item { .. } => "Delete this media item? This cannot be undone.".to_string(),
        DeleteTarget::Album { title, ids } => format!(
            "Delete the album \"{title}\" and all {} items in it? This cannot be undone.",
            ids.len()
        ),
    };

    let actions = row![
        button(if busy { "Deleting..." } else { "Delete" })
            .style(button::danger)
            .on_press_maybe((!busy).then_some(Message::ConfirmDelete)),
        button("Cancel").on_press_maybe((!busy).then_some(Message::CancelDelete)),
    ]
    .spacing(10);

    container(column![text(prompt).size(16), actions].spacing(14))
        .style(container::rounded_box)
        .padding(20)
        .max_width(420)
        .into()
}

fn boxed_label<'a>(label: &'a str) -> Element<'a, Message> {
    container(text(label).size(14))
        .style(container::rounded_box)
        .center_x(Length::Fixed(MEMBER_TILE))
        .center_y(Length::Fixed(MEMBER_TILE))
        .into()
}
