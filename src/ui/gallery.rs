/// Gallery grid
///
/// Search box and category pills on top, a wrapping grid of album tiles
/// and single-media tiles in the middle, direct-jump page buttons at the
/// bottom. Albums only appear as tiles when they hold at least two
/// visible items; everything else renders as an addressable single.
use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::state::albums::{Album, Grouped};
use crate::state::data::{MediaItem, MediaKind};
use crate::state::view::GalleryView;
use crate::Message;

const TILE_SIZE: f32 = 180.0;

/// Everything the grid needs for one frame.
pub struct GridContext<'a> {
    /// Grouping of the current page's items
    pub grouped: Grouped<'a>,
    pub page: usize,
    pub total_pages: usize,
    /// Size of the filtered list across all pages
    pub total_visible: usize,
    pub categories: &'a [String],
    pub view_model: &'a GalleryView,
    pub thumbnails: &'a HashMap<String, Handle>,
    pub loading: bool,
    pub busy: bool,
}

pub fn view(ctx: GridContext<'_>) -> Element<'_, Message> {
    let header = row![
        text("Gallery").size(28),
        iced::widget::text_input("Search by name...", &ctx.view_model.search)
            .on_input(Message::SearchChanged)
            .width(Length::Fixed(240.0)),
        button("Refresh").on_press(Message::Refresh),
        button("Add media").on_press_maybe((!ctx.busy).then_some(Message::OpenCreateForm)),
        button("Import folder").on_press_maybe((!ctx.busy).then_some(Message::ImportFolder)),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    let pills = category_pills(ctx.categories, ctx.view_model);

    let body: Element<'_, Message> = if ctx.loading && ctx.total_visible == 0 {
        text("Loading gallery...").size(16).into()
    } else if ctx.total_visible == 0 {
        text("No media matches the current filters.").size(16).into()
    } else {
        let mut tiles: Vec<Element<'_, Message>> = Vec::new();
        for album in &ctx.grouped.albums {
            tiles.push(album_tile(album));
        }
        for &item in &ctx.grouped.singles {
            tiles.push(single_tile(item, ctx.thumbnails));
        }

        scrollable(
            Wrap::with_elements(tiles)
                .spacing(12.0)
                .line_spacing(12.0),
        )
        .height(Length::Fill)
        .into()
    };

    let footer = row![
        text(format!(
            "{} item{} shown",
            ctx.total_visible,
            if ctx.total_visible == 1 { "" } else { "s" }
        ))
        .size(12),
        page_buttons(ctx.page, ctx.total_pages),
    ]
    .spacing(20)
    .align_y(Alignment::Center);

    container(
        column![header, pills, body, footer]
            .spacing(16)
            .padding(20),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

/// Toggleable category pills plus a clear-all shortcut.
fn category_pills<'a>(
    categories: &'a [String],
    view_model: &'a GalleryView,
) -> Element<'a, Message> {
    let mut pills = row![].spacing(8).align_y(Alignment::Center);

    for category in categories {
        let selected = view_model.filter.contains(category);
        let pill = button(text(category.as_str()).size(13))
            .style(if selected {
                button::primary
            } else {
                button::secondary
            })
            .on_press(Message::ToggleCategory(category.clone()));
        pills = pills.push(pill);
    }

    if view_model.filter.is_active() {
        pills = pills.push(
            button(text("Clear").size(13)).on_press(Message::ClearCategories),
        );
    }

    pills.into()
}

/// Tile for a multi-item album. Clicking opens the album detail view.
fn album_tile<'a>(album: &Album<'a>) -> Element<'a, Message> {
    let face = container(
        column![
            text(format!("{} items", album.items.len())).size(14),
            text(album.title).size(13),
        ]
        .spacing(6)
        .align_x(Alignment::Center),
    )
    .style(container::rounded_box)
    .center_x(Length::Fixed(TILE_SIZE))
    .center_y(Length::Fixed(TILE_SIZE));

    button(face)
        .style(button::text)
        .on_press(Message::OpenAlbum(album.title.to_string()))
        .into()
}

/// Tile for a single media item. Clicking opens the lightbox.
fn single_tile<'a>(
    item: &'a MediaItem,
    thumbnails: &HashMap<String, Handle>,
) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match item.kind {
        MediaKind::Image => match thumbnails.get(&item.id) {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fixed(TILE_SIZE))
                .height(Length::Fixed(TILE_SIZE))
                .into(),
            None => placeholder("..."),
        },
        MediaKind::Video => placeholder("Video"),
    };

    let label = if item.name.is_empty() {
        &item.file
    } else {
        &item.name
    };

    button(
        column![preview, text(label.as_str()).size(12)]
            .spacing(4)
            .align_x(Alignment::Center),
    )
    .style(button::text)
    .on_press(Message::OpenMedia(item.id.clone()))
    .into()
}

fn placeholder<'a>(label: &'a str) -> Element<'a, Message> {
    container(text(label).size(14))
        .style(container::rounded_box)
        .center_x(Length::Fixed(TILE_SIZE))
        .center_y(Length::Fixed(TILE_SIZE))
        .into()
}

/// Direct-jump page buttons; the current page renders disabled.
fn page_buttons<'a>(current: usize, total_pages: usize) -> Element<'a, Message> {
    let mut buttons = row![].spacing(6);

    for page in 1..=total_pages {
        buttons = buttons.push(
            button(text(page.to_string()).size(13))
                .style(if page == current {
                    button::primary
                } else {
                    button::secondary
                })
                .on_press_maybe((page != current).then_some(Message::GoToPage(page))),
        );
    }

    buttons.into()
}
