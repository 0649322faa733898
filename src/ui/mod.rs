/// UI building blocks
///
/// This module holds the view functions for every surface of the app:
/// - The gallery grid with pills and pagination (gallery.rs)
/// - Album detail and lightbox overlays (viewer.rs)
/// - The add/edit form modal (forms.rs)
/// - Toast notifications (toast.rs)

pub mod forms;
pub mod gallery;
pub mod toast;
pub mod viewer;

use iced::widget::{center, mouse_area, opaque, stack};
use iced::Element;

use crate::Message;

/// Layer `content` centered above `base`, dimming nothing but swallowing
/// interaction with the layer below. A click on the backdrop emits
/// `on_blur`.
pub fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(mouse_area(center(opaque(content))).on_press(on_blur))
    ]
    .into()
}
