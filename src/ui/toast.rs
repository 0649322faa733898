/// Toast notifications
///
/// Every completed mutation and every surfaced failure lands here. Toasts
/// stack in the corner, auto-dismiss after a few seconds (the timer task
/// lives in the update loop) and can be clicked away early.
use std::time::Duration;

use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use crate::Message;

/// How long a toast stays up before the expiry task fires
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: usize,
    pub kind: ToastKind,
    pub message: String,
}

/// The active toast stack. Ids are handed out once and never reused, so a
/// stale expiry task cannot dismiss a newer toast.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    next_id: usize,
    entries: Vec<Toast>,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) -> usize {
        self.push(ToastKind::Success, message.into())
    }

    pub fn error(&mut self, message: impl Into<String>) -> usize {
        self.push(ToastKind::Error, message.into())
    }

    fn push(&mut self, kind: ToastKind, message: String) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Toast { id, kind, message });
        id
    }

    /// Remove a toast by id; unknown ids are ignored (already dismissed).
    pub fn dismiss(&mut self, id: usize) {
        self.entries.retain(|toast| toast.id != id);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter()
    }
}

/// Render the stack as dismissible rows.
pub fn view(toasts: &Toasts) -> Element<'_, Message> {
    let rows = toasts.iter().map(|toast| {
        let label = match toast.kind {
            ToastKind::Success => text(&toast.message).style(text::success),
            ToastKind::Error => text(&toast.message).style(text::danger),
        };

        container(
            row![
                label,
                button(text("x").size(12)).on_press(Message::DismissToast(toast.id)),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        )
        .style(container::rounded_box)
        .padding(10)
        .into()
    });

    column(rows)
        .spacing(8)
        .width(Length::Shrink)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_monotonic() {
        let mut toasts = Toasts::default();
        let a = toasts.success("saved");
        let b = toasts.error("failed");
        assert!(b > a);
    }

    #[test]
    fn dismiss_removes_only_the_target() {
        let mut toasts = Toasts::default();
        let a = toasts.success("one");
        let b = toasts.success("two");

        toasts.dismiss(a);
        let remaining: Vec<usize> = toasts.iter().map(|t| t.id).collect();
        assert_eq!(remaining, vec![b]);
    }

    #[test]
    fn dismissing_an_expired_id_is_a_no_op() {
        let mut toasts = Toasts::default();
        let a = toasts.success("one");
        toasts.dismiss(a);
        toasts.dismiss(a);
        assert!(toasts.is_empty());
    }
}
