/// Gallery and lightbox navigation state machine
///
/// Tracks which album (if any) is open and which item index is focused
/// inside the full-screen viewer. The machine never holds a copy of the
/// media list; every transition that depends on list length takes it as
/// an argument, so it always operates against the current projection.
///
/// Transitions out of bounds are no-ops: there is no wraparound and no
/// error path. Closing an item viewer that was entered from an album
/// returns to that album, not to the grid.

/// Which list an open item is addressed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// The full filtered list behind the grid
    Grid,
    /// The member list of the named album
    Album(String),
}

/// Navigation state for the gallery overlays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Lightbox {
    /// Nothing open; the keyboard listener is detached in this state
    #[default]
    Closed,
    /// The album detail view for `title` is open
    AlbumOpen { title: String },
    /// The full-screen viewer shows `index` within the `origin` list
    ItemOpen { origin: Origin, index: usize },
}

impl Lightbox {
    pub fn is_closed(&self) -> bool {
        matches!(self, Lightbox::Closed)
    }

    /// The focused index, when the viewer is open.
    pub fn current_index(&self) -> Option<usize> {
        match self {
            Lightbox::ItemOpen { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Open an album detail view from the grid.
    ///
    /// Only multi-item albums are addressable as albums; anything smaller
    /// is a single and routes through [`Lightbox::open_item`] instead.
    pub fn open_album(&mut self, title: &str, member_count: usize) {
        if member_count < 2 {
            return;
        }
        *self = Lightbox::AlbumOpen {
            title: title.to_string(),
        };
    }

    /// Open the item viewer at `index` into a list of `len` items.
    ///
    /// From an open album the viewer is scoped to that album's member
    /// list; from the grid it is scoped to the full filtered list.
    pub fn open_item(&mut self, index: usize, len: usize) {
        if index >= len {
            return;
        }
        let origin = match self {
            Lightbox::AlbumOpen { title } => Origin::Album(std::mem::take(title)),
            _ => Origin::Grid,
        };
        *self = Lightbox::ItemOpen { origin, index };
    }

    /// Advance to the next item; a no-op at the end of the list.
    pub fn next(&mut self, len: usize) {
        if let Lightbox::ItemOpen { index, .. } = self {
            if *index + 1 < len {
                *index += 1;
            }
        }
    }

    /// Step back to the previous item; a no-op at the start of the list.
    pub fn prev(&mut self) {
        if let Lightbox::ItemOpen { index, .. } = self {
            if *index > 0 {
                *index -= 1;
            }
        }
    }

    /// Close the innermost open layer.
    ///
    /// An item viewer entered from an album returns to that album's
    /// detail view; everything else returns to the grid.
    pub fn close(&mut self) {
        *self = match std::mem::take(self) {
            Lightbox::ItemOpen {
                origin: Origin::Album(title),
                ..
            } => Lightbox::AlbumOpen { title },
            _ => Lightbox::Closed,
        };
    }

    /// Drop every open layer at once (album deleted, projection gone).
    pub fn close_all(&mut self) {
        *self = Lightbox::Closed;
    }

    /// Re-anchor the viewer after the underlying list shrank to `new_len`
    /// items: clamp the focused index, or close the viewer entirely when
    /// the list emptied out.
    pub fn item_removed(&mut self, new_len: usize) {
        if let Lightbox::ItemOpen { index, .. } = self {
            if new_len == 0 {
                self.close();
            } else if *index >= new_len {
                *index = new_len - 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let lightbox = Lightbox::default();
        assert!(lightbox.is_closed());
        assert_eq!(lightbox.current_index(), None);
    }

    #[test]
    fn albums_need_at_least_two_members() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open_album("Stray", 1);
        assert!(lightbox.is_closed());

        lightbox.open_album("Trip", 2);
        assert_eq!(
            lightbox,
            Lightbox::AlbumOpen {
                title: "Trip".into()
            }
        );
    }

    #[test]
    fn opening_from_grid_scopes_to_grid() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open_item(3, 10);
        assert_eq!(
            lightbox,
            Lightbox::ItemOpen {
                origin: Origin::Grid,
                index: 3
            }
        );
    }

    #[test]
    fn opening_from_album_scopes_to_album() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open_album("Trip", 4);
        lightbox.open_item(1, 4);
        assert_eq!(
            lightbox,
            Lightbox::ItemOpen {
                origin: Origin::Album("Trip".into()),
                index: 1
            }
        );
    }

    #[test]
    fn out_of_range_open_is_a_no_op() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open_item(5, 5);
        assert!(lightbox.is_closed());
    }

    #[test]
    fn next_clamps_at_the_last_item() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open_item(4, 5);
        lightbox.next(5);
        assert_eq!(lightbox.current_index(), Some(4));
    }

    #[test]
    fn prev_clamps_at_the_first_item() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open_item(0, 5);
        lightbox.prev();
        assert_eq!(lightbox.current_index(), Some(0));
    }

    #[test]
    fn next_and_prev_walk_the_list() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open_item(0, 3);
        lightbox.next(3);
        lightbox.next(3);
        assert_eq!(lightbox.current_index(), Some(2));
        lightbox.prev();
        assert_eq!(lightbox.current_index(), Some(1));
    }

    #[test]
    fn closing_an_album_item_returns_to_the_album() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open_album("Trip", 3);
        lightbox.open_item(2, 3);
        lightbox.close();
        assert_eq!(
            lightbox,
            Lightbox::AlbumOpen {
                title: "Trip".into()
            }
        );
        lightbox.close();
        assert!(lightbox.is_closed());
    }

    #[test]
    fn closing_a_grid_item_returns_to_the_grid() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open_item(0, 2);
        lightbox.close();
        assert!(lightbox.is_closed());
    }

    #[test]
    fn close_all_collapses_nested_state() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open_album("Trip", 2);
        lightbox.open_item(0, 2);
        lightbox.close_all();
        assert!(lightbox.is_closed());
    }

    #[test]
    fn item_removed_clamps_the_index() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open_item(4, 5);
        lightbox.item_removed(4);
        assert_eq!(lightbox.current_index(), Some(3));

        // Removal in the middle leaves an in-range index alone
        lightbox.item_removed(4);
        assert_eq!(lightbox.current_index(), Some(3));
    }

    #[test]
    fn item_removed_closes_when_the_list_empties() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open_item(0, 1);
        lightbox.item_removed(0);
        assert!(lightbox.is_closed());
    }

    #[test]
    fn last_album_item_removed_falls_back_to_the_album_view() {
        let mut lightbox = Lightbox::Closed;
        lightbox.open_album("Trip", 2);
        lightbox.open_item(0, 1);
        lightbox.item_removed(0);
        assert_eq!(
            lightbox,
            Lightbox::AlbumOpen {
                title: "Trip".into()
            }
        );
    }
}
