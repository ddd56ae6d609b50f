//! Keyboard selection over the rendered result list.
//!
//! Pure state: the widget mirrors changes to the view.

/// Index of the result marked "focused", if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    focused: Option<usize>,
}

impl Selection {
    /// Focused result index.
    pub fn focused(self) -> Option<usize> {
        self.focused
    }

    /// Remove the focus mark.
    pub fn clear(&mut self) {
        self.focused = None;
    }

    /// Move down: first result when nothing is focused, otherwise the next
    /// one. Stays on the last result.
    pub fn move_down(&mut self, len: usize) {
        if len == 0 {
            self.focused = None;
            return;
        }
        self.focused = Some(match self.focused {
            None => 0,
            Some(i) => (i + 1).min(len - 1),
        });
    }

    /// Move up to the previous result. From the first result the mark is
    /// removed.
    pub fn move_up(&mut self) {
        self.focused = match self.focused {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Result to activate: the focused one, else the first if any exist.
    pub fn activation_target(self, len: usize) -> Option<usize> {
        match self.focused {
            Some(i) if i < len => Some(i),
            _ if len > 0 => Some(0),
            _ => None,
        }
    }
}
