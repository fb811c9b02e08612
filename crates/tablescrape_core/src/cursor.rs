use crate::SessionError;

/// Current browse position within a collection of `len` tables.
///
/// Steps clamp at both ends; `position()` is `None` only when `len == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationCursor {
    position: usize,
    len: usize,
}

impl NavigationCursor {
    pub fn new(len: usize) -> Self {
        Self { position: 0, len }
    }

    pub fn position(&self) -> Option<usize> {
        (self.len > 0).then_some(self.position)
    }

    /// Like `position`, but an empty collection is a contract violation.
    pub fn require_position(&self) -> Result<usize, SessionError> {
        self.position().ok_or(SessionError::EmptyCollection)
    }

    pub fn step_forward(&mut self) {
        if self.position + 1 < self.len {
            self.position += 1;
        }
    }

    pub fn step_backward(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        }
    }

    pub fn at_start(&self) -> bool {
        self.position == 0
    }

    pub fn at_end(&self) -> bool {
        self.position + 1 >= self.len
    }
}
