//! Invoice navigation.
//!
//! [`Cursor`] is the whole state machine: a position in `[0, len)` with two
//! clamping steps and an unclamped, checked jump. It is a plain `Copy` value,
//! so each transition takes the old state and returns the new one.
//!
//! [`Session`] pairs a cursor with the ordered filename list and is what the
//! terminal front end holds on to.

use crate::debug_log;
use crate::types::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    /// Starts at the first invoice. An empty catalog has no valid cursor.
    pub fn new(len: usize) -> Result<Self, NavigationError> {
        if len == 0 {
            return Err(NavigationError::EmptyCatalog);
        }
        Ok(Self { index: 0, len })
    }

    pub fn index(self) -> usize {
        self.index
    }

    pub fn len(self) -> usize {
        self.len
    }

    pub fn can_previous(self) -> bool {
        self.index > 0
    }

    pub fn can_next(self) -> bool {
        self.index + 1 < self.len
    }

    #[must_use]
    pub fn previous(self) -> Self {
        if self.can_previous() {
            Self { index: self.index - 1, ..self }
        } else {
            self
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        if self.can_next() {
            Self { index: self.index + 1, ..self }
        } else {
            self
        }
    }

    /// Out-of-range indices are rejected, never clamped or wrapped.
    pub fn jump_to(self, index: usize) -> Result<Self, NavigationError> {
        if index >= self.len {
            return Err(NavigationError::OutOfRange { index, len: self.len });
        }
        Ok(Self { index, ..self })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Previous,
    Next,
    JumpTo(usize),
}

#[derive(Debug, Clone)]
pub struct Session {
    filenames: Vec<String>,
    cursor: Cursor,
}

impl Session {
    pub fn new(filenames: Vec<String>) -> Result<Self, NavigationError> {
        let cursor = Cursor::new(filenames.len())?;
        Ok(Self { filenames, cursor })
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    pub fn current_filename(&self) -> &str {
        &self.filenames[self.cursor.index()]
    }

    /// Applies a move; returns whether the cursor changed.
    pub fn apply(&mut self, step: Move) -> Result<bool, NavigationError> {
        let before = self.cursor;
        self.cursor = match step {
            Move::Previous => before.previous(),
            Move::Next => before.next(),
            Move::JumpTo(index) => before.jump_to(index)?,
        };

        let changed = self.cursor != before;
        if changed {
            debug_log(format!(
                "nav {:?}: {} -> {} ({})",
                step,
                before.index(),
                self.cursor.index(),
                self.current_filename()
            ));
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("inv{i}.pdf")).collect()
    }

    #[test]
    fn empty_catalog_has_no_cursor() {
        assert_eq!(Cursor::new(0), Err(NavigationError::EmptyCatalog));
        assert!(Session::new(Vec::new()).is_err());
    }

    #[test]
    fn single_invoice_disables_both_steps() {
        let cursor = Cursor::new(1).unwrap();
        assert!(!cursor.can_previous());
        assert!(!cursor.can_next());
        assert_eq!(cursor.next(), cursor);
        assert_eq!(cursor.previous(), cursor);
        assert_eq!(cursor.jump_to(0), Ok(cursor));
        assert_eq!(cursor.jump_to(0).unwrap().jump_to(0), Ok(cursor));
    }

    #[test]
    fn next_stops_at_last() {
        let mut session = Session::new(names(3)).unwrap();
        assert_eq!(session.cursor().index(), 0);
        assert!(session.apply(Move::Next).unwrap());
        assert_eq!(session.cursor().index(), 1);
        assert!(session.apply(Move::Next).unwrap());
        assert_eq!(session.cursor().index(), 2);
        assert!(!session.apply(Move::Next).unwrap());
        assert_eq!(session.cursor().index(), 2);
        assert_eq!(session.current_filename(), "inv2.pdf");
    }

    #[test]
    fn previous_at_start_is_idempotent() {
        let mut cursor = Cursor::new(4).unwrap();
        for _ in 0..5 {
            cursor = cursor.previous();
        }
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn steps_never_leave_bounds() {
        // Walk a fixed zig-zag of steps and check the invariant after each one
        let pattern = [true, true, false, true, true, true, false, false, false, false, true];
        for len in [1, 2, 7] {
            let mut cursor = Cursor::new(len).unwrap();
            for _ in 0..4 {
                for &forward in &pattern {
                    cursor = if forward { cursor.next() } else { cursor.previous() };
                    assert!(cursor.index() < len);
                }
            }
            for _ in 0..len + 3 {
                cursor = cursor.next();
            }
            assert_eq!(cursor.index(), len - 1);
            assert_eq!(cursor.next().index(), len - 1);
        }
    }

    #[test]
    fn jump_lands_on_requested_filename() {
        let mut session = Session::new(names(5)).unwrap();
        for k in [3, 0, 4, 4, 1] {
            session.apply(Move::JumpTo(k)).unwrap();
            assert_eq!(session.current_filename(), format!("inv{k}.pdf"));
        }
    }

    #[test]
    fn out_of_range_jump_is_rejected_without_moving() {
        let mut session = Session::new(names(3)).unwrap();
        session.apply(Move::Next).unwrap();
        assert_eq!(
            session.apply(Move::JumpTo(3)),
            Err(NavigationError::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(session.cursor().index(), 1);
    }
}
