use core::fmt;

/// The reason a cursor or [`Position`] could not be read or advanced.
///
/// [`Position`]: crate::hash_table::Position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CursorError {
    /// The position is the end sentinel. It has no element and cannot be
    /// advanced.
    End,
    /// The table was rebuilt (grown, shrunk, cleared or drained) after the
    /// position was taken.
    Invalidated,
    /// The element the position referred to has been removed.
    Vacated,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorError::End => f.write_str("cursor is at the end of the table"),
            CursorError::Invalidated => {
                f.write_str("cursor was invalidated by a rebuild of the table")
            }
            CursorError::Vacated => f.write_str("cursor refers to a removed element"),
        }
    }
}

impl core::error::Error for CursorError {}
