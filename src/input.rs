//! Column input shared by the console prompt and the `/play` form.

use crate::error::InputError;

/// Parse a column number typed by a user or posted in a form.
///
/// Only checks that the text is a non-negative integer; whether the column
/// exists is decided by the game.
pub fn parse_column(text: &str) -> Result<usize, InputError> {
    let text = text.trim();
    let value: i64 = text
        .parse()
        .map_err(|_| InputError::Malformed(text.to_string()))?;
    usize::try_from(value).map_err(|_| InputError::OutOfRange(value))
}
