use std::io;

use thiserror::Error;

/// Errors surfaced by the `Result`-returning convenience constructors.
///
/// The core parse entry points report outcomes as an integer result code
/// instead (see [`crate::parse`]); this enum covers the same taxonomy for
/// callers who prefer `?`.
#[derive(Error, Debug)]
pub enum IniError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Syntax error on line {0}")]
    Syntax(u32),
}
