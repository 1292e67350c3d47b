//! Read INI files into easy-to-access name/value pairs.
//!
//! Two layers: [`parse`] is a single-pass line scanner that hands every
//! recognized `(section, name, value)` triple to a handler and keeps going
//! past malformed lines, and [`reader::IniReader`] accumulates those
//! triples into a case-insensitive store with typed, default-falling-back
//! getters.
//!
//! ```
//! use ini_reader::IniReader;
//!
//! let reader = IniReader::from_content("[server]\nport = 8080\nhosts = a, b, c\n");
//! assert_eq!(reader.error(), 0);
//! assert_eq!(reader.get::<i64>("server", "port", 0), 8080);
//! assert_eq!(
//!     reader.get_array::<String>("server", "hosts"),
//!     vec!["a".to_string(), "b".to_string(), "c".to_string()]
//! );
//! ```

pub mod error;
pub mod parse;
pub mod reader;
pub mod utils;
pub mod value;

// Re-export the main entry points for easier access
pub use error::IniError;
pub use parse::{LineSource, ParseOptions, ALLOC_ERROR, FILE_OPEN_ERROR};
pub use reader::{IniReader, MAIN_SCOPE};
pub use value::IniValue;
