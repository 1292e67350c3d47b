//! INI file reader
//!
//! [`IniReader`] drives the line scanner once at construction time,
//! accumulating every recognized pair into a case-insensitive map, and is
//! read-only from then on. Lookups that miss fall back to the `main`
//! section and finally to the caller-supplied default; typed conversion
//! failures are never errors, only defaults.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::debug;

use crate::error::IniError;
use crate::parse::{self, LineSource, ParseOptions};
use crate::value::IniValue;

/// Section tried as a secondary lookup scope when a key is absent from the
/// requested section.
pub const MAIN_SCOPE: &str = "main";

/// Accumulation target handed to the scanner.
#[derive(Default)]
struct Store {
    values: HashMap<String, String>,
    sections: BTreeSet<String>,
}

impl Store {
    fn accept(&mut self, section: &str, name: &str, value: &str) -> bool {
        let key = make_key(section, name);
        match self.values.get_mut(&key) {
            Some(existing) => {
                // repeated keys and continuation lines accumulate,
                // newline-joined, rather than overwrite
                existing.push('\n');
                existing.push_str(value);
            }
            None => {
                self.values.insert(key, value.to_string());
            }
        }
        // section names are tracked case-preserved, including "" for
        // entries seen before any section header
        self.sections.insert(section.to_string());
        true
    }
}

/// Parsed INI content with typed, default-falling-back lookups.
pub struct IniReader {
    error: i32,
    values: HashMap<String, String>,
    sections: BTreeSet<String>,
}

impl IniReader {
    /// Parse the file at `path` with default options. Never fails; check
    /// [`error`](Self::error) for the outcome.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file_with(path, &ParseOptions::default())
    }

    pub fn from_file_with<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Self {
        let mut store = Store::default();
        let error = parse::parse_with(path, options, |s, n, v| store.accept(s, n, v));
        Self::assemble(error, store)
    }

    /// Parse the file at `path`, surfacing the outcome as a `Result`.
    pub fn try_from_file<P: AsRef<Path>>(path: P) -> Result<Self, IniError> {
        let file = File::open(path)?;
        let reader = Self::from_read(file);
        match reader.error {
            0 => Ok(reader),
            line if line > 0 => Err(IniError::Syntax(line as u32)),
            _ => Err(IniError::Io(io::Error::other("source read failed"))),
        }
    }

    /// Parse an already-open reader. The caller keeps whatever close
    /// responsibility it had.
    pub fn from_read<R: Read>(reader: R) -> Self {
        Self::from_read_with(reader, &ParseOptions::default())
    }

    pub fn from_read_with<R: Read>(reader: R, options: &ParseOptions) -> Self {
        let mut store = Store::default();
        let error = parse::parse_read_with(reader, options, |s, n, v| store.accept(s, n, v));
        Self::assemble(error, store)
    }

    /// Parse in-memory INI text.
    pub fn from_content(content: &str) -> Self {
        Self::from_content_with(content, &ParseOptions::default())
    }

    pub fn from_content_with(content: &str, options: &ParseOptions) -> Self {
        Self::from_read_with(content.as_bytes(), options)
    }

    /// Parse a custom [`LineSource`].
    pub fn from_source<S: LineSource + ?Sized>(source: &mut S) -> Self {
        Self::from_source_with(source, &ParseOptions::default())
    }

    pub fn from_source_with<S: LineSource + ?Sized>(
        source: &mut S,
        options: &ParseOptions,
    ) -> Self {
        let mut store = Store::default();
        let error = parse::parse_stream_with(source, options, |s, n, v| store.accept(s, n, v));
        Self::assemble(error, store)
    }

    fn assemble(error: i32, store: Store) -> Self {
        debug!(
            "loaded {} entr(ies) across {} section(s), result {}",
            store.values.len(),
            store.sections.len(),
            error
        );
        IniReader {
            error,
            values: store.values,
            sections: store.sections,
        }
    }

    /// Result code of the construction-time parse: `0` on success, the
    /// line number of the first syntax error, or
    /// [`FILE_OPEN_ERROR`](crate::parse::FILE_OPEN_ERROR).
    pub fn error(&self) -> i32 {
        self.error
    }

    /// All section names seen, case-preserved, including `""` when pairs
    /// appeared before any section header.
    pub fn sections(&self) -> &BTreeSet<String> {
        &self.sections
    }

    /// Typed lookup with default fallback.
    ///
    /// The key is matched case-insensitively; when it is absent from
    /// `section`, the [`MAIN_SCOPE`] section is tried before giving up.
    /// Absent keys and unconvertible values both yield `default`.
    pub fn get<T: IniValue>(&self, section: &str, name: &str, default: T) -> T {
        match self.get_raw(section, name) {
            Some(raw) => T::parse_ini(raw).unwrap_or(default),
            None => default,
        }
    }

    /// Comma-delimited array lookup.
    ///
    /// Splits the raw value on `,` and converts each whitespace-trimmed
    /// segment. A segment that fails to convert becomes `T::default()`
    /// instead of being dropped, and an absent key yields a single
    /// default element (the raw value is the empty string). Both are
    /// inherited behavior.
    pub fn get_array<T: IniValue + Default>(&self, section: &str, name: &str) -> Vec<T> {
        let raw = self.get::<String>(section, name, String::new());
        raw.split(',')
            .map(|segment| T::parse_ini(segment.trim()).unwrap_or_default())
            .collect()
    }

    fn get_raw(&self, section: &str, name: &str) -> Option<&str> {
        self.values
            .get(&make_key(section, name))
            .or_else(|| self.values.get(&make_key(MAIN_SCOPE, name)))
            .map(String::as_str)
    }
}

/// Lowercased `section=name` entry key; `=` cannot appear in either
/// component, so the mapping is unambiguous.
fn make_key(section: &str, name: &str) -> String {
    let mut key = String::with_capacity(section.len() + name.len() + 1);
    key.push_str(&section.to_lowercase());
    key.push('=');
    key.push_str(&name.to_lowercase());
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key_lowercases_both_components() {
        assert_eq!(make_key("Net", "Host"), "net=host");
        assert_eq!(make_key("", "x"), "=x");
    }

    #[test]
    fn test_accumulation_appends_with_newline() {
        let reader = IniReader::from_content("[a]\nx=1\nx=2\n");
        assert_eq!(reader.error(), 0);
        assert_eq!(reader.get::<String>("a", "x", String::new()), "1\n2");
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let reader = IniReader::from_content("[Server]\nPort = 8080\n");
        assert_eq!(reader.get::<i64>("server", "port", 0), 8080);
        assert_eq!(reader.get::<i64>("SERVER", "PORT", 0), 8080);
    }

    #[test]
    fn test_main_scope_fallback() {
        let reader = IniReader::from_content("[main]\ntimeout = 30\n[job]\nretries = 2\n");
        assert_eq!(reader.get::<i64>("job", "timeout", 0), 30);
        assert_eq!(reader.get::<i64>("job", "retries", 0), 2);
        assert_eq!(reader.get::<i64>("job", "missing", 7), 7);
    }

    #[test]
    fn test_sections_include_pre_section_scope() {
        let reader = IniReader::from_content("x=5\n[a]\ny=6\n");
        let names: Vec<&str> = reader.sections().iter().map(String::as_str).collect();
        assert_eq!(names, vec!["", "a"]);
        assert_eq!(reader.get::<i64>("", "x", 0), 5);
    }
}
