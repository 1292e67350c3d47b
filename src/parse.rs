//! Line-oriented INI scanner
//!
//! Single pass over a source of text lines. Each recognized
//! `(section, name, value)` triple is handed to a caller-supplied handler;
//! malformed lines are recorded, not fatal. The outcome of a scan is an
//! integer result code: `0` for success, the line number of the first bad
//! line, or [`FILE_OPEN_ERROR`] when the source itself failed.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use log::{debug, warn};

use crate::utils::string::{strip_inline_comment, truncate_at_boundary};

/// The source could not be opened, or an I/O error interrupted reading.
pub const FILE_OPEN_ERROR: i32 = -1;

/// Reserved for allocation failure in heap-backed line buffers. Rust's
/// global allocator aborts on out-of-memory, so this implementation never
/// actually returns it; the constant keeps the documented code space
/// intact for callers that switch on the result.
pub const ALLOC_ERROR: i32 = -2;

/// Scanner configuration.
///
/// The defaults match the historical behavior: multi-line values, BOM
/// tolerance and `;` inline comments on, errors recorded without stopping,
/// lines bounded to 200 bytes and section/key names to 50.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Treat an indented line following a key as a continuation of that
    /// key's value.
    pub allow_multiline: bool,
    /// Skip a UTF-8 byte-order mark at the very start of the input.
    pub allow_bom: bool,
    /// Recognize trailing comments on data lines.
    pub allow_inline_comments: bool,
    /// Characters that may start an inline comment. Only consulted when
    /// `allow_inline_comments` is set.
    pub comment_prefixes: String,
    /// Stop scanning at the first recorded error instead of continuing to
    /// the end of input.
    pub stop_on_first_error: bool,
    /// Maximum line length in bytes; longer lines are truncated.
    pub max_line: usize,
    /// Maximum section name length in bytes; longer names are truncated.
    pub max_section: usize,
    /// Maximum key name length in bytes; longer names are truncated.
    pub max_name: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            allow_multiline: true,
            allow_bom: true,
            allow_inline_comments: true,
            comment_prefixes: ";".to_string(),
            stop_on_first_error: false,
            max_line: 200,
            max_section: 50,
            max_name: 50,
        }
    }
}

/// A source of text lines, for in-memory or non-filesystem origins.
///
/// Implemented for every [`BufRead`], so `&[u8]`, `Cursor` and
/// `BufReader<File>` all work out of the box.
pub trait LineSource {
    /// Append the next line (including its terminator, if any) to `buf`.
    /// Returns the number of bytes read, `0` meaning end of input.
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl<R: BufRead> LineSource for R {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Parse the file at `path` with default options. Returns
/// [`FILE_OPEN_ERROR`] if it cannot be opened.
pub fn parse<P, F>(path: P, handler: F) -> i32
where
    P: AsRef<Path>,
    F: FnMut(&str, &str, &str) -> bool,
{
    parse_with(path, &ParseOptions::default(), handler)
}

/// Parse the file at `path`, opening and closing it around the scan.
pub fn parse_with<P, F>(path: P, options: &ParseOptions, handler: F) -> i32
where
    P: AsRef<Path>,
    F: FnMut(&str, &str, &str) -> bool,
{
    let file = match File::open(path.as_ref()) {
        Ok(file) => file,
        Err(err) => {
            warn!("could not open {}: {}", path.as_ref().display(), err);
            return FILE_OPEN_ERROR;
        }
    };
    parse_read_with(file, options, handler)
}

/// Parse an already-open reader with default options. The caller keeps
/// whatever ownership or close responsibility it had.
pub fn parse_read<R, F>(reader: R, handler: F) -> i32
where
    R: Read,
    F: FnMut(&str, &str, &str) -> bool,
{
    parse_read_with(reader, &ParseOptions::default(), handler)
}

/// Parse an already-open reader, buffering it internally.
pub fn parse_read_with<R, F>(reader: R, options: &ParseOptions, handler: F) -> i32
where
    R: Read,
    F: FnMut(&str, &str, &str) -> bool,
{
    let mut buffered = BufReader::new(reader);
    parse_stream_with(&mut buffered, options, handler)
}

/// Parse a custom [`LineSource`] with default options.
pub fn parse_stream<S, F>(source: &mut S, handler: F) -> i32
where
    S: LineSource + ?Sized,
    F: FnMut(&str, &str, &str) -> bool,
{
    parse_stream_with(source, &ParseOptions::default(), handler)
}

/// Parse a custom [`LineSource`].
///
/// Scanner state is local to this call: the current section, the most
/// recent key name (for continuation lines) and the first error line.
/// The handler returning `false` records the line as an error exactly
/// like a syntax error would, and scanning continues unless
/// `stop_on_first_error` is set.
pub fn parse_stream_with<S, F>(source: &mut S, options: &ParseOptions, mut handler: F) -> i32
where
    S: LineSource + ?Sized,
    F: FnMut(&str, &str, &str) -> bool,
{
    let mut line = String::new();
    let mut section = String::new();
    let mut prev_name = String::new();
    let mut lineno: u32 = 0;
    let mut error: i32 = 0;

    loop {
        line.clear();
        match source.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                warn!("read failed after line {}: {}", lineno, err);
                return FILE_OPEN_ERROR;
            }
        }
        lineno += 1;

        let mut start: &str = &line;
        if options.allow_bom && lineno == 1 {
            start = start.strip_prefix('\u{feff}').unwrap_or(start);
        }
        let start = truncate_at_boundary(start, options.max_line);
        // trailing strip first (handles the CR of CRLF), then leading;
        // the difference tells us whether the line was indented
        let rstripped = start.trim_end();
        let trimmed = rstripped.trim_start();
        let indented = trimmed.len() < rstripped.len();

        if trimmed.starts_with(';') || trimmed.starts_with('#') {
            // full-line comment, both prefixes allowed at line start
        } else if options.allow_multiline && !prev_name.is_empty() && !trimmed.is_empty() && indented
        {
            // indented non-blank line after a key: continuation of that
            // key's value
            let value = if options.allow_inline_comments {
                strip_inline_comment(trimmed, &options.comment_prefixes)
            } else {
                trimmed
            };
            if !handler(&section, &prev_name, value) && error == 0 {
                error = lineno as i32;
                warn!("handler rejected continuation on line {}", lineno);
            }
        } else if let Some(rest) = trimmed.strip_prefix('[') {
            // comment prefixes are not honored between the brackets, and
            // anything after the closing bracket is ignored
            match rest.find(']') {
                Some(end) => {
                    section.clear();
                    section.push_str(truncate_at_boundary(&rest[..end], options.max_section));
                    prev_name.clear();
                }
                None => {
                    if error == 0 {
                        error = lineno as i32;
                        warn!("no closing ']' on line {}", lineno);
                    }
                }
            }
        } else if !trimmed.is_empty() {
            // not a comment or section, must be a name=value pair; the
            // delimiter search is not hidden by inline comments, those are
            // stripped from the value after the split
            match trimmed.find(['=', ':']) {
                Some(split) => {
                    let name = truncate_at_boundary(trimmed[..split].trim_end(), options.max_name);
                    let tail = trimmed[split + 1..].trim_start();
                    let value = if options.allow_inline_comments {
                        strip_inline_comment(tail, &options.comment_prefixes)
                    } else {
                        tail
                    };
                    prev_name.clear();
                    prev_name.push_str(name);
                    if !handler(&section, name, value) && error == 0 {
                        error = lineno as i32;
                        warn!("handler rejected pair on line {}", lineno);
                    }
                }
                None => {
                    if error == 0 {
                        error = lineno as i32;
                        warn!("no '=' or ':' on line {}", lineno);
                    }
                }
            }
        }

        if options.stop_on_first_error && error != 0 {
            break;
        }
    }

    debug!("scanned {} line(s), result {}", lineno, error);
    error
}
