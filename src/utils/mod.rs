pub mod string;

// Re-export common utilities
pub use string::{find_inline_comment, strip_inline_comment, truncate_at_boundary};
