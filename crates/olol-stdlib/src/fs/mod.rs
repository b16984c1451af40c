//! Filesystem access: files, directories and name patterns

mod cabinet;
mod document;
mod pattern;

pub use cabinet::Cabinet;
pub use document::{Document, FileMode};
pub use pattern::Pattern;

/// The platform path separator as a string.
pub fn separator() -> String {
    std::path::MAIN_SEPARATOR.to_string()
}
