//! Generic containers backing BUKKIT and BASKIT

mod array;
mod map;

pub use array::Bukkit;
pub use map::{canonical_key, Baskit};
