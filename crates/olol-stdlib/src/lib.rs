//! # olol-stdlib
//!
//! The standard library layer of the Objective-LOL interpreter.
//!
//! The crate provides the runtime pieces that interpreted programs reach
//! through `CAN HAS <MODULE>?` imports: dynamic containers, buffered stream
//! decorators, filesystem access, string helpers, randomness and time.
//!
//! ## Architecture
//!
//! - **Core types**: [`Bukkit`], [`Baskit`], [`BufferedReader`],
//!   [`BufferedWriter`], [`Document`] and friends are plain Rust types usable
//!   without an interpreter.
//! - **Object model**: [`Class`], [`ObjectRef`] and [`Method`] form the
//!   minimal runtime the bindings need (C3 method resolution, native state,
//!   attribute getters).
//! - **Bindings**: the [`stdlib`] modules expose the core types as classes
//!   and functions, installed into an [`Environment`] through the module
//!   registry.
//!
//! ```
//! use olol_stdlib::{CallContext, Environment, Value};
//!
//! let mut env = Environment::new();
//! env.import("BUKKIT", &[]).unwrap();
//!
//! let ctx = CallContext::new();
//! let arr = env.instantiate(&ctx, "BUKKIT", &[]).unwrap();
//! arr.call(&ctx, "PUSH", &[Value::Integer(7)]).unwrap();
//! assert_eq!(arr.get_variable("SIZ").unwrap(), Value::Integer(1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod containers;
pub mod context;
pub mod environment;
pub mod error;
pub mod fs;
pub mod io;
pub mod object;
pub mod random;
pub mod stdlib;
pub mod strings;
pub mod time;
pub mod value;

// Re-export main types
pub use containers::{canonical_key, Baskit, Bukkit};
pub use context::{CallContext, StdlibConfig, DEFAULT_BUFFER_SIZE};
pub use environment::Environment;
pub use error::{type_name, Result, StdlibError};
pub use fs::{Cabinet, Document, FileMode, Pattern};
pub use io::{BufferedReader, BufferedWriter, ObjectStream, Reader, Writer};
pub use object::{BuiltinFn, Class, ClassBuilder, Method, ObjectRef, Variable};
pub use random::RandomSource;
pub use stdlib::{import, module_names, register_module, ModuleExports, RegisterFn};
pub use time::Date;
pub use value::{render_double, sort_order, Value};

/// olol-stdlib version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
