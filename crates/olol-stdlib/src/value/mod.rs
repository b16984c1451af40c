//! Value representation for runtime values

mod display;
mod impls;
mod ordering;

pub use display::render_double;
pub use ordering::sort_order;

use std::sync::Arc;

use crate::object::ObjectRef;

/// Runtime value representation for Objective-LOL.
///
/// A closed set of kinds: every standard library operation matches on it
/// exhaustively and raises a type error for kinds it does not accept.
/// Primitives copy by value; `Object` copies the reference.
#[derive(Clone)]
pub enum Value {
    /// The `NOTHIN` singleton
    Nothing,

    /// Boolean: `YEZ` or `NO`
    Bool(bool),

    /// 64-bit signed integer (`INTEGR`)
    Integer(i64),

    /// 64-bit float (`DUBBLE`)
    Double(f64),

    /// Immutable string (`STRIN`), shared on clone
    String(Arc<String>),

    /// Reference to a class instance
    Object(ObjectRef),
}
