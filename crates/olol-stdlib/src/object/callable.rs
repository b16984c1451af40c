//! Callable types: free builtin functions and native methods

use std::sync::Arc;

use super::ObjectRef;
use crate::context::CallContext;
use crate::error::{Result, StdlibError};
use crate::value::Value;

/// Type alias for builtin function pointers
pub type BuiltinFnPtr = Arc<dyn Fn(&CallContext, &[Value]) -> Result<Value> + Send + Sync>;

/// Type alias for native method pointers; the receiver is passed explicitly.
pub type NativeMethodPtr =
    Arc<dyn Fn(&CallContext, &ObjectRef, &[Value]) -> Result<Value> + Send + Sync>;

/// A free function exposed to the interpreter (e.g. `RANDOM_INT`).
#[derive(Clone)]
pub struct BuiltinFn {
    /// Function name as seen by programs
    pub name: String,

    /// Arity (-1 for variadic)
    pub arity: i32,

    /// The native implementation
    pub func: BuiltinFnPtr,
}

impl BuiltinFn {
    /// Create a builtin from a plain function.
    pub fn new(
        name: impl Into<String>,
        arity: i32,
        func: impl Fn(&CallContext, &[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }
    }

    /// Invoke after checking the argument count.
    pub fn call(&self, ctx: &CallContext, args: &[Value]) -> Result<Value> {
        check_arity(&self.name, self.arity, args)?;
        (self.func)(ctx, args)
    }
}

impl std::fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BuiltinFn({})", self.name)
    }
}

/// A method bound to a class.
#[derive(Clone)]
pub struct Method {
    /// Method name (constructors share the class name)
    pub name: String,

    /// Arity (-1 for variadic)
    pub arity: i32,

    /// The native implementation
    pub func: NativeMethodPtr,
}

impl Method {
    /// Invoke on a receiver after checking the argument count.
    pub fn call(&self, ctx: &CallContext, this: &ObjectRef, args: &[Value]) -> Result<Value> {
        check_arity(&self.name, self.arity, args)?;
        (self.func)(ctx, this, args)
    }
}

impl std::fmt::Debug for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Method({}/{})", self.name, self.arity)
    }
}

fn check_arity(name: &str, arity: i32, args: &[Value]) -> Result<()> {
    if arity >= 0 && args.len() != arity as usize {
        return Err(StdlibError::ArityMismatch {
            name: name.to_string(),
            expected: arity as usize,
            got: args.len(),
        });
    }
    Ok(())
}
