//! Symbol environment holding the functions, classes and global variables
//! a program has imported

use std::sync::Arc;

use indexmap::IndexMap;

use crate::context::CallContext;
use crate::error::{Result, StdlibError};
use crate::object::{BuiltinFn, Class, ObjectRef};
use crate::value::Value;

/// Functions, classes and globals visible to a program.
///
/// Definitions keep their insertion order; redefining a name replaces the
/// earlier definition in place.
///
/// # Example
///
/// ```
/// use olol_stdlib::{BuiltinFn, CallContext, Environment, Value};
///
/// let mut env = Environment::new();
/// env.define_function(BuiltinFn::new("TWICE", 1, |_, args| {
///     Ok(Value::Integer(args[0].to_integer()? * 2))
/// }));
///
/// let ctx = CallContext::new();
/// let result = env.call_function(&ctx, "TWICE", &[Value::Integer(21)]).unwrap();
/// assert_eq!(result, Value::Integer(42));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Environment {
    functions: IndexMap<String, BuiltinFn>,
    classes: IndexMap<String, Arc<Class>>,
    variables: IndexMap<String, Value>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Definition
    // ═══════════════════════════════════════════════════════════════════

    /// Define (or replace) a free function.
    pub fn define_function(&mut self, func: BuiltinFn) {
        self.functions.insert(func.name.clone(), func);
    }

    /// Define (or replace) a class under its own name.
    pub fn define_class(&mut self, class: Arc<Class>) {
        self.classes.insert(class.name().to_string(), class);
    }

    /// Define (or replace) a global variable.
    pub fn define_variable(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Look up a function.
    pub fn get_function(&self, name: &str) -> Option<&BuiltinFn> {
        self.functions.get(name)
    }

    /// Look up a class.
    pub fn get_class(&self, name: &str) -> Option<&Arc<Class>> {
        self.classes.get(name)
    }

    /// Look up a global variable.
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Names of all functions in definition order.
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.keys().map(String::as_str).collect()
    }

    /// Names of all classes in definition order.
    pub fn class_names(&self) -> Vec<&str> {
        self.classes.keys().map(String::as_str).collect()
    }

    /// Names of all global variables in definition order.
    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.keys().map(String::as_str).collect()
    }

    /// Total number of definitions.
    pub fn len(&self) -> usize {
        self.functions.len() + self.classes.len() + self.variables.len()
    }

    /// Whether nothing is defined.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ═══════════════════════════════════════════════════════════════════
    // Invocation
    // ═══════════════════════════════════════════════════════════════════

    /// Call a function by name.
    pub fn call_function(&self, ctx: &CallContext, name: &str, args: &[Value]) -> Result<Value> {
        let func = self
            .get_function(name)
            .ok_or_else(|| StdlibError::UndefinedFunction {
                name: name.to_string(),
            })?;
        func.call(ctx, args)
    }

    /// Create an instance of a class by name and run its constructor.
    pub fn instantiate(&self, ctx: &CallContext, class: &str, args: &[Value]) -> Result<ObjectRef> {
        let class = self
            .get_class(class)
            .ok_or_else(|| StdlibError::UndefinedClass {
                name: class.to_string(),
            })?;
        Self::construct(ctx, class, args)
    }

    /// Create an instance of `class` and run its constructor, if it has one.
    ///
    /// The constructor is the method named like the class.
    pub fn construct(ctx: &CallContext, class: &Arc<Class>, args: &[Value]) -> Result<ObjectRef> {
        let object = ObjectRef::new(Arc::clone(class));
        match class.find_method(class.name())? {
            Some(constructor) => {
                constructor.call(ctx, &object, args)?;
            }
            None if !args.is_empty() => {
                return Err(StdlibError::ArityMismatch {
                    name: class.name().to_string(),
                    expected: 0,
                    got: args.len(),
                });
            }
            None => {}
        }
        Ok(object)
    }
}
