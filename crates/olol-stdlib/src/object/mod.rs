//! Object model: classes, native methods and object references
//!
//! This is the minimal runtime the standard library needs from its host
//! interpreter. Objects carry an optional slot of native state (a Rust value
//! such as a [`Bukkit`](crate::Bukkit) or a buffered decorator) guarded by a
//! mutex, plus per-instance member variables.

mod callable;
mod class;

pub use callable::{BuiltinFn, BuiltinFnPtr, Method, NativeMethodPtr};
pub use class::{Class, ClassBuilder, EqualityHook, NativeGetter, NativeSetter, Variable};

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::context::CallContext;
use crate::error::{Result, StdlibError};
use crate::value::Value;

type NativeSlot = Option<Box<dyn Any + Send>>;

/// An instance of a [`Class`].
pub struct Object {
    class: Arc<Class>,
    native: Mutex<NativeSlot>,
    variables: Mutex<IndexMap<String, Value>>,
}

/// Shared handle to an [`Object`]. Cloning copies the reference.
#[derive(Clone)]
pub struct ObjectRef(Arc<Object>);

impl ObjectRef {
    /// Create an instance with the class's stored variables at their defaults.
    pub fn new(class: Arc<Class>) -> Self {
        let mut variables = IndexMap::new();
        // Walk the MRO from the root so subclasses override inherited defaults
        if let Ok(order) = class.mro() {
            for ancestor in order.iter().rev() {
                for (name, variable) in ancestor.own_variables() {
                    if let Variable::Stored(default) = variable {
                        variables.insert(name.clone(), default.clone());
                    }
                }
            }
        }
        ObjectRef(Arc::new(Object {
            class,
            native: Mutex::new(None),
            variables: Mutex::new(variables),
        }))
    }

    /// Create an instance that already holds native state.
    pub fn with_native_state<T: Any + Send>(class: Arc<Class>, state: T) -> Self {
        let obj = ObjectRef::new(class);
        obj.set_native(state);
        obj
    }

    /// The instance's class
    pub fn class(&self) -> &Arc<Class> {
        &self.0.class
    }

    /// The instance's class name
    pub fn class_name(&self) -> &str {
        self.0.class.name()
    }

    /// Reference identity.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Equality through the receiver's class hook, if any.
    pub fn delegated_eq(&self, other: &ObjectRef) -> bool {
        match self.0.class.equality() {
            Some(hook) => hook(self, other),
            None => false,
        }
    }

    /// Whether the instance's class is, or inherits from, `class_name`.
    pub fn is_instance_of(&self, class_name: &str) -> bool {
        self.0.class.is_subclass_of(class_name)
    }

    /// Replace the native state.
    pub fn set_native<T: Any + Send>(&self, state: T) {
        *self.0.native.lock() = Some(Box::new(state));
    }

    /// Run `f` on the native state while holding the instance lock.
    ///
    /// Fails with `"<operation>: invalid context"` when the object holds no
    /// native state of type `T`.
    pub fn with_native<T: Any + Send, R>(
        &self,
        operation: &str,
        f: impl FnOnce(&mut T) -> Result<R>,
    ) -> Result<R> {
        let mut slot = self.0.native.lock();
        match slot.as_mut().and_then(|state| state.downcast_mut::<T>()) {
            Some(state) => f(state),
            None => Err(StdlibError::type_error(format!(
                "{}: invalid context",
                operation
            ))),
        }
    }

    /// Whether the native state currently holds a `T`.
    pub fn has_native<T: Any + Send>(&self) -> bool {
        self.0
            .native
            .lock()
            .as_ref()
            .map(|state| state.is::<T>())
            .unwrap_or(false)
    }

    /// Whether the class (or an ancestor) defines `name`.
    pub fn has_method(&self, name: &str) -> bool {
        self.0.class.has_method(name)
    }

    /// Dispatch a method call through the MRO.
    pub fn call(&self, ctx: &CallContext, name: &str, args: &[Value]) -> Result<Value> {
        let method = self
            .0
            .class
            .find_method(name)?
            .ok_or_else(|| StdlibError::UndefinedMethod {
                class: self.class_name().to_string(),
                name: name.to_string(),
            })?;
        tracing::trace!(class = self.class_name(), method = name, "dispatch");
        method.call(ctx, self, args)
    }

    /// Read a member variable; native getters are evaluated on access.
    pub fn get_variable(&self, name: &str) -> Result<Value> {
        match self.0.class.find_variable(name)? {
            Some(Variable::Native { get, .. }) => get(self),
            Some(Variable::Stored(_)) => Ok(self
                .0
                .variables
                .lock()
                .get(name)
                .cloned()
                .unwrap_or(Value::Nothing)),
            None => Err(StdlibError::UndefinedVariable {
                class: self.class_name().to_string(),
                name: name.to_string(),
            }),
        }
    }

    /// Assign a member variable. Native attributes without a setter are read-only.
    pub fn set_variable(&self, name: &str, value: Value) -> Result<()> {
        match self.0.class.find_variable(name)? {
            Some(Variable::Native { set: Some(set), .. }) => set(self, value),
            Some(Variable::Native { set: None, .. }) => Err(StdlibError::ReadOnlyVariable {
                name: name.to_string(),
            }),
            Some(Variable::Stored(_)) => {
                self.0.variables.lock().insert(name.to_string(), value);
                Ok(())
            }
            None => Err(StdlibError::UndefinedVariable {
                class: self.class_name().to_string(),
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} object>", self.class_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_class() -> Arc<Class> {
        Class::builder("COUNTER")
            .variable("LABEL", Value::string("counter"))
            .getter("COUNT", |this| {
                this.with_native::<i64, _>("COUNT", |n| Ok(Value::Integer(*n)))
            })
            .method("BUMP", 0, |_, this, _| {
                this.with_native::<i64, _>("BUMP", |n| {
                    *n += 1;
                    Ok(Value::Integer(*n))
                })
            })
            .build()
    }

    #[test]
    fn test_native_state_roundtrip() {
        let ctx = CallContext::new();
        let obj = ObjectRef::with_native_state(counter_class(), 0i64);

        obj.call(&ctx, "BUMP", &[]).unwrap();
        obj.call(&ctx, "BUMP", &[]).unwrap();
        assert_eq!(obj.get_variable("COUNT").unwrap(), Value::Integer(2));
    }

    #[test]
    fn test_wrong_native_type_is_invalid_context() {
        let ctx = CallContext::new();
        let obj = ObjectRef::with_native_state(counter_class(), "nope".to_string());
        let err = obj.call(&ctx, "BUMP", &[]).unwrap_err();
        assert_eq!(err.to_string(), "Type error: BUMP: invalid context");
    }

    #[test]
    fn test_variables() {
        let obj = ObjectRef::with_native_state(counter_class(), 0i64);
        assert_eq!(obj.get_variable("LABEL").unwrap(), Value::string("counter"));

        obj.set_variable("LABEL", Value::string("renamed")).unwrap();
        assert_eq!(obj.get_variable("LABEL").unwrap(), Value::string("renamed"));

        assert!(matches!(
            obj.set_variable("COUNT", Value::Integer(9)),
            Err(StdlibError::ReadOnlyVariable { .. })
        ));
        assert!(matches!(
            obj.get_variable("MISSING"),
            Err(StdlibError::UndefinedVariable { .. })
        ));
    }

    #[test]
    fn test_undefined_method_and_arity() {
        let ctx = CallContext::new();
        let obj = ObjectRef::with_native_state(counter_class(), 0i64);

        assert!(matches!(
            obj.call(&ctx, "NOPE", &[]),
            Err(StdlibError::UndefinedMethod { .. })
        ));
        assert!(matches!(
            obj.call(&ctx, "BUMP", &[Value::Integer(1)]),
            Err(StdlibError::ArityMismatch { expected: 0, got: 1, .. })
        ));
    }

    #[test]
    fn test_identity() {
        let class = counter_class();
        let a = ObjectRef::new(class.clone());
        let b = ObjectRef::new(class);
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
        assert!(!a.delegated_eq(&b));
        assert_eq!(format!("{:?}", a), "<COUNTER object>");
    }
}
