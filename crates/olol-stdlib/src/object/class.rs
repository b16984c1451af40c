//! Class definitions and method resolution order

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;

use super::callable::{Method, NativeMethodPtr};
use super::ObjectRef;
use crate::context::CallContext;
use crate::error::{Result, StdlibError};
use crate::value::Value;

/// Computes an attribute from the receiver's native state.
pub type NativeGetter = fn(&ObjectRef) -> Result<Value>;

/// Applies an assignment to a native attribute.
pub type NativeSetter = fn(&ObjectRef, Value) -> Result<()>;

/// Class-specific equality used when two references are not identical.
pub type EqualityHook = fn(&ObjectRef, &ObjectRef) -> bool;

/// A public member variable declared by a class.
#[derive(Clone)]
pub enum Variable {
    /// Per-instance variable initialised from this default
    Stored(Value),

    /// Attribute computed on every access; read-only without a setter
    Native {
        /// Computes the value
        get: NativeGetter,
        /// Applies assignments, if the attribute is writable
        set: Option<NativeSetter>,
    },
}

impl std::fmt::Debug for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variable::Stored(v) => write!(f, "Stored({:?})", v),
            Variable::Native { set, .. } => {
                write!(f, "Native({})", if set.is_some() { "rw" } else { "ro" })
            }
        }
    }
}

/// A native class definition.
///
/// Classes are immutable once built and shared behind `Arc`. The method
/// resolution order is a C3 linearization of the parents, computed on first
/// use and cached.
pub struct Class {
    name: String,
    module: String,
    parents: Vec<Arc<Class>>,
    methods: IndexMap<String, Method>,
    variables: IndexMap<String, Variable>,
    equality: Option<EqualityHook>,
    ancestors: OnceCell<Vec<Arc<Class>>>,
}

impl std::fmt::Debug for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Class({})", self.qualified_name())
    }
}

impl Class {
    /// Start building a class.
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            class: Class {
                name: name.into(),
                module: String::new(),
                parents: Vec::new(),
                methods: IndexMap::new(),
                variables: IndexMap::new(),
                equality: None,
                ancestors: OnceCell::new(),
            },
        }
    }

    /// Display name, e.g. `BUKKIT`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning module, e.g. `stdlib:IO`
    pub fn module(&self) -> &str {
        &self.module
    }

    /// `module.name`, or just the name for classes outside any module
    pub fn qualified_name(&self) -> String {
        if self.module.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.module, self.name)
        }
    }

    /// Direct parents in declaration order
    pub fn parents(&self) -> &[Arc<Class>] {
        &self.parents
    }

    /// Methods declared directly on this class
    pub fn own_methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.values()
    }

    /// Variables declared directly on this class
    pub fn own_variables(&self) -> impl Iterator<Item = (&String, &Variable)> {
        self.variables.iter()
    }

    /// The class's equality hook, if it defines one
    pub fn equality(&self) -> Option<EqualityHook> {
        self.equality
    }

    /// Full method resolution order, starting with this class.
    pub fn mro(self: &Arc<Self>) -> Result<Vec<Arc<Class>>> {
        let ancestors = self.ancestors.get_or_try_init(|| c3_merge(&self.parents))?;
        let mut order = Vec::with_capacity(ancestors.len() + 1);
        order.push(Arc::clone(self));
        order.extend(ancestors.iter().cloned());
        Ok(order)
    }

    /// Look a method up along the MRO.
    pub fn find_method(self: &Arc<Self>, name: &str) -> Result<Option<Method>> {
        for class in self.mro()? {
            if let Some(method) = class.methods.get(name) {
                return Ok(Some(method.clone()));
            }
        }
        Ok(None)
    }

    /// Look a variable declaration up along the MRO.
    pub fn find_variable(self: &Arc<Self>, name: &str) -> Result<Option<Variable>> {
        for class in self.mro()? {
            if let Some(variable) = class.variables.get(name) {
                return Ok(Some(variable.clone()));
            }
        }
        Ok(None)
    }

    /// Whether a method with this name is reachable through the MRO.
    pub fn has_method(self: &Arc<Self>, name: &str) -> bool {
        matches!(self.find_method(name), Ok(Some(_)))
    }

    /// Whether `name` (plain or qualified) appears in this class's MRO.
    pub fn is_subclass_of(self: &Arc<Self>, name: &str) -> bool {
        self.mro()
            .map(|order| {
                order
                    .iter()
                    .any(|c| c.name == name || c.qualified_name() == name)
            })
            .unwrap_or(false)
    }
}

/// C3 merge of the parents' linearizations followed by the parent list itself.
fn c3_merge(parents: &[Arc<Class>]) -> Result<Vec<Arc<Class>>> {
    let mut sequences = parents
        .iter()
        .map(|p| p.mro())
        .collect::<Result<Vec<_>>>()?;
    sequences.push(parents.to_vec());

    let mut merged: Vec<Arc<Class>> = Vec::new();
    loop {
        sequences.retain(|s| !s.is_empty());
        if sequences.is_empty() {
            return Ok(merged);
        }

        // A good head appears in no sequence's tail
        let head = sequences
            .iter()
            .map(|s| &s[0])
            .find(|candidate| {
                !sequences
                    .iter()
                    .any(|s| s[1..].iter().any(|c| Arc::ptr_eq(c, candidate)))
            })
            .cloned();

        let head = head.ok_or_else(|| {
            StdlibError::type_error("cannot compute a consistent method resolution order")
        })?;

        for seq in sequences.iter_mut() {
            if Arc::ptr_eq(&seq[0], &head) {
                seq.remove(0);
            }
        }
        merged.push(head);
    }
}

/// Builder for [`Class`].
pub struct ClassBuilder {
    class: Class,
}

impl ClassBuilder {
    /// Set the owning module.
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.class.module = module.into();
        self
    }

    /// Add a parent class (order matters for the MRO).
    pub fn parent(mut self, parent: Arc<Class>) -> Self {
        self.class.parents.push(parent);
        self
    }

    /// Add a native method. Arity -1 means variadic.
    pub fn method(
        mut self,
        name: impl Into<String>,
        arity: i32,
        func: impl Fn(&CallContext, &ObjectRef, &[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        let name = name.into();
        let func: NativeMethodPtr = Arc::new(func);
        self.class.methods.insert(
            name.clone(),
            Method {
                name,
                arity,
                func,
            },
        );
        self
    }

    /// Add a per-instance variable with a default value.
    pub fn variable(mut self, name: impl Into<String>, default: Value) -> Self {
        self.class
            .variables
            .insert(name.into(), Variable::Stored(default));
        self
    }

    /// Add a read-only attribute computed from native state.
    pub fn getter(mut self, name: impl Into<String>, get: NativeGetter) -> Self {
        self.class
            .variables
            .insert(name.into(), Variable::Native { get, set: None });
        self
    }

    /// Add a writable attribute backed by native state.
    pub fn accessor(mut self, name: impl Into<String>, get: NativeGetter, set: NativeSetter) -> Self {
        self.class.variables.insert(
            name.into(),
            Variable::Native {
                get,
                set: Some(set),
            },
        );
        self
    }

    /// Install a class-specific equality.
    pub fn equality(mut self, hook: EqualityHook) -> Self {
        self.class.equality = Some(hook);
        self
    }

    /// Finish the class.
    pub fn build(self) -> Arc<Class> {
        Arc::new(self.class)
    }
}
