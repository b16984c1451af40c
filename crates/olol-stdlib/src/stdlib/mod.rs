//! Language bindings for the standard library modules and the module registry
//!
//! Each module exposes a set of classes, functions and variables and a
//! `register` function that installs all of them, or only the named ones,
//! into an [`Environment`].

pub mod arrays;
pub mod file;
pub mod io;
pub mod maps;
pub mod random;
pub mod string;
pub mod time;

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::environment::Environment;
use crate::error::{Result, StdlibError};
use crate::object::{BuiltinFn, Class, ObjectRef};
use crate::value::Value;

/// Installs a module's declarations. An empty list installs everything.
pub type RegisterFn = fn(&mut Environment, &[&str]) -> Result<()>;

/// The declarations a module exports.
#[derive(Debug, Default)]
pub struct ModuleExports {
    /// Module name used in error messages, e.g. `IO`
    pub name: &'static str,
    /// Exported classes
    pub classes: Vec<Arc<Class>>,
    /// Exported free functions
    pub functions: Vec<BuiltinFn>,
    /// Exported global variables
    pub variables: Vec<(String, Value)>,
}

impl ModuleExports {
    /// Install all exports, or only the named ones (case-insensitive).
    pub fn install(&self, env: &mut Environment, declarations: &[&str]) -> Result<()> {
        if declarations.is_empty() {
            for class in &self.classes {
                env.define_class(Arc::clone(class));
            }
            for func in &self.functions {
                env.define_function(func.clone());
            }
            for (name, value) in &self.variables {
                env.define_variable(name.clone(), value.clone());
            }
            debug!(module = self.name, "module imported");
            return Ok(());
        }

        for declaration in declarations {
            let wanted = declaration.to_ascii_uppercase();
            if let Some(class) = self.classes.iter().find(|c| c.name() == wanted) {
                env.define_class(Arc::clone(class));
            } else if let Some(func) = self.functions.iter().find(|f| f.name == wanted) {
                env.define_function(func.clone());
            } else if let Some((name, value)) = self.variables.iter().find(|(n, _)| *n == wanted) {
                env.define_variable(name.clone(), value.clone());
            } else {
                return Err(StdlibError::UnknownDeclaration {
                    module: self.name.to_string(),
                    name: declaration.to_string(),
                });
            }
        }
        debug!(module = self.name, ?declarations, "module imported selectively");
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════

static REGISTRY: Lazy<DashMap<String, RegisterFn>> = Lazy::new(|| {
    let registry = DashMap::new();
    registry.insert("IO".to_string(), io::register as RegisterFn);
    registry.insert("FILE".to_string(), file::register as RegisterFn);
    registry.insert("BUKKIT".to_string(), arrays::register as RegisterFn);
    registry.insert("BASKIT".to_string(), maps::register as RegisterFn);
    registry.insert("STRING".to_string(), string::register as RegisterFn);
    registry.insert("RANDOM".to_string(), random::register as RegisterFn);
    registry.insert("TIME".to_string(), time::register as RegisterFn);
    registry
});

/// Names every module the registry knows, sorted.
pub fn module_names() -> Vec<String> {
    let mut names: Vec<String> = REGISTRY.iter().map(|entry| entry.key().clone()).collect();
    names.sort();
    names
}

/// Add (or replace) a module in the process-wide registry.
pub fn register_module(name: impl Into<String>, register: RegisterFn) {
    let name = name.into().to_ascii_uppercase();
    debug!(module = %name, "module registered");
    REGISTRY.insert(name, register);
}

/// Import a module by name into `env`.
pub fn import(env: &mut Environment, module: &str, declarations: &[&str]) -> Result<()> {
    let register = REGISTRY
        .get(&module.to_ascii_uppercase())
        .map(|entry| *entry.value())
        .ok_or_else(|| StdlibError::UnknownModule {
            name: module.to_string(),
        })?;
    register(env, declarations)
}

impl Environment {
    /// Create an environment with every standard module imported.
    pub fn with_stdlib() -> Result<Self> {
        let mut env = Self::new();
        env.load_stdlib()?;
        Ok(env)
    }

    /// Import every registered module into this environment.
    pub fn load_stdlib(&mut self) -> Result<()> {
        for name in module_names() {
            import(self, &name, &[])?;
        }
        Ok(())
    }

    /// Import a module, optionally only the named declarations.
    pub fn import(&mut self, module: &str, declarations: &[&str]) -> Result<()> {
        import(self, module, declarations)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Argument Helpers
// ═══════════════════════════════════════════════════════════════════════

pub(crate) fn int_arg(operation: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| StdlibError::expected(operation, "INTEGR", value))
}

pub(crate) fn str_arg<'a>(operation: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| StdlibError::expected(operation, "STRIN", value))
}

pub(crate) fn double_arg(operation: &str, value: &Value) -> Result<f64> {
    match value {
        Value::Double(n) => Ok(*n),
        Value::Integer(n) => Ok(*n as f64),
        other => Err(StdlibError::expected(operation, "DUBBLE", other)),
    }
}

pub(crate) fn object_arg<'a>(operation: &str, expected: &str, value: &'a Value) -> Result<&'a ObjectRef> {
    value
        .as_object()
        .ok_or_else(|| StdlibError::expected(operation, expected, value))
}
