//! BUKKIT class binding

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::{int_arg, str_arg, ModuleExports};
use crate::containers::Bukkit;
use crate::environment::Environment;
use crate::error::Result;
use crate::object::{Class, ObjectRef};
use crate::value::Value;

/// Module path of the array class
pub const MODULE: &str = "stdlib:BUKKIT";

static BUKKIT: Lazy<Arc<Class>> = Lazy::new(|| {
    Class::builder("BUKKIT")
        .module(MODULE)
        .method("BUKKIT", 0, |_, this, _| {
            this.set_native(Bukkit::new());
            Ok(Value::Nothing)
        })
        .method("AT", 1, |_, this, args| {
            let index = int_arg("AT", &args[0])?;
            with_items(this, "AT", |items| items.at(index))
        })
        .method("SET", 2, |_, this, args| {
            let index = int_arg("SET", &args[0])?;
            let value = args[1].clone();
            with_items(this, "SET", |items| items.set(index, value))?;
            Ok(Value::Nothing)
        })
        .method("PUSH", 1, |_, this, args| {
            let value = args[0].clone();
            with_items(this, "PUSH", |items| Ok(Value::from(items.push(value))))
        })
        .method("POP", 0, |_, this, _| {
            with_items(this, "POP", Bukkit::pop)
        })
        .method("SHIFT", 0, |_, this, _| {
            with_items(this, "SHIFT", Bukkit::shift)
        })
        .method("UNSHIFT", 1, |_, this, args| {
            let value = args[0].clone();
            with_items(this, "UNSHIFT", |items| Ok(Value::from(items.unshift(value))))
        })
        .method("CLEAR", 0, |_, this, _| {
            with_items(this, "CLEAR", |items| {
                items.clear();
                Ok(())
            })?;
            Ok(Value::Nothing)
        })
        .method("REVERSE", 0, |_, this, _| {
            with_items(this, "REVERSE", |items| {
                items.reverse();
                Ok(())
            })?;
            Ok(Value::Object(this.clone()))
        })
        .method("SORT", 0, |_, this, _| {
            with_items(this, "SORT", |items| {
                items.sort();
                Ok(())
            })?;
            Ok(Value::Object(this.clone()))
        })
        .method("JOIN", 1, |_, this, args| {
            let separator = str_arg("JOIN", &args[0])?;
            with_items(this, "JOIN", |items| Ok(Value::string(items.join(separator))))
        })
        .method("SLICE", 2, |_, this, args| {
            let start = int_arg("SLICE", &args[0])?;
            let end = int_arg("SLICE", &args[1])?;
            let slice = with_items(this, "SLICE", |items| items.slice(start, end))?;
            Ok(Value::array(slice))
        })
        .method("FIND", 1, |_, this, args| {
            with_items(this, "FIND", |items| Ok(Value::Integer(items.find(&args[0]))))
        })
        .method("CONTAINS", 1, |_, this, args| {
            with_items(this, "CONTAINS", |items| Ok(Value::Bool(items.contains(&args[0]))))
        })
        .method("COPY", 0, |_, this, _| {
            let copy = with_items(this, "COPY", |items| Ok(items.clone()))?;
            Ok(Value::array(copy))
        })
        .getter("SIZ", |this| {
            with_items(this, "SIZ", |items| Ok(Value::from(items.len())))
        })
        .build()
});

/// Run `f` on an array object's storage under its lock.
pub fn with_items<R>(
    object: &ObjectRef,
    operation: &str,
    f: impl FnOnce(&mut Bukkit) -> Result<R>,
) -> Result<R> {
    object.with_native::<Bukkit, R>(operation, f)
}

/// The BUKKIT class
pub fn bukkit_class() -> Arc<Class> {
    Arc::clone(&BUKKIT)
}

/// A new BUKKIT instance holding `items`.
pub fn new_bukkit(items: Bukkit) -> ObjectRef {
    ObjectRef::with_native_state(bukkit_class(), items)
}

/// Everything the module exports.
pub fn exports() -> ModuleExports {
    ModuleExports {
        name: "BUKKIT",
        classes: vec![bukkit_class()],
        ..Default::default()
    }
}

/// Install BUKKIT into `env`.
pub fn register(env: &mut Environment, declarations: &[&str]) -> Result<()> {
    exports().install(env, declarations)
}
