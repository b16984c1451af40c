//! BASKIT class binding

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::{object_arg, ModuleExports};
use crate::containers::{Baskit, Bukkit};
use crate::environment::Environment;
use crate::error::Result;
use crate::object::{Class, ObjectRef};
use crate::value::Value;

/// Module path of the map class
pub const MODULE: &str = "stdlib:BASKIT";

static BASKIT: Lazy<Arc<Class>> = Lazy::new(|| {
    Class::builder("BASKIT")
        .module(MODULE)
        .method("BASKIT", 0, |_, this, _| {
            this.set_native(Baskit::new());
            Ok(Value::Nothing)
        })
        .method("PUT", 2, |_, this, args| {
            let value = args[1].clone();
            with_entries(this, "PUT", |map| {
                map.put(&args[0], value);
                Ok(())
            })?;
            Ok(Value::Nothing)
        })
        .method("GET", 1, |_, this, args| {
            with_entries(this, "GET", |map| map.get(&args[0]))
        })
        .method("CONTAINS", 1, |_, this, args| {
            with_entries(this, "CONTAINS", |map| Ok(Value::Bool(map.contains(&args[0]))))
        })
        .method("REMOVE", 1, |_, this, args| {
            with_entries(this, "REMOVE", |map| map.remove(&args[0]))
        })
        .method("CLEAR", 0, |_, this, _| {
            with_entries(this, "CLEAR", |map| {
                map.clear();
                Ok(())
            })?;
            Ok(Value::Nothing)
        })
        .method("KEYS", 0, |_, this, _| {
            let keys = with_entries(this, "KEYS", |map| Ok(map.keys()))?;
            Ok(Value::array(keys))
        })
        .method("VALUES", 0, |_, this, _| {
            let values = with_entries(this, "VALUES", |map| Ok(map.values()))?;
            Ok(Value::array(values))
        })
        .method("PAIRS", 0, |_, this, _| {
            let entries = with_entries(this, "PAIRS", |map| Ok(map.entries()))?;
            let pairs: Bukkit = entries
                .into_iter()
                .map(|(key, value)| Value::array(vec![Value::string(key), value].into()))
                .collect();
            Ok(Value::array(pairs))
        })
        .method("MERGE", 1, |_, this, args| {
            let other = object_arg("MERGE", "BASKIT", &args[0])?;
            // Merging a map into itself changes nothing
            if !other.ptr_eq(this) {
                let incoming = with_entries(other, "MERGE", |map| Ok(map.clone()))?;
                with_entries(this, "MERGE", |map| {
                    map.merge(&incoming);
                    Ok(())
                })?;
            }
            Ok(Value::Object(this.clone()))
        })
        .method("COPY", 0, |_, this, _| {
            let copy = with_entries(this, "COPY", |map| Ok(map.clone()))?;
            Ok(Value::map(copy))
        })
        .getter("SIZ", |this| {
            with_entries(this, "SIZ", |map| Ok(Value::from(map.len())))
        })
        .build()
});

/// Run `f` on a map object's entries under its lock.
pub fn with_entries<R>(
    object: &ObjectRef,
    operation: &str,
    f: impl FnOnce(&mut Baskit) -> Result<R>,
) -> Result<R> {
    object.with_native::<Baskit, R>(operation, f)
}

/// The BASKIT class
pub fn baskit_class() -> Arc<Class> {
    Arc::clone(&BASKIT)
}

/// A new BASKIT instance holding `entries`.
pub fn new_baskit(entries: Baskit) -> ObjectRef {
    ObjectRef::with_native_state(baskit_class(), entries)
}

/// Everything the module exports.
pub fn exports() -> ModuleExports {
    ModuleExports {
        name: "BASKIT",
        classes: vec![baskit_class()],
        ..Default::default()
    }
}

/// Install BASKIT into `env`.
pub fn register(env: &mut Environment, declarations: &[&str]) -> Result<()> {
    exports().install(env, declarations)
}
