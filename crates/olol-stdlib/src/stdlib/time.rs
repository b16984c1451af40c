//! TIME module: the DATE class and SLEEP

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::{double_arg, str_arg, ModuleExports};
use crate::environment::Environment;
use crate::error::Result;
use crate::object::{BuiltinFn, Class, ClassBuilder, ObjectRef};
use crate::time::{sleep, Date};
use crate::value::Value;

/// Module path of the time classes
pub const MODULE: &str = "stdlib:TIME";

fn component(builder: ClassBuilder, name: &'static str, part: fn(&Date) -> i64) -> ClassBuilder {
    builder.method(name, 0, move |_, this, _| {
        with_date(this, name, |date| Ok(Value::Integer(part(date))))
    })
}

static DATE: Lazy<Arc<Class>> = Lazy::new(|| {
    let builder = Class::builder("DATE")
        .module(MODULE)
        .method("DATE", 0, |_, this, _| {
            this.set_native(Date::now());
            Ok(Value::Nothing)
        })
        .method("FORMAT", 1, |_, this, args| {
            let layout = str_arg("FORMAT", &args[0])?;
            with_date(this, "FORMAT", |date| Ok(Value::string(date.format(layout)?)))
        });

    let parts: [(&'static str, fn(&Date) -> i64); 8] = [
        ("YEAR", Date::year),
        ("MONTH", Date::month),
        ("DAY", Date::day),
        ("HOUR", Date::hour),
        ("MINUTE", Date::minute),
        ("SECOND", Date::second),
        ("MILLISECOND", Date::millisecond),
        ("NANOSECOND", Date::nanosecond),
    ];
    parts
        .into_iter()
        .fold(builder, |builder, (name, part)| component(builder, name, part))
        .build()
});

fn with_date<R>(object: &ObjectRef, operation: &str, f: impl FnOnce(&Date) -> Result<R>) -> Result<R> {
    object.with_native::<Date, R>(operation, |date| f(date))
}

/// The DATE class
pub fn date_class() -> Arc<Class> {
    Arc::clone(&DATE)
}

/// Everything the module exports.
pub fn exports() -> ModuleExports {
    ModuleExports {
        name: "TIME",
        classes: vec![date_class()],
        functions: vec![BuiltinFn::new("SLEEP", 1, |_, args| {
            sleep(double_arg("SLEEP", &args[0])?)?;
            Ok(Value::Nothing)
        })],
        ..Default::default()
    }
}

/// Install the TIME declarations into `env`.
pub fn register(env: &mut Environment, declarations: &[&str]) -> Result<()> {
    exports().install(env, declarations)
}
