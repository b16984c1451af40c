//! RANDOM module: functions drawing from the context's generator

use super::arrays::with_items;
use super::{double_arg, int_arg, object_arg, str_arg, ModuleExports};
use crate::containers::Bukkit;
use crate::environment::Environment;
use crate::error::Result;
use crate::object::BuiltinFn;
use crate::value::Value;

fn functions() -> Vec<BuiltinFn> {
    vec![
        BuiltinFn::new("SEED", 1, |ctx, args| {
            let seed = int_arg("SEED", &args[0])?;
            ctx.random().seed(seed as u64);
            Ok(Value::Nothing)
        }),
        BuiltinFn::new("SEED_TIME", 0, |ctx, _| {
            ctx.random().seed_from_time();
            Ok(Value::Nothing)
        }),
        BuiltinFn::new("RANDOM_FLOAT", 0, |ctx, _| {
            Ok(Value::Double(ctx.random().next_f64()))
        }),
        BuiltinFn::new("RANDOM_RANGE", 2, |ctx, args| {
            let min = double_arg("RANDOM_RANGE", &args[0])?;
            let max = double_arg("RANDOM_RANGE", &args[1])?;
            Ok(Value::Double(ctx.random().range_f64(min, max)?))
        }),
        BuiltinFn::new("RANDOM_INT", 2, |ctx, args| {
            let min = int_arg("RANDOM_INT", &args[0])?;
            let max = int_arg("RANDOM_INT", &args[1])?;
            Ok(Value::Integer(ctx.random().int_range(min, max)?))
        }),
        BuiltinFn::new("RANDOM_BOOL", 0, |ctx, _| {
            Ok(Value::Bool(ctx.random().bool()))
        }),
        BuiltinFn::new("RANDOM_CHOICE", 1, |ctx, args| {
            let array = object_arg("RANDOM_CHOICE", "BUKKIT", &args[0])?;
            with_items(array, "RANDOM_CHOICE", |items| {
                let index = ctx.random().index(items.len())?;
                items.at(index as i64)
            })
        }),
        BuiltinFn::new("SHUFFLE", 1, |ctx, args| {
            let array = object_arg("SHUFFLE", "BUKKIT", &args[0])?;
            let mut items = with_items(array, "SHUFFLE", |items| Ok(items.clone().into_vec()))?;
            ctx.random().shuffle(&mut items);
            Ok(Value::array(Bukkit::from(items)))
        }),
        BuiltinFn::new("RANDOM_STRING", 2, |ctx, args| {
            let len = int_arg("RANDOM_STRING", &args[0])?;
            let charset = str_arg("RANDOM_STRING", &args[1])?;
            if len <= 0 {
                return Ok(Value::string(""));
            }
            Ok(Value::string(ctx.random().random_string(len as usize, charset)?))
        }),
        BuiltinFn::new("UUID", 0, |ctx, _| {
            Ok(Value::string(ctx.random().uuid().to_string()))
        }),
    ]
}

/// Everything the module exports.
pub fn exports() -> ModuleExports {
    ModuleExports {
        name: "RANDOM",
        functions: functions(),
        ..Default::default()
    }
}

/// Install the RANDOM functions into `env`.
pub fn register(env: &mut Environment, declarations: &[&str]) -> Result<()> {
    exports().install(env, declarations)
}
