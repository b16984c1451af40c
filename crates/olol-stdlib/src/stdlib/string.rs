//! STRING module: free functions over STRIN values

use super::{int_arg, str_arg, ModuleExports};
use crate::containers::Bukkit;
use crate::environment::Environment;
use crate::error::Result;
use crate::object::BuiltinFn;
use crate::strings;
use crate::value::Value;

fn unary(name: &'static str, f: fn(&str) -> String) -> BuiltinFn {
    BuiltinFn::new(name, 1, move |_, args| {
        Ok(Value::string(f(str_arg(name, &args[0])?)))
    })
}

fn functions() -> Vec<BuiltinFn> {
    vec![
        BuiltinFn::new("LEN", 1, |_, args| {
            Ok(Value::from(strings::len(str_arg("LEN", &args[0])?)))
        }),
        BuiltinFn::new("CONCAT", -1, |_, args| {
            Ok(Value::string(
                args.iter().map(Value::to_string).collect::<String>(),
            ))
        }),
        BuiltinFn::new("SUBSTR", 3, |_, args| {
            let s = str_arg("SUBSTR", &args[0])?;
            let start = int_arg("SUBSTR", &args[1])?;
            let length = int_arg("SUBSTR", &args[2])?;
            Ok(Value::string(strings::substr(s, start, length)))
        }),
        unary("TRIM", |s| s.trim().to_string()),
        unary("LTRIM", |s| s.trim_start().to_string()),
        unary("RTRIM", |s| s.trim_end().to_string()),
        BuiltinFn::new("REPEAT", 2, |_, args| {
            let s = str_arg("REPEAT", &args[0])?;
            let count = int_arg("REPEAT", &args[1])?;
            Ok(Value::string(strings::repeat(s, count)?))
        }),
        unary("UPPER", str::to_uppercase),
        unary("LOWER", str::to_lowercase),
        unary("TITLE", strings::title),
        unary("CAPITALIZE", strings::capitalize),
        BuiltinFn::new("SPLIT", 2, |_, args| {
            let s = str_arg("SPLIT", &args[0])?;
            let separator = str_arg("SPLIT", &args[1])?;
            let parts: Bukkit = strings::split(s, separator)
                .into_iter()
                .map(Value::string)
                .collect();
            Ok(Value::array(parts))
        }),
        BuiltinFn::new("REPLACE", 3, |_, args| {
            let s = str_arg("REPLACE", &args[0])?;
            let from = str_arg("REPLACE", &args[1])?;
            let to = str_arg("REPLACE", &args[2])?;
            Ok(Value::string(strings::replace_first(s, from, to)))
        }),
        BuiltinFn::new("REPLACE_ALL", 3, |_, args| {
            let s = str_arg("REPLACE_ALL", &args[0])?;
            let from = str_arg("REPLACE_ALL", &args[1])?;
            let to = str_arg("REPLACE_ALL", &args[2])?;
            Ok(Value::string(s.replace(from, to)))
        }),
        BuiltinFn::new("CONTAINS", 2, |_, args| {
            let s = str_arg("CONTAINS", &args[0])?;
            let needle = str_arg("CONTAINS", &args[1])?;
            Ok(Value::Bool(s.contains(needle)))
        }),
        BuiltinFn::new("INDEX_OF", 2, |_, args| {
            let s = str_arg("INDEX_OF", &args[0])?;
            let needle = str_arg("INDEX_OF", &args[1])?;
            Ok(Value::Integer(strings::index_of(s, needle)))
        }),
    ]
}

/// Everything the module exports.
pub fn exports() -> ModuleExports {
    ModuleExports {
        name: "STRING",
        functions: functions(),
        ..Default::default()
    }
}

/// Install the STRING functions into `env`.
pub fn register(env: &mut Environment, declarations: &[&str]) -> Result<()> {
    exports().install(env, declarations)
}
