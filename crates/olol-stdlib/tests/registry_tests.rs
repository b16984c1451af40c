//! Module registry and environment tests

use olol_stdlib::*;
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ═══════════════════════════════════════════════════════════════════════
// Importing
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_full_stdlib() {
    init_tracing();
    let env = Environment::with_stdlib().unwrap();

    for class in [
        "BUKKIT",
        "BASKIT",
        "READER",
        "WRITER",
        "READWRITER",
        "BUFFERED_READER",
        "BUFFERED_WRITER",
        "DOCUMENT",
        "CABINET",
        "DATE",
    ] {
        assert!(env.get_class(class).is_some(), "missing class {}", class);
    }
    for func in ["LEN", "CONCAT", "SEED", "UUID", "SLEEP"] {
        assert!(env.get_function(func).is_some(), "missing function {}", func);
    }
    assert!(env.get_variable("SEP").is_some());
}

#[test]
fn test_selective_import_is_case_insensitive() {
    let mut env = Environment::new();
    env.import("string", &["upper", "Lower"]).unwrap();

    assert_eq!(env.function_names(), vec!["UPPER", "LOWER"]);
    assert!(env.get_function("TRIM").is_none());
}

#[test]
fn test_unknown_declaration() {
    let mut env = Environment::new();
    let err = env.import("BUKKIT", &["BASKIT"]).unwrap_err();
    assert_eq!(err.to_string(), "unknown BUKKIT declaration: BASKIT");
}

#[test]
fn test_unknown_module() {
    let mut env = Environment::new();
    let err = import(&mut env, "SOCKETS", &[]).unwrap_err();
    assert!(matches!(err, StdlibError::UnknownModule { .. }));
}

#[test]
fn test_file_brings_stream_hierarchy() {
    let mut env = Environment::new();
    env.import("FILE", &["CABINET"]).unwrap();

    let mut classes = env.class_names();
    classes.sort();
    assert_eq!(classes, vec!["CABINET", "READER", "READWRITER", "WRITER"]);
}

#[test]
fn test_custom_module_registration() {
    fn register(env: &mut Environment, declarations: &[&str]) -> Result<()> {
        ModuleExports {
            name: "GREETINGS",
            functions: vec![BuiltinFn::new("HAI", 0, |_, _| Ok(Value::string("HAI")))],
            ..Default::default()
        }
        .install(env, declarations)
    }

    register_module("greetings", register);
    assert!(module_names().contains(&"GREETINGS".to_string()));

    let mut env = Environment::new();
    env.import("GREETINGS", &[]).unwrap();
    let ctx = CallContext::new();
    assert_eq!(
        env.call_function(&ctx, "HAI", &[]).unwrap(),
        Value::string("HAI")
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Classes Across Modules
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_user_subclass_of_bukkit() {
    let ctx = CallContext::new();
    let stack = Class::builder("STACK")
        .parent(stdlib::arrays::bukkit_class())
        .method("STACK", 0, |ctx, this, _| {
            // Reuse the parent constructor for native storage
            let parent = stdlib::arrays::bukkit_class();
            let init = parent.find_method("BUKKIT")?.ok_or_else(|| {
                StdlibError::type_error("BUKKIT constructor missing")
            })?;
            init.call(ctx, this, &[])
        })
        .method("PEEK", 0, |ctx, this, _| {
            let len = this.get_variable("SIZ")?.to_integer()?;
            this.call(ctx, "AT", &[Value::Integer(len - 1)])
        })
        .build();

    let obj = Environment::construct(&ctx, &stack, &[]).unwrap();
    obj.call(&ctx, "PUSH", &[Value::Integer(1)]).unwrap();
    obj.call(&ctx, "PUSH", &[Value::Integer(2)]).unwrap();

    assert!(obj.is_instance_of("BUKKIT"));
    assert_eq!(obj.call(&ctx, "PEEK", &[]).unwrap(), Value::Integer(2));
    assert_eq!(obj.get_variable("SIZ").unwrap(), Value::Integer(2));
}
