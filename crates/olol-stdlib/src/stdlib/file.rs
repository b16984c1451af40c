//! FILE module: DOCUMENT and CABINET classes and the SEP variable

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::{int_arg, str_arg, ModuleExports};
use crate::containers::Bukkit;
use crate::environment::Environment;
use crate::error::{Result, StdlibError};
use crate::fs::{separator, Cabinet, Document, FileMode};
use crate::object::{Class, ObjectRef};
use crate::value::Value;

/// Module path of the filesystem classes
pub const MODULE: &str = "stdlib:FILE";

static DOCUMENT: Lazy<Arc<Class>> = Lazy::new(|| {
    Class::builder("DOCUMENT")
        .module(MODULE)
        .parent(super::io::readwriter_class())
        .method("DOCUMENT", 2, |_, this, args| {
            let path = str_arg("DOCUMENT", &args[0])?;
            let mode: FileMode = str_arg("DOCUMENT", &args[1])?.parse()?;
            this.set_native(Document::new(path, mode));
            Ok(Value::Nothing)
        })
        .method("OPEN", 0, |_, this, _| {
            with_document(this, "OPEN", Document::open)?;
            Ok(Value::Nothing)
        })
        .method("READ", 1, |_, this, args| {
            let requested = int_arg("READ", &args[0])?;
            with_document(this, "READ", |doc| {
                // Mode and open checks still apply to empty reads
                let n = usize::try_from(requested).unwrap_or(0);
                Ok(Value::string(doc.read(n)?))
            })
        })
        .method("WRITE", 1, |_, this, args| {
            let data = str_arg("WRITE", &args[0])?;
            with_document(this, "WRITE", |doc| Ok(Value::from(doc.write(data)?)))
        })
        .method("SEEK", 1, |_, this, args| {
            let position = int_arg("SEEK", &args[0])?;
            let position = u64::try_from(position).map_err(|_| {
                StdlibError::InvalidArgument(format!(
                    "SEEK: position must be non-negative, got {}",
                    position
                ))
            })?;
            with_document(this, "SEEK", |doc| doc.seek(position))?;
            Ok(Value::Nothing)
        })
        .method("TELL", 0, |_, this, _| {
            let position = with_document(this, "TELL", Document::tell)?;
            Ok(Value::Integer(position as i64))
        })
        .method("FLUSH", 0, |_, this, _| {
            with_document(this, "FLUSH", Document::flush)?;
            Ok(Value::Nothing)
        })
        .method("CLOSE", 0, |_, this, _| {
            with_document(this, "CLOSE", Document::close)?;
            Ok(Value::Nothing)
        })
        .method("EXISTS", 0, |_, this, _| {
            with_document(this, "EXISTS", |doc| Ok(Value::Bool(doc.exists())))
        })
        .method("DELETE", 0, |_, this, _| {
            with_document(this, "DELETE", Document::delete)?;
            Ok(Value::Nothing)
        })
        .getter("PATH", |this| {
            with_document(this, "PATH", |doc| {
                Ok(Value::string(doc.path().to_string_lossy()))
            })
        })
        .getter("MODE", |this| {
            with_document(this, "MODE", |doc| Ok(Value::string(doc.mode().as_str())))
        })
        .getter("IS_OPEN", |this| {
            with_document(this, "IS_OPEN", |doc| Ok(Value::Bool(doc.is_open())))
        })
        .getter("SIZ", |this| {
            with_document(this, "SIZ", |doc| Ok(Value::Integer(doc.size()? as i64)))
        })
        .accessor(
            "RWX",
            |this| with_document(this, "RWX", |doc| Ok(Value::Integer(doc.permissions()? as i64))),
            |this, value| {
                let bits = int_arg("RWX", &value)?;
                let bits = u32::try_from(bits).map_err(|_| {
                    StdlibError::InvalidArgument(format!("RWX: invalid permission bits {}", bits))
                })?;
                with_document(this, "RWX", |doc| doc.set_permissions(bits))
            },
        )
        .build()
});

static CABINET: Lazy<Arc<Class>> = Lazy::new(|| {
    Class::builder("CABINET")
        .module(MODULE)
        .method("CABINET", 1, |_, this, args| {
            let path = str_arg("CABINET", &args[0])?;
            this.set_native(Cabinet::new(path));
            Ok(Value::Nothing)
        })
        .method("EXISTS", 0, |_, this, _| {
            with_cabinet(this, "EXISTS", |dir| Ok(Value::Bool(dir.exists())))
        })
        .method("LIST", 0, |_, this, _| {
            let names = with_cabinet(this, "LIST", |dir| dir.list())?;
            Ok(names_to_array(names))
        })
        .method("CREATE", 0, |_, this, _| {
            with_cabinet(this, "CREATE", |dir| dir.create())?;
            Ok(Value::Nothing)
        })
        .method("DELETE", 0, |_, this, _| {
            with_cabinet(this, "DELETE", |dir| dir.delete())?;
            Ok(Value::Nothing)
        })
        .method("DELETE_ALL", 0, |_, this, _| {
            with_cabinet(this, "DELETE_ALL", |dir| dir.delete_all())?;
            Ok(Value::Nothing)
        })
        .method("FIND", 1, |_, this, args| {
            let pattern = str_arg("FIND", &args[0])?;
            let names = with_cabinet(this, "FIND", |dir| dir.find(pattern))?;
            Ok(names_to_array(names))
        })
        .getter("PATH", |this| {
            with_cabinet(this, "PATH", |dir| {
                Ok(Value::string(dir.path().to_string_lossy()))
            })
        })
        .build()
});

fn with_document<R>(
    object: &ObjectRef,
    operation: &str,
    f: impl FnOnce(&mut Document) -> Result<R>,
) -> Result<R> {
    object.with_native::<Document, R>(operation, f)
}

fn with_cabinet<R>(
    object: &ObjectRef,
    operation: &str,
    f: impl FnOnce(&mut Cabinet) -> Result<R>,
) -> Result<R> {
    object.with_native::<Cabinet, R>(operation, f)
}

fn names_to_array(names: Vec<String>) -> Value {
    Value::array(names.into_iter().map(Value::string).collect::<Bukkit>())
}

/// The DOCUMENT class
pub fn document_class() -> Arc<Class> {
    Arc::clone(&DOCUMENT)
}

/// The CABINET class
pub fn cabinet_class() -> Arc<Class> {
    Arc::clone(&CABINET)
}

/// Everything the module exports.
pub fn exports() -> ModuleExports {
    ModuleExports {
        name: "FILE",
        classes: vec![document_class(), cabinet_class()],
        variables: vec![("SEP".to_string(), Value::string(separator()))],
        ..Default::default()
    }
}

/// Install the FILE declarations into `env`, along with the IO stream
/// classes DOCUMENT inherits from.
pub fn register(env: &mut Environment, declarations: &[&str]) -> Result<()> {
    super::io::exports().install(env, &["READWRITER", "READER", "WRITER"])?;
    exports().install(env, declarations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CallContext;

    #[test]
    fn test_document_is_a_readwriter() {
        let ctx = CallContext::new();
        let doc = Environment::construct(
            &ctx,
            &document_class(),
            &[Value::string("notes.txt"), Value::string("r")],
        )
        .unwrap();
        assert!(doc.is_instance_of("READWRITER"));
        assert!(doc.is_instance_of("READER"));
        assert_eq!(doc.get_variable("MODE").unwrap(), Value::string("R"));
        assert_eq!(doc.get_variable("IS_OPEN").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_invalid_mode() {
        let ctx = CallContext::new();
        let err = Environment::construct(
            &ctx,
            &document_class(),
            &[Value::string("notes.txt"), Value::string("Q")],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid file mode: Q. Valid modes: R, W, RW, A"
        );
    }

    #[test]
    fn test_read_before_open() {
        let ctx = CallContext::new();
        let doc = Environment::construct(
            &ctx,
            &document_class(),
            &[Value::string("notes.txt"), Value::string("R")],
        )
        .unwrap();
        let err = doc.call(&ctx, "READ", &[Value::Integer(4)]).unwrap_err();
        assert!(matches!(err, StdlibError::NotOpen));
        assert_eq!(doc.call(&ctx, "CLOSE", &[]).unwrap(), Value::Nothing);
    }

    #[test]
    fn test_register_pulls_in_stream_classes() {
        let mut env = Environment::new();
        register(&mut env, &["DOCUMENT"]).unwrap();
        assert!(env.get_class("DOCUMENT").is_some());
        assert!(env.get_class("READWRITER").is_some());
        assert!(env.get_class("CABINET").is_none());
        assert!(env.get_variable("SEP").is_none());
    }
}
