//! IO module: stream base classes and the buffered decorators

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::{int_arg, object_arg, str_arg, ModuleExports};
use crate::context::CallContext;
use crate::environment::Environment;
use crate::error::{Result, StdlibError};
use crate::io::{positive_size, BufferedReader, BufferedWriter, ObjectStream};
use crate::object::{Class, ObjectRef};
use crate::value::Value;

/// Module path of the IO classes
pub const MODULE: &str = "stdlib:IO";

type ObjectReader = BufferedReader<ObjectStream>;
type ObjectWriter = BufferedWriter<ObjectStream>;

fn not_implemented() -> Result<Value> {
    Err(StdlibError::Raised("Not implemented".to_string()))
}

static READER: Lazy<Arc<Class>> = Lazy::new(|| {
    Class::builder("READER")
        .module(MODULE)
        .method("READ", 1, |_, _, _| not_implemented())
        .method("CLOSE", 0, |_, _, _| Ok(Value::Nothing))
        .build()
});

static WRITER: Lazy<Arc<Class>> = Lazy::new(|| {
    Class::builder("WRITER")
        .module(MODULE)
        .method("WRITE", 1, |_, _, _| not_implemented())
        .method("CLOSE", 0, |_, _, _| Ok(Value::Nothing))
        .build()
});

static READWRITER: Lazy<Arc<Class>> = Lazy::new(|| {
    Class::builder("READWRITER")
        .module(MODULE)
        .parent(reader_class())
        .parent(writer_class())
        .build()
});

static BUFFERED_READER: Lazy<Arc<Class>> = Lazy::new(|| {
    Class::builder("BUFFERED_READER")
        .module(MODULE)
        .parent(reader_class())
        .method("BUFFERED_READER", 1, |ctx, this, args| {
            let inner = wrapped(this, &args[0], "BUFFERED_READER", "READER")?;
            let stream = ObjectStream::reader(ctx, inner, "BUFFERED_READER")?;
            this.set_native(ObjectReader::with_capacity(
                ctx.config.default_buffer_size,
                stream,
            ));
            Ok(Value::Nothing)
        })
        .method("SET_SIZ", 1, |_, this, args| {
            let size = positive_size("SET_SIZ", int_arg("SET_SIZ", &args[0])?)?;
            this.with_native::<ObjectReader, _>("SET_SIZ", |reader| reader.set_capacity(size))?;
            Ok(Value::Nothing)
        })
        .method("READ", 1, |_, this, args| {
            let requested = int_arg("READ", &args[0])?;
            if requested <= 0 {
                return Ok(Value::string(""));
            }
            this.with_native::<ObjectReader, _>("READ", |reader| {
                Ok(Value::string(reader.read(requested as usize)?))
            })
        })
        .method("CLOSE", 0, |_, this, _| {
            this.with_native::<ObjectReader, _>("CLOSE", |reader| reader.close())?;
            Ok(Value::Nothing)
        })
        .getter("SIZ", |this| {
            this.with_native::<ObjectReader, _>("SIZ", |reader| Ok(Value::from(reader.capacity())))
        })
        .build()
});

static BUFFERED_WRITER: Lazy<Arc<Class>> = Lazy::new(|| {
    Class::builder("BUFFERED_WRITER")
        .module(MODULE)
        .parent(writer_class())
        .method("BUFFERED_WRITER", 1, |ctx, this, args| {
            let inner = wrapped(this, &args[0], "BUFFERED_WRITER", "WRITER")?;
            let stream = ObjectStream::writer(ctx, inner, "BUFFERED_WRITER")?;
            this.set_native(ObjectWriter::with_capacity(
                ctx.config.default_buffer_size,
                stream,
            ));
            Ok(Value::Nothing)
        })
        .method("SET_SIZ", 1, |_, this, args| {
            let size = positive_size("SET_SIZ", int_arg("SET_SIZ", &args[0])?)?;
            this.with_native::<ObjectWriter, _>("SET_SIZ", |writer| writer.set_capacity(size))?;
            Ok(Value::Nothing)
        })
        .method("WRITE", 1, |_, this, args| {
            let data = str_arg("WRITE", &args[0])?;
            this.with_native::<ObjectWriter, _>("WRITE", |writer| {
                Ok(Value::from(writer.write(data)?))
            })
        })
        .method("FLUSH", 0, |_, this, _| {
            this.with_native::<ObjectWriter, _>("FLUSH", |writer| writer.flush())?;
            Ok(Value::Nothing)
        })
        .method("CLOSE", 0, |_, this, _| {
            this.with_native::<ObjectWriter, _>("CLOSE", |writer| writer.close())?;
            Ok(Value::Nothing)
        })
        .getter("SIZ", |this| {
            this.with_native::<ObjectWriter, _>("SIZ", |writer| Ok(Value::from(writer.capacity())))
        })
        .build()
});

// The decorator locks its own state while calling the wrapped object
fn wrapped(this: &ObjectRef, arg: &Value, owner: &str, kind: &str) -> Result<ObjectRef> {
    let what = format!("{} constructor", owner);
    let inner = object_arg(&what, &format!("{} object", kind), arg)?;
    if inner.ptr_eq(this) {
        return Err(StdlibError::type_error(format!(
            "{}: cannot wrap itself",
            what
        )));
    }
    Ok(inner.clone())
}

/// The abstract READER class
pub fn reader_class() -> Arc<Class> {
    Arc::clone(&READER)
}

/// The abstract WRITER class
pub fn writer_class() -> Arc<Class> {
    Arc::clone(&WRITER)
}

/// The abstract READWRITER class
pub fn readwriter_class() -> Arc<Class> {
    Arc::clone(&READWRITER)
}

/// The BUFFERED_READER class
pub fn buffered_reader_class() -> Arc<Class> {
    Arc::clone(&BUFFERED_READER)
}

/// The BUFFERED_WRITER class
pub fn buffered_writer_class() -> Arc<Class> {
    Arc::clone(&BUFFERED_WRITER)
}

/// Wrap a language-level reader object in a new BUFFERED_READER.
pub fn buffered_reader(ctx: &CallContext, reader: ObjectRef) -> Result<ObjectRef> {
    Environment::construct(ctx, &buffered_reader_class(), &[Value::Object(reader)])
}

/// Wrap a language-level writer object in a new BUFFERED_WRITER.
pub fn buffered_writer(ctx: &CallContext, writer: ObjectRef) -> Result<ObjectRef> {
    Environment::construct(ctx, &buffered_writer_class(), &[Value::Object(writer)])
}

/// Everything the module exports.
pub fn exports() -> ModuleExports {
    ModuleExports {
        name: "IO",
        classes: vec![
            reader_class(),
            writer_class(),
            readwriter_class(),
            buffered_reader_class(),
            buffered_writer_class(),
        ],
        ..Default::default()
    }
}

/// Install the IO classes into `env`.
pub fn register(env: &mut Environment, declarations: &[&str]) -> Result<()> {
    exports().install(env, declarations)
}
