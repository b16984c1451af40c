//! Adapter from language-level stream objects to [`Reader`] / [`Writer`]

use super::{Reader, Writer};
use crate::context::CallContext;
use crate::error::{type_name, Result, StdlibError};
use crate::object::ObjectRef;
use crate::value::Value;

/// A language object used as a stream by calling its `READ`, `WRITE` and
/// `CLOSE` methods.
#[derive(Debug, Clone)]
pub struct ObjectStream {
    object: ObjectRef,
    ctx: CallContext,
}

impl ObjectStream {
    /// Adapt an object that must expose `READ` and `CLOSE`.
    pub fn reader(ctx: &CallContext, object: ObjectRef, owner: &str) -> Result<Self> {
        Self::checked(ctx, object, owner, &["READ", "CLOSE"])
    }

    /// Adapt an object that must expose `WRITE` and `CLOSE`.
    pub fn writer(ctx: &CallContext, object: ObjectRef, owner: &str) -> Result<Self> {
        Self::checked(ctx, object, owner, &["WRITE", "CLOSE"])
    }

    fn checked(ctx: &CallContext, object: ObjectRef, owner: &str, required: &[&str]) -> Result<Self> {
        for method in required {
            if !object.has_method(method) {
                return Err(StdlibError::type_error(format!(
                    "{} constructor: provided object does not have {} method",
                    owner, method
                )));
            }
        }
        Ok(Self {
            object,
            ctx: ctx.clone(),
        })
    }

    /// The wrapped object
    pub fn object(&self) -> &ObjectRef {
        &self.object
    }
}

impl Reader for ObjectStream {
    fn read(&mut self, max: usize) -> Result<String> {
        let result = self
            .object
            .call(&self.ctx, "READ", &[Value::Integer(max as i64)])?;
        match result {
            Value::String(s) => Ok(String::clone(&s)),
            other => Err(StdlibError::type_error(format!(
                "read: underlying reader returned non-string value: {}",
                type_name(&other)
            ))),
        }
    }

    fn close(&mut self) -> Result<()> {
        self.object.call(&self.ctx, "CLOSE", &[])?;
        Ok(())
    }
}

impl Writer for ObjectStream {
    fn write(&mut self, data: &str) -> Result<usize> {
        let result = self
            .object
            .call(&self.ctx, "WRITE", &[Value::string(data)])?;
        Ok(match result {
            Value::Integer(n) if n >= 0 => n as usize,
            _ => data.len(),
        })
    }

    fn close(&mut self) -> Result<()> {
        self.object.call(&self.ctx, "CLOSE", &[])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Class;

    #[test]
    fn test_missing_methods_are_rejected() {
        let ctx = CallContext::new();
        let class = Class::builder("ONLY_READ")
            .method("READ", 1, |_, _, _| Ok(Value::string("")))
            .build();
        let obj = ObjectRef::new(class);

        let err = ObjectStream::reader(&ctx, obj.clone(), "BUFFERED_READER").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Type error: BUFFERED_READER constructor: provided object does not have CLOSE method"
        );
        assert!(ObjectStream::writer(&ctx, obj, "BUFFERED_WRITER").is_err());
    }

    #[test]
    fn test_non_string_read_is_type_error() {
        let ctx = CallContext::new();
        let class = Class::builder("NUMBERS")
            .method("READ", 1, |_, _, _| Ok(Value::Integer(1)))
            .method("CLOSE", 0, |_, _, _| Ok(Value::Nothing))
            .build();
        let mut stream = ObjectStream::reader(&ctx, ObjectRef::new(class), "TEST").unwrap();
        let err = Reader::read(&mut stream, 4).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Type error: read: underlying reader returned non-string value: INTEGR"
        );
    }
}
