//! Error types for standard library operations

use thiserror::Error;

use crate::value::Value;

/// Main error type for standard library operations.
///
/// Every variant renders a human-readable message; that message is what the
/// embedding interpreter raises as the language-level exception text.
#[derive(Error, Debug)]
pub enum StdlibError {
    /// Wrong value kind supplied to an operation
    #[error("Type error: {message}")]
    TypeError {
        /// Description of the mismatch
        message: String,
    },

    /// Array index outside `[0, len)`
    #[error("Array index {index} out of bounds (size {len})")]
    IndexOutOfRange {
        /// Requested index
        index: i64,
        /// Container length at the time of the call
        len: usize,
    },

    /// Slice bounds invalid after negative-index normalization
    #[error("Slice indices out of bounds: start={start}, end={end}, size={len}")]
    SliceOutOfRange {
        /// Normalized start index
        start: i64,
        /// Normalized end index
        end: i64,
        /// Container length
        len: usize,
    },

    /// POP/SHIFT (or a random choice) on an empty array
    #[error("cannot {operation} from empty array")]
    EmptyContainer {
        /// The operation that needed an element
        operation: &'static str,
    },

    /// Map lookup on an absent key
    #[error("Key '{key}' not found")]
    KeyNotFound {
        /// The canonical key text
        key: String,
    },

    /// OPEN on a document that is already open
    #[error("File is already open")]
    AlreadyOpen,

    /// Operation on a document that is not open
    #[error("File is not open")]
    NotOpen,

    /// Read on a write-only document or write on a read-only one
    #[error("File is not open for {access}")]
    WrongMode {
        /// `reading` or `writing`
        access: &'static str,
    },

    /// A wrapped stream's READ/WRITE/CLOSE failed
    #[error("{operation}: {context}: {source}")]
    Stream {
        /// Decorator operation that triggered the failure (e.g. `BUFFERED_READER.READ`)
        operation: &'static str,
        /// What the decorator was doing
        context: &'static str,
        /// The underlying failure
        #[source]
        source: Box<StdlibError>,
    },

    /// Operating system I/O failure
    #[error("{operation}: {source}")]
    Io {
        /// Description of the attempted operation
        operation: String,
        /// The OS error
        #[source]
        source: std::io::Error,
    },

    /// Argument of the right kind but an unacceptable value
    #[error("{0}")]
    InvalidArgument(String),

    /// Wrong number of arguments
    #[error("{name} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        /// Function or method name
        name: String,
        /// Expected argument count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// Class lookup failed
    #[error("undefined class '{name}'")]
    UndefinedClass {
        /// Class name
        name: String,
    },

    /// Method lookup failed along the whole MRO
    #[error("undefined member function '{name}' on {class}")]
    UndefinedMethod {
        /// Class of the receiver
        class: String,
        /// Method name
        name: String,
    },

    /// Free function lookup failed
    #[error("undefined function '{name}'")]
    UndefinedFunction {
        /// Function name
        name: String,
    },

    /// Attribute lookup failed
    #[error("undefined variable '{name}' on {class}")]
    UndefinedVariable {
        /// Class of the receiver
        class: String,
        /// Variable name
        name: String,
    },

    /// Assignment to a read-only attribute
    #[error("cannot assign to read-only variable '{name}'")]
    ReadOnlyVariable {
        /// Variable name
        name: String,
    },

    /// Selective import named something the module does not export
    #[error("unknown {module} declaration: {name}")]
    UnknownDeclaration {
        /// Module name
        module: String,
        /// Requested declaration
        name: String,
    },

    /// Import of a module that is not registered
    #[error("unknown module: {name}")]
    UnknownModule {
        /// Module name
        name: String,
    },

    /// Exception raised by a native method on behalf of user code
    #[error("{0}")]
    Raised(String),
}

impl StdlibError {
    /// Build a `TypeError` with the given message.
    pub fn type_error(message: impl Into<String>) -> Self {
        StdlibError::TypeError {
            message: message.into(),
        }
    }

    /// Build a `TypeError` of the form `"<what> expects <expected>, got <TYPE>"`.
    pub fn expected(what: &str, expected: &str, got: &Value) -> Self {
        StdlibError::type_error(format!("{} expects {}, got {}", what, expected, type_name(got)))
    }

    /// Wrap a failure from a wrapped stream with the decorator operation that hit it.
    pub fn stream(operation: &'static str, context: &'static str, source: StdlibError) -> Self {
        StdlibError::Stream {
            operation,
            context,
            source: Box::new(source),
        }
    }

    /// Wrap an OS error.
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        StdlibError::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type alias for standard library operations
pub type Result<T> = std::result::Result<T, StdlibError>;

/// The language-level type name of a value.
pub fn type_name(value: &Value) -> String {
    match value {
        Value::Nothing => "NOTHIN".to_string(),
        Value::Bool(_) => "BOOL".to_string(),
        Value::Integer(_) => "INTEGR".to_string(),
        Value::Double(_) => "DUBBLE".to_string(),
        Value::String(_) => "STRIN".to_string(),
        Value::Object(obj) => obj.class_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_found_includes_key() {
        let err = StdlibError::KeyNotFound {
            key: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "Key 'missing' not found");
    }

    #[test]
    fn test_expected_message() {
        let err = StdlibError::expected("JOIN", "STRIN separator", &Value::Integer(1));
        assert_eq!(
            err.to_string(),
            "Type error: JOIN expects STRIN separator, got INTEGR"
        );
    }

    #[test]
    fn test_stream_error_keeps_context() {
        let err = StdlibError::stream(
            "BUFFERED_WRITER.FLUSH",
            "error writing to underlying stream",
            StdlibError::NotOpen,
        );
        assert_eq!(
            err.to_string(),
            "BUFFERED_WRITER.FLUSH: error writing to underlying stream: File is not open"
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&Value::Nothing), "NOTHIN");
        assert_eq!(type_name(&Value::Bool(true)), "BOOL");
        assert_eq!(type_name(&Value::Integer(1)), "INTEGR");
        assert_eq!(type_name(&Value::Double(1.5)), "DUBBLE");
        assert_eq!(type_name(&Value::string("x")), "STRIN");
    }
}
