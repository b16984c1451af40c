//! BUFFERED_READER tests against language-level source objects

use std::sync::Arc;

use olol_stdlib::*;
use pretty_assertions::assert_eq;

/// Test source: serves `text` in pieces of at most `chunk` bytes (and at
/// most the requested size when `honor_max` is set).
struct Source {
    text: String,
    position: usize,
    chunk: usize,
    honor_max: bool,
    calls: usize,
    calls_after_eof: usize,
    closed: bool,
}

fn source_class() -> Arc<Class> {
    Class::builder("SOURCE")
        .parent(stdlib::io::reader_class())
        .method("READ", 1, |_, this, args| {
            let max = args[0].as_i64().unwrap() as usize;
            this.with_native::<Source, _>("READ", |src| {
                if src.position >= src.text.len() && src.calls > 0 {
                    src.calls_after_eof += 1;
                }
                src.calls += 1;
                let mut take = src.chunk.min(src.text.len() - src.position);
                if src.honor_max {
                    take = take.min(max);
                }
                let piece = src.text[src.position..src.position + take].to_string();
                src.position += take;
                Ok(Value::string(piece))
            })
        })
        .method("CLOSE", 0, |_, this, _| {
            this.with_native::<Source, _>("CLOSE", |src| {
                src.closed = true;
                Ok(Value::Nothing)
            })
        })
        .getter("CALLS", |this| {
            this.with_native::<Source, _>("CALLS", |src| Ok(Value::from(src.calls)))
        })
        .build()
}

fn source(text: &str, chunk: usize, honor_max: bool) -> ObjectRef {
    ObjectRef::with_native_state(
        source_class(),
        Source {
            text: text.to_string(),
            position: 0,
            chunk,
            honor_max,
            calls: 0,
            calls_after_eof: 0,
            closed: false,
        },
    )
}

fn buffered(ctx: &CallContext, src: &ObjectRef, size: i64) -> ObjectRef {
    let reader = stdlib::io::buffered_reader(ctx, src.clone()).unwrap();
    reader.call(ctx, "SET_SIZ", &[Value::Integer(size)]).unwrap();
    reader
}

fn read(ctx: &CallContext, reader: &ObjectRef, n: i64) -> String {
    reader
        .call(ctx, "READ", &[Value::Integer(n)])
        .unwrap()
        .as_str()
        .unwrap()
        .to_string()
}

// ═══════════════════════════════════════════════════════════════════════
// Refill Behavior
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_hello_world_with_size_bounded_source() {
    let ctx = CallContext::new();
    let src = source("Hello, World!", usize::MAX, true);
    let reader = buffered(&ctx, &src, 5);

    assert_eq!(read(&ctx, &reader, 5), "Hello");
    assert_eq!(src.get_variable("CALLS").unwrap(), Value::Integer(1));
    assert_eq!(read(&ctx, &reader, 3), ", W");
    assert_eq!(src.get_variable("CALLS").unwrap(), Value::Integer(2));
}

#[test]
fn test_hello_world_with_eager_source() {
    let ctx = CallContext::new();
    let src = source("Hello, World!", usize::MAX, false);
    let reader = buffered(&ctx, &src, 5);

    assert_eq!(read(&ctx, &reader, 5), "Hello");
    assert_eq!(read(&ctx, &reader, 3), ", W");
    assert_eq!(src.get_variable("CALLS").unwrap(), Value::Integer(1));
    assert_eq!(read(&ctx, &reader, 100), "orld!");
}

#[test]
fn test_large_request_asks_for_more_than_capacity() {
    let ctx = CallContext::new();
    let src = source("abcdefghijklmnopqrstuvwxyz", usize::MAX, true);
    let reader = buffered(&ctx, &src, 4);

    assert_eq!(read(&ctx, &reader, 20), "abcdefghijklmnopqrst");
    assert_eq!(src.get_variable("CALLS").unwrap(), Value::Integer(1));
}

// ═══════════════════════════════════════════════════════════════════════
// Round Trip
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_round_trip_over_small_chunks() {
    let ctx = CallContext::new();
    let text = "The quick brown fox jumps over the lazy dog, twice over.";

    for (chunk, size, reads) in [
        (1usize, 3i64, vec![1i64, 2, 7]),
        (3, 8, vec![5, 5, 1]),
        (7, 2, vec![9, 4]),
        (64, 16, vec![100]),
    ] {
        let src = source(text, chunk, true);
        let reader = buffered(&ctx, &src, size);

        let mut collected = String::new();
        let mut lengths = Vec::new();
        'outer: loop {
            for &k in &reads {
                let piece = read(&ctx, &reader, k);
                if piece.is_empty() {
                    break 'outer;
                }
                assert!(piece.len() as i64 <= k);
                lengths.push(piece.len());
                collected.push_str(&piece);
            }
        }

        assert_eq!(collected, text);
        assert_eq!(read(&ctx, &reader, 10), "");
        let after_eof = src
            .with_native::<Source, _>("TEST", |s| Ok(s.calls_after_eof))
            .unwrap();
        assert!(after_eof <= 1, "source read {} times past the end", after_eof);
    }
}

#[test]
fn test_exhausted_reader_stops_calling_source() {
    let ctx = CallContext::new();
    let src = source("abc", usize::MAX, true);
    let reader = buffered(&ctx, &src, 8);

    assert_eq!(read(&ctx, &reader, 10), "abc");
    let calls = src.get_variable("CALLS").unwrap();
    assert_eq!(read(&ctx, &reader, 10), "");
    assert_eq!(read(&ctx, &reader, 1), "");
    assert_eq!(src.get_variable("CALLS").unwrap(), calls);
}

#[test]
fn test_non_positive_read_is_empty() {
    let ctx = CallContext::new();
    let src = source("abc", usize::MAX, true);
    let reader = buffered(&ctx, &src, 8);

    assert_eq!(read(&ctx, &reader, 0), "");
    assert_eq!(read(&ctx, &reader, -4), "");
    assert_eq!(src.get_variable("CALLS").unwrap(), Value::Integer(0));
}

// ═══════════════════════════════════════════════════════════════════════
// Construction and Configuration
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_default_size_comes_from_config() {
    let ctx = CallContext::with_config(StdlibConfig::new().with_default_buffer_size(64));
    let reader = stdlib::io::buffered_reader(&ctx, source("x", 1, true)).unwrap();
    assert_eq!(reader.get_variable("SIZ").unwrap(), Value::Integer(64));

    let ctx = CallContext::new();
    let reader = stdlib::io::buffered_reader(&ctx, source("x", 1, true)).unwrap();
    assert_eq!(
        reader.get_variable("SIZ").unwrap(),
        Value::from(DEFAULT_BUFFER_SIZE)
    );
}

#[test]
fn test_set_size_must_be_positive() {
    let ctx = CallContext::new();
    let reader = stdlib::io::buffered_reader(&ctx, source("x", 1, true)).unwrap();
    let err = reader
        .call(&ctx, "SET_SIZ", &[Value::Integer(0)])
        .unwrap_err();
    assert!(matches!(err, StdlibError::InvalidArgument(_)));
    assert_eq!(reader.get_variable("SIZ").unwrap(), Value::Integer(1024));
}

#[test]
fn test_rejects_object_without_read() {
    let ctx = CallContext::new();
    let no_read = ObjectRef::new(
        Class::builder("SINK")
            .method("CLOSE", 0, |_, _, _| Ok(Value::Nothing))
            .build(),
    );
    let err = stdlib::io::buffered_reader(&ctx, no_read).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Type error: BUFFERED_READER constructor: provided object does not have READ method"
    );
}

#[test]
fn test_stacked_decorators() {
    let ctx = CallContext::new();
    let src = source("stacked readers", 2, true);
    let inner = buffered(&ctx, &src, 3);
    let outer = buffered(&ctx, &inner, 5);

    assert_eq!(read(&ctx, &outer, 7), "stacked");
    assert_eq!(read(&ctx, &outer, 50), " readers");
}

#[test]
fn test_source_failure_is_wrapped() {
    let ctx = CallContext::new();
    let failing = ObjectRef::new(
        Class::builder("BROKEN")
            .parent(stdlib::io::reader_class())
            .build(),
    );
    let reader = stdlib::io::buffered_reader(&ctx, failing).unwrap();
    let err = reader
        .call(&ctx, "READ", &[Value::Integer(1)])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "BUFFERED_READER.READ: error reading from underlying reader: Not implemented"
    );
}

#[test]
fn test_non_string_read_result() {
    let ctx = CallContext::new();
    let numbers = ObjectRef::new(
        Class::builder("NUMBERS")
            .method("READ", 1, |_, _, _| Ok(Value::Integer(5)))
            .method("CLOSE", 0, |_, _, _| Ok(Value::Nothing))
            .build(),
    );
    let reader = stdlib::io::buffered_reader(&ctx, numbers).unwrap();
    let err = reader
        .call(&ctx, "READ", &[Value::Integer(1)])
        .unwrap_err();
    assert!(err
        .to_string()
        .ends_with("read: underlying reader returned non-string value: INTEGR"));
}

#[test]
fn test_close_propagates_and_exhausts() {
    let ctx = CallContext::new();
    let src = source("abcdef", usize::MAX, true);
    let reader = buffered(&ctx, &src, 2);

    assert_eq!(read(&ctx, &reader, 1), "a");
    reader.call(&ctx, "CLOSE", &[]).unwrap();
    assert!(src
        .with_native::<Source, _>("TEST", |s| Ok(s.closed))
        .unwrap());
    assert_eq!(read(&ctx, &reader, 4), "");
}
