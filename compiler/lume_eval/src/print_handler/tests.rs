#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn buffer_collects_lines_and_fragments() {
    let handler = BufferPrintHandler::new();
    handler.print("a");
    handler.print(" b");
    handler.println("");
    handler.println("c");
    assert_eq!(handler.get_output(), "a b\nc\n");
}

#[test]
fn clear_resets_the_buffer() {
    let handler = buffer_handler();
    handler.println("first");
    handler.clear();
    handler.println("second");
    assert_eq!(handler.get_output(), "second\n");
}

#[test]
fn stdout_and_silent_capture_nothing() {
    for handler in [stdout_handler(), silent_handler()] {
        handler.clear();
        assert_eq!(handler.get_output(), "");
    }
    let silent = silent_handler();
    silent.println("dropped");
    assert_eq!(silent.get_output(), "");
}

#[test]
fn shared_buffer_is_safe_across_threads() {
    let handler = buffer_handler();
    let other = Arc::clone(&handler);
    let worker = std::thread::spawn(move || {
        for _ in 0..50 {
            other.println("x");
        }
    });
    for _ in 0..50 {
        handler.println("y");
    }
    worker.join().unwrap();
    assert_eq!(handler.get_output().lines().count(), 100);
}
