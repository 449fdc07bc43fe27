use super::*;
use lume_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

fn frame(name: &str, line: u32) -> CallFrame {
    CallFrame::new(Name::new(name), Span::new(line, 1))
}

#[test]
fn push_pop_counts_balance() {
    let mut stack = CallStack::new(None);
    stack.push(frame("main", 1)).unwrap_or_else(|e| panic!("{e}"));
    stack.push(frame("fib", 2)).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(stack.depth(), 2);
    assert_eq!(stack.current_frame().map(|f| f.name.as_str()), Some("fib"));
    stack.pop();
    stack.pop();
    assert!(stack.is_empty());
    assert_eq!(stack.total_pushes(), stack.total_pops());
}

#[test]
fn overflow_does_not_push() {
    let mut stack = CallStack::new(Some(1));
    assert!(stack.push(frame("a", 1)).is_ok());
    let err = stack.push(frame("b", 2)).err();
    assert_eq!(err.map(|e| e.code()), Some(ErrorCode::StackOverflow));
    assert_eq!(stack.depth(), 1);
    assert_eq!(stack.total_pushes(), 1);
}

#[test]
fn capture_is_most_recent_first() {
    let mut stack = CallStack::new(None);
    for (i, name) in ["outer", "middle", "inner"].into_iter().enumerate() {
        assert!(stack.push(frame(name, i as u32 + 1)).is_ok());
    }
    let trace = stack.capture();
    let names: Vec<&str> = trace.frames().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["inner", "middle", "outer"]);
    assert_eq!(trace.frames()[0].span, Span::new(3, 1));
}
