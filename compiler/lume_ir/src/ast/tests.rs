use super::*;
use crate::build::*;

#[test]
fn parser_output_is_unannotated() {
    let r = VarRef::new("x", Span::DUMMY);
    assert_eq!(r.resolution, Resolution::Unresolved);
    let d = VarDecl::new("x", Span::DUMMY);
    assert_eq!(d.slot, None);
    assert_eq!(UnitInfo::default().slot_count(), 0);
}

#[test]
fn binding_pattern_declarations_in_order() {
    let pattern = BindingPattern::List {
        items: vec![decl("a"), decl("b")],
        rest: Some(decl("tail")),
    };
    let names: Vec<&str> = pattern.decls().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "tail"]);
}

#[test]
fn operator_classification() {
    assert!(BinaryOp::Mod.is_arithmetic());
    assert!(BinaryOp::LtEq.is_comparison());
    assert!(!BinaryOp::And.is_comparison());
    assert!(BinaryOp::Or.is_short_circuit());
    assert_eq!(UpdateOp::Decrement.delta(), -1.0);
}

#[test]
fn mutability_from_flag() {
    assert!(Mutability::from_mutable(true).is_mutable());
    assert!(!Mutability::from_mutable(false).is_mutable());
}
