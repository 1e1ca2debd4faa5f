//! Tests for the fixed value-kind table
//!
//! These tests verify:
//! - Type-code order matches the protocol's documented schema
//! - Bidirectional code/name lookup
//! - The settable subset
//! - Scalar equality coercion

use gdtlink::protocol::{ALL_KINDS, SETTABLE_KINDS};
use gdtlink::{GdtError, ParamValue, ValueKind};

// =============================================================================
// Table Order Tests
// =============================================================================

#[test]
fn value_kind_table_order() {
    // The wire contract: 1-based positional codes in this exact order.
    let expected = [
        "unknownValue",
        "boolValue",
        "textValue",
        "intervalValue",
        "enumValue",
        "uIntervalValue",
        "ullIntervalValue",
        "udidValueValue",
        "llIntervalValue",
        "sIntervalValue",
        "usIntervalValue",
        "iPv4Value",
        "eui48Value",
        "iPv6Value",
        "multiValue",
        "dIntervalValue",
        "container",
        "addToContainer",
        "removeFromContainer",
        "timeValValue",
    ];

    assert_eq!(ALL_KINDS.len(), expected.len());
    for (i, name) in expected.iter().enumerate() {
        let code = (i + 1) as u8;
        let kind = ValueKind::from_code(code).unwrap();
        assert_eq!(kind, ALL_KINDS[i]);
        assert_eq!(kind.code(), code);
        assert_eq!(kind.name(), *name);
    }
}

#[test]
fn name_lookup_round_trips() {
    for kind in ALL_KINDS {
        assert_eq!(ValueKind::from_name(kind.name()).unwrap(), kind);
    }
}

#[test]
fn code_zero_is_unknown_type() {
    let result = ValueKind::from_code(0);
    assert!(matches!(result, Err(GdtError::UnknownType(_))));
}

#[test]
fn code_past_table_is_unknown_type() {
    let result = ValueKind::from_code(21);
    assert!(matches!(result, Err(GdtError::UnknownType(_))));
}

#[test]
fn bogus_name_is_unknown_type() {
    let result = ValueKind::from_name("floatValue");
    assert!(matches!(result, Err(GdtError::UnknownType(_))));
}

// =============================================================================
// Settable Subset Tests
// =============================================================================

#[test]
fn exactly_nine_kinds_are_settable() {
    assert_eq!(SETTABLE_KINDS.len(), 9);

    let settable_count = ALL_KINDS.iter().filter(|k| k.is_settable()).count();
    assert_eq!(settable_count, 9);
}

#[test]
fn container_kinds_are_not_settable() {
    assert!(!ValueKind::Container.is_settable());
    assert!(!ValueKind::AddToContainer.is_settable());
    assert!(!ValueKind::RemoveFromContainer.is_settable());
}

// =============================================================================
// Scalar Equality Tests
// =============================================================================

#[test]
fn int_and_uint_scalars_compare_by_value() {
    assert_eq!(ParamValue::Int(42), ParamValue::UInt(42));
    assert_eq!(ParamValue::UInt(42), ParamValue::Int(42));
    assert_ne!(ParamValue::Int(-1), ParamValue::UInt(u64::MAX));
}

#[test]
fn mismatched_scalar_shapes_never_compare_equal() {
    assert_ne!(ParamValue::Text("1".to_string()), ParamValue::Int(1));
    assert_ne!(ParamValue::Bool(true), ParamValue::Int(1));
}
