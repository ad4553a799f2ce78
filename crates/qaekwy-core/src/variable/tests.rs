//! Tests for variables (builder, wire format, vector views).

use proptest::prelude::*;
use serde_json::{json, Value};

use super::*;
use crate::error::ModelError;
use crate::wire::WireMap;

fn as_map(value: Value) -> WireMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

// ============================================================================
// Builder Tests
// ============================================================================

#[test]
fn test_scalar_defaults() {
    let x = Variable::integer("x").bounds(0, 10).build().unwrap();
    assert_eq!(x.name(), "x");
    assert_eq!(x.value_kind(), ValueKind::Integer);
    assert_eq!(x.brancher_value(), BranchValue::Random);
    assert_eq!(x.brancher_variable(), None);
    assert_eq!(x.branching_order(), -1);
    assert!(x.is_scalar());
}

#[test]
fn test_conflicting_domains_rejected() {
    let err = Variable::integer("x")
        .bounds(0, 10)
        .specific_domain([1, 2, 3])
        .build()
        .unwrap_err();
    assert_eq!(err.code(), "MODEL_CONFIGURATION");

    let err = Variable::float("y")
        .expression(Expression::raw("z + 1"))
        .bounds(0.0, 1.0)
        .build()
        .unwrap_err();
    assert_eq!(err.code(), "MODEL_CONFIGURATION");
}

#[test]
fn test_array_rejects_expression_and_zero_length() {
    assert!(Variable::integer_array("a", 3)
        .expression("b")
        .build()
        .is_err());
    assert!(Variable::integer_array("a", 0).build().is_err());
    assert!(Variable::integer_matrix("m", 0, 3).build().is_err());
}

#[test]
fn test_strategy_must_match_kind() {
    let err = Variable::boolean("flag")
        .brancher_value(BranchValue::Median)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("VAL_MED"));

    assert!(Variable::boolean_array("flags", 4)
        .brancher_variable(BranchVariable::SizeMin)
        .build()
        .is_err());
    assert!(Variable::float_array("f", 4)
        .brancher_variable(BranchVariable::SizeMin)
        .build()
        .is_ok());
}

#[test]
fn test_set_branching_order() {
    let mut x = Variable::integer("x").build().unwrap();
    x.set_branching_order(3);
    assert_eq!(x.branching_order(), 3);
}

// ============================================================================
// Matrix Identifier Tests
// ============================================================================

#[test]
fn test_matrix_name_is_prefixed() {
    let m = Variable::integer_matrix("grid", 3, 4).build().unwrap();
    assert_eq!(m.name(), "MATRIX$3$4$grid");
    assert_eq!(m.len(), 12);
    assert_eq!(m.grid(), (3, 4));
    assert_eq!(m.type_tag(), "integer_array");
}

#[test]
fn test_matching_prefix_is_kept() {
    let m = Variable::integer_matrix("MATRIX$3$4$grid", 3, 4)
        .build()
        .unwrap();
    assert_eq!(m.name(), "MATRIX$3$4$grid");
}

#[test]
fn test_mismatched_prefix_is_configuration_error() {
    let err = Variable::integer_matrix("MATRIX$3$4$grid", 4, 3)
        .build()
        .unwrap_err();
    assert!(matches!(err, ModelError::Configuration(_)));
}

proptest! {
    #[test]
    fn prop_matrix_identifier(rows in 1usize..50, cols in 1usize..50, base in "[a-z]{1,10}") {
        let m = Variable::integer_matrix(base.clone(), rows, cols).build().unwrap();
        let expected = format!("MATRIX${rows}${cols}${base}");
        prop_assert_eq!(m.name(), expected.as_str());

        let again = Variable::integer_matrix(m.name(), rows, cols).build().unwrap();
        prop_assert_eq!(again.name(), m.name());

        let wrong = Variable::integer_matrix(m.name(), rows + 1, cols).build();
        prop_assert!(matches!(wrong, Err(ModelError::Configuration(_))));
    }
}

// ============================================================================
// Access and Vector View Tests
// ============================================================================

#[test]
fn test_element_and_cell_access() {
    let a = Variable::integer_array("a", 5).build().unwrap();
    assert_eq!(a.at(2).to_string(), "a[2]");

    let m = Variable::integer_matrix("m", 2, 3).build().unwrap();
    assert_eq!(m.cell(1, 2).to_string(), "MATRIX$2$3$m[5]");
    assert_eq!(m.cell(0, 1).to_string(), "MATRIX$2$3$m[1]");
}

#[test]
fn test_vector_view_notation() {
    let m = Variable::integer_matrix("m", 3, 3).build().unwrap();
    assert_eq!(m.row(1).to_string(), "MATRIX$3$3$m[3][3][r][1]");
    assert_eq!(m.col(2).to_string(), "MATRIX$3$3$m[3][3][c][2]");
    assert_eq!(
        m.slice(0, 1, 1, 2).to_string(),
        "MATRIX$3$3$m[3][3][s][0][1][2][3]"
    );
    assert_eq!(m.row(0).sum().to_string(), "sum(MATRIX$3$3$m[3][3][r][0])");
}

#[test]
fn test_row_and_col_iteration() {
    let m = Variable::integer_matrix("m", 2, 3).build().unwrap();
    let row: Vec<String> = m.row(1).iter().map(|e| e.to_string()).collect();
    assert_eq!(
        row,
        vec!["MATRIX$2$3$m[3]", "MATRIX$2$3$m[4]", "MATRIX$2$3$m[5]"]
    );
    let col: Vec<String> = m.col(2).iter().map(|e| e.to_string()).collect();
    assert_eq!(col, vec!["MATRIX$2$3$m[2]", "MATRIX$2$3$m[5]"]);
}

#[test]
fn test_slice_iteration_is_inclusive_and_restartable() {
    let m = Variable::integer_matrix("m", 4, 4).build().unwrap();
    let view = m.slice(1, 1, 2, 3);
    assert_eq!(view.len(), 2 * 3);

    let first: Vec<Expression> = view.iter().collect();
    let second: Vec<Expression> = view.into_iter().collect();
    assert_eq!(first.len(), 6);
    assert_eq!(first, second);
    assert_eq!(first[0].to_string(), "MATRIX$4$4$m[5]");
    assert_eq!(first[5].to_string(), "MATRIX$4$4$m[11]");
}

#[test]
fn test_variable_operators() {
    let x = Variable::integer("x").build().unwrap();
    assert_eq!((&x + 1).to_string(), "(x + 1)");
    assert_eq!((&x * &x).to_string(), "x * x");
    assert_eq!((-&x).to_string(), "(-1) * (x)");
    assert_eq!(x.expr().le(4).to_string(), "((x) <= (4))");
}

// ============================================================================
// Wire Format Tests
// ============================================================================

#[test]
fn test_scalar_wire_shape() {
    let x = Variable::integer("x").bounds(0, 10).build().unwrap();
    assert_eq!(
        Value::Object(x.to_wire()),
        json!({
            "name": "x",
            "type": "integer",
            "brancher_value": "VAL_RND",
            "branching_order": -1,
            "domlow": 0,
            "domup": 10
        })
    );
}

#[test]
fn test_expression_variable_wire_shape() {
    let y = Variable::integer("y")
        .expression(Expression::raw("x") * 2)
        .build()
        .unwrap();
    let wire = y.to_wire();
    assert_eq!(wire["expr"], json!("x * 2"));
    assert!(!wire.contains_key("domlow"));
    assert_eq!(Variable::from_wire(&wire).unwrap(), y);
}

#[test]
fn test_array_wire_shape() {
    let a = Variable::integer_array("a", 3).bounds(0, 5).build().unwrap();
    let wire = Value::Object(a.to_wire());
    assert_eq!(
        wire,
        json!({
            "name": "a",
            "type": "integer_array",
            "length": 3,
            "brancher_variable": "VAR_RND",
            "brancher_value": "VAL_RND",
            "branching_order": -1,
            "domlow": 0,
            "domup": 5
        })
    );
}

#[test]
fn test_matrix_wire_round_trip() {
    let m = Variable::float_matrix("w", 2, 2)
        .specific_domain([0.5, 1.5])
        .brancher_variable(BranchVariable::DegreeMax)
        .branching_order(2)
        .build()
        .unwrap();
    let wire = m.to_wire();
    assert_eq!(wire["subtype"], json!("matrix"));
    assert_eq!(wire["rows"], json!(2));
    assert_eq!(wire["length"], json!(4));
    assert_eq!(wire["specific_domain"], json!([0.5, 1.5]));

    let back = Variable::from_wire(&wire).unwrap();
    assert_eq!(back, m);
    assert_eq!(back.name(), "MATRIX$2$2$w");
}

#[test]
fn test_unknown_type_tag() {
    let wire = as_map(json!({"name": "x", "type": "complex", "brancher_value": "VAL_RND"}));
    assert_eq!(
        Variable::from_wire(&wire).unwrap_err(),
        ModelError::UnsupportedVariableType("complex".into())
    );
}

#[test]
fn test_wire_strategy_must_match_kind() {
    let wire = as_map(json!({"name": "b", "type": "boolean", "brancher_value": "VAL_MED"}));
    let err = Variable::from_wire(&wire).unwrap_err();
    assert_eq!(err.code(), "MODEL_MALFORMED_WIRE");
}

#[test]
fn test_wire_missing_branching_order_defaults() {
    let wire = as_map(json!({"name": "x", "type": "integer", "brancher_value": "VAL_MIN"}));
    let x = Variable::from_wire(&wire).unwrap();
    assert_eq!(x.branching_order(), -1);
    assert_eq!(x.domain(), &Domain::Unrestricted);
    assert_eq!(x.brancher_value(), BranchValue::Min);
}

#[test]
fn test_wire_matrix_with_mismatched_prefix() {
    let wire = as_map(json!({
        "name": "MATRIX$2$2$w",
        "type": "integer_array",
        "length": 6,
        "brancher_variable": "VAR_RND",
        "brancher_value": "VAL_RND",
        "rows": 2,
        "cols": 3,
        "subtype": "matrix"
    }));
    assert!(matches!(
        Variable::from_wire(&wire),
        Err(ModelError::Configuration(_))
    ));
}
