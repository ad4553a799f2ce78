//! Shared fixtures for Qaekwy tests.
//!
//! Provides a small set of variables covering every shape and value kind,
//! plus canned engine payloads for decoder and response tests.

use serde_json::{json, Value};

use qaekwy_core::{Variable, WireMap};

/// Integer scalar `x` in [0, 10].
pub fn x() -> Variable {
    Variable::integer("x")
        .bounds(0, 10)
        .build()
        .expect("fixture variable")
}

/// Integer scalar `y` in [0, 100].
pub fn y() -> Variable {
    Variable::integer("y")
        .bounds(0, 100)
        .build()
        .expect("fixture variable")
}

/// Integer scalar `z` in [-50, 50].
pub fn z() -> Variable {
    Variable::integer("z")
        .bounds(-50, 50)
        .build()
        .expect("fixture variable")
}

/// Float scalar `f` in [0.0, 6.5].
pub fn f() -> Variable {
    Variable::float("f")
        .bounds(0.0, 6.5)
        .build()
        .expect("fixture variable")
}

/// Integer array `a` of length 3 in [0, 5].
pub fn a() -> Variable {
    Variable::integer_array("a", 3)
        .bounds(0, 5)
        .build()
        .expect("fixture variable")
}

/// 3x3 integer matrix `grid` in [1, 9].
pub fn grid() -> Variable {
    Variable::integer_matrix("grid", 3, 3)
        .bounds(1, 9)
        .build()
        .expect("fixture variable")
}

/// All fixture variables, scalars first.
pub fn variables() -> Vec<Variable> {
    vec![x(), y(), z(), f(), a(), grid()]
}

/// Unwraps a JSON object literal.
pub fn wire(value: Value) -> WireMap {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture is not an object: {other}"),
    }
}

/// Solution records for scalar `x = 4`, array `a = [1, 0, 2]` emitted out of
/// order, and a fully assigned 2x2 matrix `m`.
pub fn solution_records() -> Value {
    json!([
        {"name": "x", "assigned": true, "value": 4},
        {"name": "a", "assigned": true, "value": 2, "position": 2},
        {"name": "a", "assigned": true, "value": 1, "position": 0},
        {"name": "a", "assigned": true, "value": 0, "position": 1},
        {"name": "MATRIX$2$2$m", "assigned": true, "value": 1, "position": 0},
        {"name": "MATRIX$2$2$m", "assigned": true, "value": 2, "position": 1},
        {"name": "MATRIX$2$2$m", "assigned": true, "value": 3, "position": 2},
        {"name": "MATRIX$2$2$m", "assigned": true, "value": 4, "position": 3}
    ])
}

/// A successful solve response wrapping [`solution_records`].
pub fn solution_response() -> Value {
    json!({
        "status": "Ok",
        "message": "2 solution(s) found",
        "content": [solution_records(), [{"name": "x", "assigned": true, "value": 7}]]
    })
}

/// An engine status payload for a running node.
pub fn status_response() -> Value {
    json!({
        "status": "Ok",
        "message": "Solving",
        "type": "status",
        "code": 1,
        "busy_node": true,
        "current_solution_found": 3
    })
}
