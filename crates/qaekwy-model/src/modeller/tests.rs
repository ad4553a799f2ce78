//! Tests for the Modeller document contract.

use serde_json::{json, Value};

use qaekwy_core::{ModelError, RandomNames, SearcherType, SequentialNames, Variable};
use qaekwy_test::{a, grid, variables, wire, x, y};

use super::*;
use crate::constraint::{ConstraintKind, DistinctSelection};

fn keys(map: &WireMap) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

/// `x` in [0, 10], `a` of length 3 in [0, 5], all-different `a`, maximize `x`.
fn example() -> Modeller {
    let (x, a) = (x(), a());
    let mut model = Modeller::new();
    model
        .add_constraint(Constraint::distinct(&a).unwrap())
        .add_objective(Objective::maximize(&x))
        .add_variable(x)
        .add_variable(a)
        .set_searcher(SearcherType::Dfs)
        .set_solution_limit(1);
    model
}

/// Every variable fixture, a constraint touching each shape, a meta cutoff
/// and a callback.
fn full() -> Modeller {
    let mut model = Modeller::new();
    for variable in variables() {
        model.add_variable(variable);
    }
    let (x, y, a, grid) = (x(), y(), a(), grid());
    model
        .add_constraint(Constraint::relational(x.expr().lt(&y)))
        .add_constraint(Constraint::element(&a, &x, &y).unwrap())
        .add_constraint(Constraint::distinct_col(&grid, 0).unwrap())
        .add_constraint(Constraint::if_then_else(
            x.expr().gt(5),
            y.expr().eq(1),
            y.expr().eq(2),
        ))
        .add_objective(Objective::minimize(&y))
        .set_searcher(SearcherType::Bab)
        .set_cutoff(Cutoff::merger(
            Cutoff::Luby { scale: 10 },
            Cutoff::Constant { value: 50 },
        ))
        .set_callback_url("https://example.invalid/hook")
        .set_solution_limit(5);
    model
}

// ============================================================================
// Serialization Tests
// ============================================================================

#[test]
fn test_end_to_end_document() {
    let map = example().serialize(true).unwrap();

    assert_eq!(
        keys(&map),
        ["var", "constraint", "specific", "solution_limit", "searcher"]
    );
    assert_eq!(
        map["var"],
        json!([Value::Object(x().to_wire()), Value::Object(a().to_wire())])
    );
    assert_eq!(
        map["constraint"],
        json!([{"name": "c0", "type": "distinct", "v1": "a", "selection": "standard"}])
    );
    assert_eq!(map["specific"], json!([{"var": "x", "type": "maximize"}]));
    assert_eq!(map["solution_limit"], json!(1));
    assert_eq!(map["searcher"], json!("DFS"));
}

#[test]
fn test_inspection_document_omits_searcher() {
    let map = example().serialize(false).unwrap();
    assert!(!map.contains_key("searcher"));
    assert_eq!(keys(&map), ["var", "constraint", "specific", "solution_limit"]);
}

#[test]
fn test_final_without_searcher_fails() {
    let mut model = Modeller::new();
    model.add_variable(x());
    assert_eq!(
        model.serialize(true).unwrap_err(),
        ModelError::MissingSearchStrategy
    );
    assert!(model.serialize(false).is_ok());
}

#[test]
fn test_empty_model_has_required_keys() {
    let map = Modeller::new().serialize(false).unwrap();
    assert_eq!(map["var"], json!([]));
    assert_eq!(map["constraint"], json!([]));
    assert_eq!(map["specific"], json!([]));
    assert_eq!(map["solution_limit"], json!(1));
}

#[test]
fn test_zero_solution_limit_is_rejected() {
    let mut model = example();
    model.set_solution_limit(0);
    assert!(matches!(
        model.serialize(false),
        Err(ModelError::Configuration(_))
    ));
}

#[test]
fn test_cutoff_key_follows_meta_flag() {
    let mut model = example();
    model.set_cutoff(Cutoff::Fibonacci);
    let map = model.serialize(true).unwrap();
    assert_eq!(map["cutoff"], json!({"name": "fibonacci"}));
    assert!(!map.contains_key("meta_cutoff"));

    model.set_cutoff(Cutoff::repeater(Cutoff::Linear { scale: 2 }, 3));
    let map = model.serialize(true).unwrap();
    assert!(!map.contains_key("cutoff"));
    assert_eq!(map["meta_cutoff"]["name"], json!("repeater"));
}

#[test]
fn test_callback_url_is_last() {
    let map = full().serialize(true).unwrap();
    assert_eq!(
        keys(&map),
        [
            "var",
            "constraint",
            "specific",
            "solution_limit",
            "searcher",
            "meta_cutoff",
            "callback_url"
        ]
    );
    assert_eq!(map["callback_url"], json!("https://example.invalid/hook"));
}

// ============================================================================
// Naming Tests
// ============================================================================

#[test]
fn test_unnamed_constraints_get_sequential_names() {
    let model = full();
    let names: Vec<_> = model.constraints().iter().map(|c| c.name()).collect();
    assert_eq!(names, [Some("c0"), Some("c1"), Some("c2"), Some("c3")]);
}

#[test]
fn test_given_names_are_kept_and_do_not_consume_the_sequence() {
    let a = a();
    let mut model = Modeller::new().with_name_generator(SequentialNames::new("k"));
    model
        .add_constraint(Constraint::sorted(&a).unwrap().with_name("order"))
        .add_constraint(Constraint::distinct(&a).unwrap());
    let names: Vec<_> = model.constraints().iter().map(|c| c.name()).collect();
    assert_eq!(names, [Some("order"), Some("k0")]);
}

#[test]
fn test_generated_name_skips_caller_supplied_name() {
    let (x, y) = (x(), y());
    let mut model = Modeller::new();
    model
        .add_constraint(Constraint::relational(x.expr().le(&y)).with_name("c0"))
        .add_constraint(Constraint::relational(x.expr().ge(&y)));
    let names: Vec<_> = model.constraints().iter().map(|c| c.name()).collect();
    assert_eq!(names, [Some("c0"), Some("c1")]);
}

#[test]
fn test_generated_name_skips_deserialized_names() {
    let document = full().serialize(true).unwrap();
    let mut model = Modeller::deserialize(&document).unwrap();
    model.add_constraint(Constraint::distinct(&a()).unwrap());

    let names: Vec<_> = model.constraints().iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        [Some("c0"), Some("c1"), Some("c2"), Some("c3"), Some("c4")]
    );
}

#[test]
fn test_seeded_random_names_are_reproducible() {
    let build = || {
        let mut model = Modeller::new().with_name_generator(RandomNames::with_seed(42));
        model.add_constraint(Constraint::distinct(&a()).unwrap());
        model.constraints()[0].name().map(str::to_string)
    };
    let first = build().unwrap();
    assert_eq!(first.len(), 16);
    assert_eq!(Some(first), build());
}

// ============================================================================
// Deserialization Tests
// ============================================================================

#[test]
fn test_round_trip_full_model() {
    let original = full();
    let back = Modeller::deserialize(&original.serialize(true).unwrap()).unwrap();

    assert_eq!(back.variables(), original.variables());
    assert_eq!(back.constraints(), original.constraints());
    assert_eq!(back.objectives(), original.objectives());
    assert_eq!(back.searcher(), Some(SearcherType::Bab));
    assert_eq!(back.cutoff(), original.cutoff());
    assert_eq!(back.callback_url(), Some("https://example.invalid/hook"));
    assert_eq!(back.solution_limit(), 5);
}

#[test]
fn test_json_text_round_trip() {
    let text = example().to_json_string(true).unwrap();
    let back = Modeller::from_json_string(&text).unwrap();
    assert_eq!(back.serialize(true).unwrap(), example().serialize(true).unwrap());
}

#[test]
fn test_variables_restored_scalars_then_arrays_then_matrices() {
    let map = wire(json!({
        "var": [
            Value::Object(grid().to_wire()),
            Value::Object(a().to_wire()),
            Value::Object(y().to_wire()),
            Value::Object(x().to_wire())
        ],
        "constraint": [
            {"name": "e", "map": "a", "v1": "x", "v2": "y", "type": "element"}
        ]
    }));
    let model = Modeller::deserialize(&map).unwrap();
    let names: Vec<_> = model.variables().iter().map(Variable::name).collect();
    assert_eq!(names, ["y", "x", "a", "MATRIX$3$3$grid"]);
    assert_eq!(model.constraints().len(), 1);
    assert_eq!(model.solution_limit(), 1);
    assert_eq!(model.searcher(), None);
}

#[test]
fn test_matrix_reference_resolves_after_reordering() {
    let map = wire(json!({
        "var": [Value::Object(grid().to_wire())],
        "constraint": [{
            "name": "r",
            "type": "distinct",
            "v1": "MATRIX$3$3$grid",
            "selection": "row",
            "size": 3,
            "index": 2
        }]
    }));
    let model = Modeller::deserialize(&map).unwrap();
    assert!(matches!(
        model.constraints()[0].kind(),
        ConstraintKind::Distinct {
            selection: DistinctSelection::Row { size: 3, index: 2 },
            ..
        }
    ));
}

#[test]
fn test_deserialize_missing_variable_reference() {
    let map = wire(json!({
        "var": [Value::Object(x().to_wire())],
        "specific": [{"var": "ghost", "type": "minimize"}]
    }));
    assert_eq!(
        Modeller::deserialize(&map).unwrap_err(),
        ModelError::ReferencedVariableNotFound("ghost".into())
    );
}

#[test]
fn test_deserialize_unknown_constraint_type() {
    let map = wire(json!({
        "var": [],
        "constraint": [{"name": "c", "type": "circuit"}]
    }));
    assert_eq!(
        Modeller::deserialize(&map).unwrap_err(),
        ModelError::UnknownConstraintType("circuit".into())
    );
}

#[test]
fn test_deserialize_rejects_both_cutoff_keys() {
    let map = wire(json!({
        "var": [],
        "cutoff": {"name": "fibonacci"},
        "meta_cutoff": {"name": "merger",
            "first_cutoff": {"name": "fibonacci"},
            "second_cutoff": {"name": "fibonacci"}}
    }));
    assert_eq!(
        Modeller::deserialize(&map).unwrap_err().code(),
        "MODEL_MALFORMED_WIRE"
    );
}

#[test]
fn test_deserialize_searcher_is_case_insensitive() {
    let map = wire(json!({"var": [], "searcher": "lds"}));
    assert_eq!(
        Modeller::deserialize(&map).unwrap().searcher(),
        Some(SearcherType::Lds)
    );
}

#[test]
fn test_deserialize_rejects_zero_solution_limit() {
    let map = wire(json!({"var": [], "solution_limit": 0}));
    assert!(Modeller::deserialize(&map).is_err());
}

#[test]
fn test_malformed_json_text() {
    assert_eq!(
        Modeller::from_json_string("{not json").unwrap_err().code(),
        "MODEL_MALFORMED_WIRE"
    );
}
