//! Schema inference tests

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// Kind Tests
// ============================================================================

#[test_case(json!(null), ValueKind::Null)]
#[test_case(json!(true), ValueKind::Boolean)]
#[test_case(json!(3), ValueKind::Number)]
#[test_case(json!(2.5e-3), ValueKind::Number)]
#[test_case(json!("Driven"), ValueKind::String)]
#[test_case(json!([1]), ValueKind::Array)]
#[test_case(json!({"a": 1}), ValueKind::Object)]
fn test_value_kind(value: serde_json::Value, expected: ValueKind) {
    assert_eq!(ValueKind::of(&value), expected);
    assert_eq!(ValueKind::from_name(expected.as_str()), Some(expected));
}

#[test]
fn test_kinds_sort_alphabetically() {
    let mut kinds = vec![
        ValueKind::String,
        ValueKind::Null,
        ValueKind::Array,
        ValueKind::Object,
        ValueKind::Number,
        ValueKind::Boolean,
    ];
    kinds.sort();
    let names: Vec<_> = kinds.iter().map(|k| k.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

// ============================================================================
// Inference Tests
// ============================================================================

#[test]
fn test_infer_nested_object() {
    let value = json!({
        "Model": {"Mesh": "mesh/coax.msh", "L0": 1.0e-3}
    });

    let schema = infer_schema([&value]).to_json();
    assert_eq!(
        schema,
        json!({
            "type": "object",
            "properties": {
                "Model": {
                    "type": "object",
                    "properties": {
                        "L0": {"type": "number"},
                        "Mesh": {"type": "string"}
                    }
                }
            }
        })
    );
}

#[test]
fn test_infer_unions_kinds() {
    let a = json!({"Order": 2});
    let b = json!({"Order": "auto"});

    let schema = infer_schema([&a, &b]).to_json();
    assert_eq!(schema["properties"]["Order"]["type"], json!(["number", "string"]));
}

#[test]
fn test_infer_unions_keys() {
    let a = json!({"Solver": {"Order": 1}});
    let b = json!({"Solver": {"Device": "CPU"}});

    let root = infer_schema([&a, &b]);
    let solver = root.property("Solver").unwrap();
    let keys: Vec<_> = solver.properties.as_ref().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["Device".to_string(), "Order".to_string()]);
}

#[test]
fn test_infer_array_items_merge() {
    let value = json!({
        "Port": [
            {"Index": 1, "R": 50.0},
            {"Index": 2, "Excitation": true}
        ]
    });

    let schema = infer_schema([&value]).to_json();
    let items = &schema["properties"]["Port"]["items"];
    assert_eq!(items["type"], "object");
    assert_eq!(items["properties"]["Index"]["type"], "number");
    assert_eq!(items["properties"]["Excitation"]["type"], "boolean");
    assert_eq!(items["properties"]["R"]["type"], "number");
}

#[test]
fn test_empty_containers_keep_shape() {
    let value = json!({"Attributes": [], "Extra": {}});

    let schema = infer_schema([&value]).to_json();
    assert_eq!(schema["properties"]["Attributes"], json!({"type": "array", "items": {}}));
    assert_eq!(schema["properties"]["Extra"], json!({"type": "object", "properties": {}}));
}

// ============================================================================
// Rule Tests
// ============================================================================

#[test]
fn test_palace_rules_on_empty_root() {
    let mut root = SchemaNode::new();
    apply_palace_rules(&mut root);
    let schema = root.to_json();

    assert_eq!(
        schema["required"],
        json!(["Boundaries", "Domains", "Model", "Problem", "Solver"])
    );
    assert_eq!(schema["type"], "object");
    assert_eq!(
        schema["properties"]["Problem"]["properties"]["Type"],
        json!({"type": "string", "enum": ["Driven", "Transient"]})
    );
    assert_eq!(
        schema["properties"]["Solver"]["properties"]["Sweep"]["properties"]["Type"]["enum"],
        json!(["Adaptive", "Uniform"])
    );
    assert_eq!(
        schema["properties"]["Solver"]["properties"]["Excitations"]["type"],
        "array"
    );

    let post = &schema["properties"]["Boundaries"]["properties"]["PostProcessing"];
    assert_eq!(post["type"], "object");
    assert_eq!(post["required"], json!(["NSample"]));
    assert_eq!(post["properties"]["NSample"]["type"], "number");
}

#[test]
fn test_rules_union_with_observed_kinds() {
    let value = json!({"Solver": {"Excitations": {"1": {}}}});
    let mut root = infer_schema([&value]);
    apply_palace_rules(&mut root);

    let excitations = root.lookup(&["Solver", "Excitations"]).unwrap();
    assert!(excitations.kinds.contains(&ValueKind::Array));
    assert!(excitations.kinds.contains(&ValueKind::Object));
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_path_index() {
    let mut index = PathIndex::new();
    index.record(&json!({"Domains": {"Materials": [{"Attributes": [1]}]}}), "a.json");
    index.record(&json!({"Domains": {"Materials": "none"}}), "b.json");

    let paths: Vec<_> = index.iter().map(|(p, _)| p.to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "",
            "Domains",
            "Domains.Materials",
            "Domains.Materials[]",
            "Domains.Materials[].Attributes",
            "Domains.Materials[].Attributes[]",
        ]
    );

    let materials = index.get("Domains.Materials").unwrap();
    assert!(materials.has_conflict());
    assert_eq!(materials.files.len(), 2);
    assert_eq!(index.conflicts().collect::<Vec<_>>(), vec!["Domains.Materials"]);
}

#[test]
fn test_root_array_path() {
    let mut index = PathIndex::new();
    index.record(&json!([1, 2]), "list.json");
    assert!(index.get("[]").is_some());
}

#[test]
fn test_render_markdown() {
    let mut index = PathIndex::new();
    index.record(&json!({"Order": 1}), "palace/examples/cpw/a.json");
    index.record(&json!({"Order": "x"}), "palace/examples/antenna/b.json");

    assert_eq!(
        index.render_markdown(),
        "# Schema Report\n\
         \n\
         ## Key Paths\n\
         \n\
         - ``\n\
         \x20 - Types: object\n\
         \x20 - Files:\n\
         \x20   - palace/examples/antenna/b.json\n\
         \x20   - palace/examples/cpw/a.json\n\
         - `Order` (type conflict)\n\
         \x20 - Types: number, string\n\
         \x20 - Files:\n\
         \x20   - palace/examples/antenna/b.json\n\
         \x20   - palace/examples/cpw/a.json\n"
    );
}

// ============================================================================
// Inferrer Tests
// ============================================================================

#[test]
fn test_finish_adds_header() {
    let mut inferrer = SchemaInferrer::new();
    inferrer.add_example("a.json", &json!({"Problem": {"Type": "Driven"}}));
    assert_eq!(inferrer.example_count(), 1);

    let artifacts = inferrer.finish(apply_palace_rules);
    assert_eq!(artifacts.schema["$schema"], SCHEMA_DIALECT);
    assert_eq!(artifacts.schema["title"], SCHEMA_TITLE);
    assert_eq!(artifacts.example_count, 1);

    let text = artifacts.schema_text();
    assert!(text.starts_with("{\n  \"$schema\""));
    assert!(text.ends_with("}\n"));
}

#[test]
fn test_finish_is_deterministic() {
    let a = json!({"Model": {"Mesh": "a.msh"}, "Solver": {"Order": 2}});
    let b = json!({"Model": {"L0": 0.001}, "Solver": {"Order": 1, "Device": "CPU"}});

    let build = |first: &serde_json::Value, second: &serde_json::Value| {
        let mut inferrer = SchemaInferrer::new();
        inferrer.add_example("a.json", first);
        inferrer.add_example("b.json", second);
        inferrer.finish(apply_palace_rules)
    };

    let forward = build(&a, &b);
    let backward = build(&b, &a);
    assert_eq!(forward.schema_text(), backward.schema_text());
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_validate_ok() {
    let schema = json!({
        "type": "object",
        "required": ["Problem"],
        "properties": {
            "Problem": {
                "type": "object",
                "properties": {"Type": {"type": "string", "enum": ["Driven", "Transient"]}}
            }
        }
    });
    assert!(is_valid(&schema, &json!({"Problem": {"Type": "Driven"}, "Extra": 1})));
}

#[test]
fn test_validate_collects_violations() {
    let schema = json!({
        "type": "object",
        "required": ["Problem", "Solver"],
        "properties": {
            "Problem": {
                "type": "object",
                "properties": {"Type": {"type": "string", "enum": ["Driven"]}}
            },
            "Ports": {"type": "array", "items": {"type": "number"}, "minItems": 3}
        }
    });
    let value = json!({"Problem": {"Type": "Eigenmode"}, "Ports": [1, "two"]});

    let violations = validate(&schema, &value);
    let rendered: Vec<_> = violations.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "$: missing required key 'Solver'".to_string(),
            "$.Ports: expected at least 3 items, found 2".to_string(),
            "$.Ports[1]: string not in [number]".to_string(),
            "$.Problem.Type: \"Eigenmode\" not in [\"Driven\"]".to_string(),
        ]
    );
}

#[test]
fn test_validate_type_list() {
    let schema = json!({"type": ["null", "number"]});
    assert!(is_valid(&schema, &json!(null)));
    assert!(is_valid(&schema, &json!(4)));
    assert!(!is_valid(&schema, &json!("4")));
}

#[test]
fn test_inferred_schema_accepts_its_inputs() {
    let examples = [
        json!({"Problem": {"Type": "Driven"}, "Model": {}, "Domains": {}, "Solver": {},
               "Boundaries": {"PostProcessing": {"NSample": 10}}}),
        json!({"Problem": {"Type": "Transient"}, "Model": {"Mesh": "m.msh"}, "Domains": [],
               "Solver": {"Excitations": [1]}, "Boundaries": {"PostProcessing": {"NSample": 1}}}),
    ];

    let mut inferrer = SchemaInferrer::new();
    for (i, example) in examples.iter().enumerate() {
        inferrer.add_example(&format!("{i}.json"), example);
    }
    let artifacts = inferrer.finish(apply_palace_rules);

    for example in &examples {
        assert_eq!(validate(&artifacts.schema, example), Vec::new());
    }
}
