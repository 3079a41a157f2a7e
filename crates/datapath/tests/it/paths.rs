use datapath::{Path, PathOptions, Value, arr, fill, forget, get, get_or_else, has, path, set};
use serde_json::json;

fn v(json: serde_json::Value) -> Value {
    json.into()
}

#[test]
fn users_built_up_from_nothing() {
    let mut root = Value::empty_map();
    set(&mut root, "users.0.name", "Ann");
    set(&mut root, "users.1.name", "Bo");

    insta::assert_snapshot!(get(&root, "users.*.name").unwrap().to_string(), @r#"["Ann","Bo"]"#);
    insta::assert_snapshot!(root.to_string(), @r#"{"users":[{"name":"Ann"},{"name":"Bo"}]}"#);

    set(&mut root, "users.*.active", true);
    fill(&mut root, "users.1.name", "ignored");
    fill(&mut root, "users.*", "ignored");
    insta::assert_snapshot!(root.to_string(), @r#"{"users":[{"name":"Ann","active":true},{"name":"Bo","active":true}]}"#);
}

#[test]
fn wildcards_collapse_only_before_another_wildcard() {
    let root = v(json!({"a": [{"x": [1, 2]}, {"x": [3]}, {"y": 0}]}));
    insta::assert_snapshot!(get(&root, "a.*.x").unwrap().to_string(), @"[[1,2],[3],null]");
    insta::assert_snapshot!(get(&root, "a.*.x.*").unwrap().to_string(), @"[1,2,3]");
    assert!(has(&root, "a.*.nothing"));
    assert!(!has(&root, "a.3"));
}

#[test]
fn defaults_are_lazy() {
    let root = v(json!({"a": 1}));
    let mut calls = 0;
    let hit = get_or_else(&root, "a", || {
        calls += 1;
        Value::Null
    });
    assert_eq!((hit, calls), (Value::from(1), 0));
    let miss = get_or_else(&root, "b", || {
        calls += 1;
        Value::from("fallback")
    });
    assert_eq!((miss, calls), (Value::from("fallback"), 1));
}

#[test]
fn scalar_roots_are_replaced_on_write() {
    let mut root = Value::from("scalar");
    set(&mut root, "a.b", 1);
    insta::assert_snapshot!(root.to_string(), @r#"{"a":{"b":1}}"#);

    let mut root = v(json!({"a": "text"}));
    fill(&mut root, "a.b", 2);
    insta::assert_snapshot!(root.to_string(), @r#"{"a":{"b":2}}"#);
}

#[test]
fn keys_containing_the_delimiter_need_built_paths() {
    let mut root = Value::empty_map();
    set(&mut root, path!["example.com", "port"], 443);
    assert_eq!(get(&root, "example.com.port"), None);
    assert_eq!(get(&root, path!["example.com", "port"]), Some(Value::from(443)));

    let slash = PathOptions {
        delimiter: '/',
        ..PathOptions::default()
    };
    let p = Path::parse_with("example.com/port", &slash);
    assert_eq!(get(&root, &p), Some(Value::from(443)));
    assert_eq!(forget(&mut root, &p), Some(Value::from(443)));
    insta::assert_snapshot!(root.to_string(), @r#"{"example.com":[]}"#);
}

#[test]
fn dot_and_undot() {
    let nested = v(json!({"db": {"host": "localhost", "ports": [5432, 5433]}, "debug": false}));
    let flat = arr::dot(nested.as_map().unwrap(), "");
    insta::assert_snapshot!(Value::Array(flat.clone()).to_string(), @r#"{"db.host":"localhost","db.ports":[5432,5433],"debug":false}"#);
    assert_eq!(arr::undot(&flat), nested);
}
