#![no_main]

use arbitrary::Arbitrary;
use datapath::{Collection, Key, Path, Segment, Value, fill, forget, get, has, set};
use libfuzzer_sys::fuzz_target;

/// Keys come from a tiny alphabet so operations keep hitting the same
/// entries.
#[derive(Debug, Arbitrary)]
enum FuzzSegment {
    Name(u8),
    Index(u8),
    Wildcard,
}

impl FuzzSegment {
    fn segment(&self) -> Segment {
        match self {
            FuzzSegment::Name(n) => Segment::Key(Key::new(["a", "b", "c"][usize::from(n % 3)])),
            FuzzSegment::Index(i) => Segment::Key(Key::Index(usize::from(i % 4))),
            FuzzSegment::Wildcard => Segment::Wildcard,
        }
    }
}

#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Null,
    Bool(bool),
    Int(i16),
    Text(String),
    List(Vec<i8>),
}

impl FuzzValue {
    fn value(&self) -> Value {
        match self {
            FuzzValue::Null => Value::Null,
            FuzzValue::Bool(b) => Value::Bool(*b),
            FuzzValue::Int(n) => Value::from(*n),
            FuzzValue::Text(s) => Value::from(s.as_str()),
            FuzzValue::List(items) => Value::list(items.iter().copied()),
        }
    }
}

#[derive(Debug, Arbitrary)]
enum Op {
    Set(Vec<FuzzSegment>, FuzzValue),
    Fill(Vec<FuzzSegment>, FuzzValue),
    Forget(Vec<FuzzSegment>),
    Get(Vec<FuzzSegment>),
}

fn path(segments: &[FuzzSegment]) -> Path {
    segments.iter().take(5).map(FuzzSegment::segment).collect()
}

fuzz_target!(|ops: Vec<Op>| {
    let mut root = Value::empty_map();
    for op in ops.iter().take(64) {
        match op {
            Op::Set(segments, value) => {
                let path = path(segments);
                let value = value.value();
                set(&mut root, &path, value.clone());
                if !path.is_empty() && !path.has_wildcard() {
                    assert_eq!(get(&root, &path), Some(value));
                    assert!(has(&root, &path));
                }
            }
            Op::Fill(segments, value) => {
                let path = path(segments);
                let before = get(&root, &path);
                fill(&mut root, &path, value.value());
                if let (Some(before), false) = (before, path.has_wildcard()) {
                    assert_eq!(get(&root, &path), Some(before));
                }
            }
            Op::Forget(segments) => {
                let path = path(segments);
                forget(&mut root, &path);
                if !path.is_empty() && !path.has_wildcard() {
                    assert!(!has(&root, &path));
                }
            }
            Op::Get(segments) => {
                let _ = get(&root, &path(segments));
            }
        }
    }

    // Whatever was built renders as valid JSON that parses back to itself.
    let rendered = root.to_string();
    let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");
    assert_eq!(Value::from(parsed).to_string(), rendered);
    if root.is_array() {
        assert_eq!(Collection::make(root).to_json(), rendered);
    }
});
