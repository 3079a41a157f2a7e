use quickcheck::QuickCheck;

use super::arbitrary::{LiteralPath, Nested, test_count};
use crate::{Value, arr, fill, forget, get, has, set};

/// Property: after `set`, the same literal path reads back what was written,
/// whatever shape the root had before.
#[test]
fn set_then_get_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(root: Value, path: LiteralPath, value: Value) -> bool {
        let mut root = root;
        set(&mut root, &path.0, value.clone());
        has(&root, &path.0) && get(&root, &path.0) == Some(value)
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Value, LiteralPath, Value) -> bool);
}

/// Property: `fill` never replaces a value that is already there.
#[test]
fn fill_keeps_existing_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(root: Value, path: LiteralPath, value: Value) -> bool {
        let mut root = root;
        let before = get(&root, &path.0);
        fill(&mut root, &path.0, value.clone());
        match before {
            Some(existing) => get(&root, &path.0) == Some(existing),
            None => get(&root, &path.0) == Some(value),
        }
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Value, LiteralPath, Value) -> bool);
}

/// Property: `forget` undoes the existence of whatever `set` created.
#[test]
fn forget_after_set_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(root: Value, path: LiteralPath, value: Value) -> bool {
        let mut root = root;
        set(&mut root, &path.0, value.clone());
        forget(&mut root, &path.0) == Some(value) && !has(&root, &path.0)
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Value, LiteralPath, Value) -> bool);
}

/// Property: `undot` inverts `dot` for associative nesting.
#[test]
fn dot_undot_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(nested: Nested) -> bool {
        let flat = arr::dot(&nested.0, "");
        arr::undot(&flat) == Value::Array(nested.0)
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Nested) -> bool);
}

#[quickcheck_macros::quickcheck]
fn display_parse_round_trip(path: LiteralPath) -> bool {
    crate::Path::parse(&path.0.to_string()) == path.0
}
