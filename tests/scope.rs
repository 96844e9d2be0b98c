use ds_interpreter as ds;

use ds::error::RuntimeError;
use ds::scope::{ScopeId, Scopes};
use ds::value::Value;

#[test]
fn define_and_get_in_root() {
    let mut scopes = Scopes::new();
    scopes
        .define(ScopeId::ROOT, "a", Value::Number(1.0), true, 1)
        .unwrap();

    assert_eq!(scopes.get(ScopeId::ROOT, "a", 1), Ok(Value::Number(1.0)));
}

#[test]
fn lookup_walks_parent_chain() {
    let mut scopes = Scopes::new();
    scopes
        .define(ScopeId::ROOT, "a", Value::Str("root".into()), true, 1)
        .unwrap();

    let child = scopes.push(ScopeId::ROOT);
    let grandchild = scopes.push(child);

    assert_eq!(
        scopes.get(grandchild, "a", 3),
        Ok(Value::Str("root".into()))
    );
    assert_eq!(
        scopes.get(grandchild, "missing", 3),
        Err(RuntimeError::UndefinedVariable {
            name: "missing".into(),
            line: 3
        })
    );
}

#[test]
fn duplicate_only_within_one_scope() {
    let mut scopes = Scopes::new();
    scopes
        .define(ScopeId::ROOT, "x", Value::Null, false, 1)
        .unwrap();

    assert!(matches!(
        scopes.define(ScopeId::ROOT, "x", Value::Null, true, 2),
        Err(RuntimeError::DuplicateBinding { line: 2, .. })
    ));

    let child = scopes.push(ScopeId::ROOT);
    assert!(scopes.define(child, "x", Value::Bool(true), true, 3).is_ok());
    assert_eq!(scopes.get(child, "x", 3), Ok(Value::Bool(true)));
    assert_eq!(scopes.get(ScopeId::ROOT, "x", 3), Ok(Value::Null));
}

#[test]
fn assign_updates_nearest_binding() {
    let mut scopes = Scopes::new();
    scopes
        .define(ScopeId::ROOT, "n", Value::Number(1.0), true, 1)
        .unwrap();
    let child = scopes.push(ScopeId::ROOT);

    scopes.assign(child, "n", Value::Number(2.0), 2).unwrap();

    assert_eq!(scopes.get(ScopeId::ROOT, "n", 2), Ok(Value::Number(2.0)));
}

#[test]
fn assign_respects_const_through_nesting() {
    let mut scopes = Scopes::new();
    scopes
        .define(ScopeId::ROOT, "k", Value::Number(1.0), false, 1)
        .unwrap();

    let mut scope = ScopeId::ROOT;
    for _ in 0..5 {
        scope = scopes.push(scope);
    }

    assert_eq!(
        scopes.assign(scope, "k", Value::Number(2.0), 9),
        Err(RuntimeError::ImmutableAssignment {
            name: "k".into(),
            line: 9
        })
    );
    assert_eq!(scopes.get(scope, "k", 9), Ok(Value::Number(1.0)));
}

#[test]
fn mutable_shadow_of_const_is_assignable() {
    let mut scopes = Scopes::new();
    scopes
        .define(ScopeId::ROOT, "v", Value::Number(1.0), false, 1)
        .unwrap();
    let child = scopes.push(ScopeId::ROOT);
    scopes
        .define(child, "v", Value::Number(2.0), true, 2)
        .unwrap();

    assert!(scopes.assign(child, "v", Value::Number(3.0), 3).is_ok());
    assert_eq!(scopes.get(ScopeId::ROOT, "v", 3), Ok(Value::Number(1.0)));
}

#[test]
fn assign_to_unknown_name_fails() {
    let mut scopes = Scopes::new();

    assert!(matches!(
        scopes.assign(ScopeId::ROOT, "nope", Value::Null, 4),
        Err(RuntimeError::UndefinedVariable { line: 4, .. })
    ));
}

#[test]
fn truncate_discards_child_scopes_but_never_root() {
    let mut scopes = Scopes::new();
    let child = scopes.push(ScopeId::ROOT);
    scopes
        .define(child, "tmp", Value::Null, true, 1)
        .unwrap();
    scopes.push(child);
    assert_eq!(scopes.len(), 3);

    scopes.truncate(child);
    assert_eq!(scopes.len(), 1);
    assert!(scopes.scope(child).is_none());

    scopes.truncate(ScopeId::ROOT);
    assert_eq!(scopes.len(), 1);

    // A re-opened child starts empty.
    let again = scopes.push(ScopeId::ROOT);
    assert_eq!(again, child);
    assert!(matches!(
        scopes.get(again, "tmp", 1),
        Err(RuntimeError::UndefinedVariable { .. })
    ));
    assert_eq!(scopes.scope(again).and_then(|s| s.parent()), Some(ScopeId::ROOT));
}
