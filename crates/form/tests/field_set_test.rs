//! Integration tests for multi-field validation

use std::cell::Cell;
use std::rc::Rc;

use nebula_form::{
    FieldDescriptor, FieldSchema, FieldSet, FormError, Observable, Validation, use_validation,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn descriptor(value: &Observable<String>, name: &str) -> FieldDescriptor {
    FieldDescriptor::new(value.clone(), ["required"]).name(name)
}

#[test]
fn array_input_returns_named_handles() {
    let username = Observable::new(String::new());
    let password = Observable::new(String::new());

    let validation = use_validation(vec![
        descriptor(&username, "username"),
        descriptor(&password, "password"),
    ])
    .unwrap();

    let Validation::Set(set) = validation else {
        panic!("expected a field set");
    };
    assert_eq!(set.names().collect::<Vec<_>>(), vec!["username", "password"]);

    for (name, field) in set.iter() {
        assert_eq!(field.name(), Some(name));
        assert_eq!(field.state().get(), "");
        assert!(field.messages().get().is_empty());
    }

    set["username"].touch();
    assert!(set["username"].status().get().touched);
    assert!(!set["password"].status().get().touched);
}

#[test]
fn sequence_of_one_still_needs_a_name() {
    let value = Observable::new(String::new());
    let error = use_validation(vec![FieldDescriptor::new(value, ["required"])]).unwrap_err();
    assert!(matches!(error, FormError::MissingName { index: 0 }));
}

#[test]
fn single_descriptor_may_be_unnamed() {
    let value = Observable::new(String::new());
    let validation = use_validation(FieldDescriptor::new(value, ["required"])).unwrap();
    assert!(validation.into_field().is_some_and(|field| field.name().is_none()));
}

#[test]
fn bad_names_build_no_fields() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let first = FieldDescriptor::new(Observable::new(String::new()), ["required"])
        .name("email")
        .on_update(move |_, _, _| counter.set(counter.get() + 1));
    let second = FieldDescriptor::new(Observable::new(String::new()), ["required"]).name("email");

    let error = FieldSet::new(vec![first, second]).unwrap_err();

    assert!(matches!(error, FormError::DuplicateName { ref name } if name == "email"));
    assert_eq!(calls.get(), 0);
}

#[test]
fn bad_rules_build_no_fields() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let first = FieldDescriptor::new(Observable::new(String::new()), ["required"])
        .name("username")
        .on_update(move |_, _, _| counter.set(counter.get() + 1));
    let second = FieldDescriptor::new(Observable::new(String::new()), ["zipCode"]).name("zip");

    let error = use_validation(vec![first, second]).unwrap_err();

    assert!(matches!(error, FormError::Registry(ref e) if e.rule_id() == "zipCode"));
    assert_eq!(calls.get(), 0);
}

#[test]
fn rule_error_names_the_rule() {
    let error = FieldSet::new(vec![
        descriptor(&Observable::new(String::new()), "a"),
        FieldDescriptor::new(Observable::new(String::new()), ["phone"]).name("b"),
    ])
    .unwrap_err();

    assert_eq!(error.to_string(), "unknown validation rule 'phone'");
}

#[rstest]
#[case("", "", false)]
#[case("ann", "", false)]
#[case("ann", "secret", true)]
fn form_validate_reports_overall_validity(
    #[case] user: &str,
    #[case] pass: &str,
    #[case] expected: bool,
) {
    let username = Observable::new(user.to_owned());
    let password = Observable::new(pass.to_owned());
    let set = FieldSet::new(vec![
        descriptor(&username, "username"),
        descriptor(&password, "password"),
    ])
    .unwrap();

    assert_eq!(set.form_validate(), expected);
    assert!(set.iter().all(|(_, field)| field.status().get().validated));
    assert_eq!(
        set.get("password").unwrap().messages().get().contains("required"),
        pass.is_empty()
    );
}

#[test]
fn bulk_touch_and_reset() {
    let username = Observable::new(String::new());
    let password = Observable::new(String::new());
    let set = FieldSet::new(vec![
        descriptor(&username, "username"),
        descriptor(&password, "password"),
    ])
    .unwrap();

    set.touch_all();
    assert!(set.iter().all(|(_, field)| field.state().get() == "invalid"));

    set.reset();
    assert!(set.iter().all(|(_, field)| field.state().get().is_empty()));
    assert!(
        set.iter()
            .all(|(_, field)| field.messages().get().is_empty())
    );
}

#[test]
fn fields_are_independent() {
    let username = Observable::new(String::new());
    let password = Observable::new(String::new());
    let set = FieldSet::new(vec![
        descriptor(&username, "username"),
        descriptor(&password, "password"),
    ])
    .unwrap();

    username.set("ann".into());

    assert!(set["username"].status().get().dirty);
    assert!(!set["password"].status().get().dirty);
    assert!(!set.is_valid());

    password.set("secret".into());
    assert!(set.is_valid());
}

#[test]
fn schemas_from_json_build_a_set() {
    let schemas: Vec<FieldSchema> = serde_json::from_value(json!([
        { "name": "email", "rules": ["required", "email"] },
        { "name": "age", "rules": ["numeric", { "maxLength": 3 }] },
    ]))
    .unwrap();

    let email = Observable::new("ann@example.com".to_owned());
    let age = Observable::new(String::new());
    let values = [email, age];

    let descriptors = schemas
        .into_iter()
        .zip(values.iter().cloned())
        .map(|(schema, value)| schema.bind(value))
        .collect();
    let set = FieldSet::new(descriptors).unwrap();

    assert!(set.form_validate());
    assert!(set["age"].status().get().optional);

    values[1].set("1000".into());
    assert!(!set.is_valid());
    assert!(set["age"].messages().get().contains("maxLength"));
}
