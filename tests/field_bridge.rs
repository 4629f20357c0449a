use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::{Value, json};

use formbridge::{
    field::{InputProps, TextField},
    form::{Form, SubmitError, SubmitOutcome, ValidationErrors, ValidationIssue},
    registry::{ErrorMap, FieldDescriptor, FieldRegistry},
};

fn press(field: &mut TextField, code: KeyCode) {
    field.handle_key(&KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(field: &mut TextField, text: &str) {
    for ch in text.chars() {
        press(field, KeyCode::Char(ch));
    }
}

fn accept(_: Value) -> Result<(), SubmitError> {
    Ok(())
}

#[test]
fn value_cell_tracks_the_last_change() {
    let registry = FieldRegistry::new();
    let mut field = TextField::mount(&registry, "email", "mail", InputProps::new());

    type_text(&mut field, "a@b.comx");
    press(&mut field, KeyCode::Backspace);
    assert_eq!(field.value(), "a@b.com");
    assert_eq!(registry.field_value("email").as_deref(), Some("a@b.com"));

    field.change_text("override");
    assert_eq!(registry.field_value("email").as_deref(), Some("override"));
}

#[test]
fn filled_only_moves_on_blur() {
    let registry = FieldRegistry::new();
    let mut field = TextField::mount(&registry, "email", "mail", InputProps::new());

    field.focus();
    type_text(&mut field, "abc");
    assert!(!field.is_filled());

    field.blur();
    assert!(field.is_filled());

    field.focus();
    for _ in 0..3 {
        press(&mut field, KeyCode::Backspace);
    }
    assert!(field.is_filled());
    field.blur();
    assert!(!field.is_filled());
}

#[test]
fn clear_empties_value_and_display_from_any_state() {
    let registry = FieldRegistry::new();
    let mut field = TextField::mount(&registry, "email", "mail", InputProps::new());
    field.focus();
    type_text(&mut field, "abc");
    field.blur();
    field.focus();

    assert!(registry.clear_field("email"));
    assert_eq!(field.value(), "");
    assert_eq!(field.display_text(), "");
    assert_eq!(field.cursor(), 0);
    assert!(!field.is_filled());
}

#[test]
fn set_value_updates_display_but_waits_for_blur_to_fill() {
    let registry = FieldRegistry::new();
    let field = TextField::mount(&registry, "email", "mail", InputProps::new());
    field.focus();

    assert!(registry.set_field_value("email", "x@y.z"));
    assert_eq!(field.value(), "x@y.z");
    assert_eq!(field.display_text(), "x@y.z");
    assert_eq!(field.cursor(), 5);
    assert!(!field.is_filled());

    field.blur();
    assert!(field.is_filled());
}

#[test]
fn replaced_widget_stops_showing_errors() {
    let registry = FieldRegistry::new();
    let first = TextField::mount(&registry, "email", "mail", InputProps::new());
    let second = TextField::mount(&registry, "email", "mail", InputProps::new());

    registry.set_field_error("email", "Digite seu email");
    assert_eq!(second.error_message().as_deref(), Some("Digite seu email"));
    assert!(!first.is_errored());
}

#[test]
fn second_registration_under_a_name_wins() {
    let registry = FieldRegistry::new();
    let first = TextField::mount(&registry, "email", "mail", InputProps::new());
    let stale = registry.descriptor("email").expect("first descriptor");
    let second = TextField::mount(&registry, "email", "mail", InputProps::new());

    assert_eq!(registry.len(), 1);
    assert!(!stale.is_active());
    assert!(!stale.set_value("ghost"));
    assert_eq!(first.value(), "");
    assert_eq!(second.value(), "");

    drop(first);
    assert!(registry.is_registered("email"));
    assert!(registry.set_field_value("email", "kept"));
    assert_eq!(second.value(), "kept");
}

#[test]
fn stale_descriptor_after_unmount_is_harmless() {
    let registry = FieldRegistry::new();
    let other = TextField::mount(&registry, "password", "lock", InputProps::new());
    other.change_text("secret");

    let field = TextField::mount(&registry, "email", "mail", InputProps::new());
    let stale = registry.descriptor("email").expect("descriptor");
    drop(field);

    assert!(!registry.is_registered("email"));
    assert!(!stale.set_value("x"));
    assert!(!stale.clear_value());
    assert_eq!(stale.value(), None);
    assert_eq!(other.value(), "secret");
    assert_eq!(registry.collect_payload(), json!({"password": "secret"}));
}

#[test]
fn descriptors_built_by_hand_take_part_in_payloads() {
    let registry = FieldRegistry::new();
    registry.register_field(FieldDescriptor::new(
        "token",
        || Some("abc".to_string()),
        |_| false,
        || false,
    ));
    let field = TextField::mount(&registry, "email", "mail", InputProps::new());
    field.change_text("a@b.com");

    assert_eq!(
        registry.collect_payload(),
        json!({"token": "abc", "email": "a@b.com"})
    );
}

#[test]
fn typed_then_blurred_email_shows_registry_error() {
    let mut form = Form::new(|_: &Value| -> Result<(), ValidationErrors> {
        Err(ValidationErrors(vec![ValidationIssue::new(
            "/email",
            "format",
            "Digite um email válido",
        )]))
    });
    let mut email = TextField::mount(form.registry(), "email", "mail", InputProps::new());

    email.focus();
    type_text(&mut email, "a@b.com");
    email.blur();
    assert!(email.is_filled());
    assert!(!email.is_focused());

    let outcome = form.submit(&mut accept);
    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert!(email.is_errored());
    assert_eq!(email.error_message().as_deref(), Some("Digite um email válido"));
}

#[test]
fn cleared_default_is_submitted_empty() {
    let mut form = Form::new(|_: &Value| -> Result<(), ValidationErrors> { Ok(()) });
    let field = TextField::mount(
        form.registry(),
        "nickname",
        "user",
        InputProps::new().with_default_value("x"),
    );
    assert_eq!(field.value(), "x");
    assert!(form.registry().clear_field("nickname"));

    let mut seen = Value::Null;
    let outcome = form.submit(&mut |payload: Value| -> Result<(), SubmitError> {
        seen = payload;
        Ok(())
    });
    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(seen, json!({"nickname": ""}));
}

#[test]
fn only_the_failing_field_is_errored() {
    let mut form = Form::new(|payload: &Value| -> Result<(), ValidationErrors> {
        if payload["password"].as_str().is_some_and(|p| !p.is_empty()) {
            Ok(())
        } else {
            Err(ValidationErrors(vec![ValidationIssue::new(
                "/password",
                "minLength",
                "Digite sua senha",
            )]))
        }
    });
    let email = TextField::mount(form.registry(), "email", "mail", InputProps::new());
    let password = TextField::mount(form.registry(), "password", "lock", InputProps::new());
    email.change_text("a@b.com");

    let first = form.submit(&mut accept);
    assert_eq!(
        first,
        SubmitOutcome::Invalid(ErrorMap::from_iter([("password", "Digite sua senha")]))
    );
    assert!(password.is_errored());
    assert!(!email.is_errored());

    password.change_text("123456");
    assert_eq!(form.submit(&mut accept), SubmitOutcome::Submitted);
    assert!(!password.is_errored());
    assert!(!email.is_errored());
}
