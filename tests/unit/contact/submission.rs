use super::*;

fn valid() -> ContactSubmission {
    ContactSubmission {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        message: "Hello".into(),
        ..Default::default()
    }
}

#[test]
fn required_fields_are_enforced() {
    assert!(valid().validate().is_ok());

    let err = ContactSubmission {
        name: "  ".into(),
        message: String::new(),
        ..valid()
    }
    .validate()
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("name"));
    assert!(msg.contains("message"));
    assert!(!msg.contains("email"));
}

#[test]
fn optional_fields_skip_blanks() {
    let sub = ContactSubmission {
        company: Some("Acme".into()),
        phone: Some("   ".into()),
        acquirers: Some(" Adyen ".into()),
        ..valid()
    };
    assert_eq!(
        sub.optional_fields(),
        vec![("Company", "Acme"), ("Current acquirers", "Adyen")]
    );
}

#[test]
fn json_missing_fields_fail_validation() {
    assert!(ContactSubmission::parse_json(r#"{ "name": "Ada" }"#).is_err());
    let ok = ContactSubmission::parse_json(
        r#"{ "name": "Ada", "email": "a@b.c", "message": "hi", "volume": "1M" }"#,
    )
    .unwrap();
    assert_eq!(ok.volume.as_deref(), Some("1M"));
}
