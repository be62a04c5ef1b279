use super::*;

/// Replays scripted results and records every attempted `from`.
struct Scripted {
    results: Vec<Result<String, SendError>>,
    attempts: Vec<String>,
}

impl Scripted {
    fn new(results: Vec<Result<String, SendError>>) -> Self {
        Self {
            results,
            attempts: Vec::new(),
        }
    }
}

impl EmailSender for Scripted {
    fn send(&mut self, email: &OutboundEmail) -> Result<String, SendError> {
        self.attempts.push(email.from.clone());
        self.results.remove(0)
    }
}

fn sub() -> ContactSubmission {
    ContactSubmission {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        message: "Hi".into(),
        ..Default::default()
    }
}

fn relay() -> ContactRelay {
    ContactRelay::new(RelayConfig::default()).unwrap()
}

#[test]
fn primary_success_uses_primary_identity() {
    let mut s = Scripted::new(vec![Ok("m1".into())]);
    let r = relay().deliver(&mut s, &sub()).unwrap();
    assert_eq!(r.message_id, "m1");
    assert!(!r.used_fallback);
    assert_eq!(s.attempts, vec![RelayConfig::default().primary_from]);
}

#[test]
fn unverified_domain_retries_with_fallback() {
    let mut s = Scripted::new(vec![
        Err(SendError::DomainUnverified("kodano.com".into())),
        Ok("m2".into()),
    ]);
    let r = relay().deliver(&mut s, &sub()).unwrap();
    assert!(r.used_fallback);
    assert_eq!(s.attempts.len(), 2);
    assert_eq!(Some(r.from), RelayConfig::default().fallback_from);
}

#[test]
fn other_errors_do_not_retry() {
    let mut s = Scripted::new(vec![Err(SendError::Rejected("spam".into()))]);
    let err = relay().deliver(&mut s, &sub()).unwrap_err();
    assert!(matches!(err, MotionError::Contact(_)));
    assert_eq!(s.attempts.len(), 1);

    let mut s = Scripted::new(vec![Err(SendError::Transport(anyhow::anyhow!("timeout")))]);
    let err = relay().deliver(&mut s, &sub()).unwrap_err();
    assert!(matches!(err, MotionError::Other(_)));
}

#[test]
fn unverified_without_fallback_fails() {
    let cfg = RelayConfig {
        fallback_from: None,
        ..RelayConfig::default()
    };
    let mut s = Scripted::new(vec![Err(SendError::DomainUnverified("x".into()))]);
    assert!(ContactRelay::new(cfg).unwrap().deliver(&mut s, &sub()).is_err());
    assert_eq!(s.attempts.len(), 1);
}

#[test]
fn invalid_submission_never_sends() {
    let mut s = Scripted::new(vec![]);
    let bad = ContactSubmission {
        email: String::new(),
        ..sub()
    };
    assert!(relay().deliver(&mut s, &bad).is_err());
    assert!(s.attempts.is_empty());
}

#[test]
fn relay_config_is_validated() {
    let no_recipients = RelayConfig {
        recipients: vec![],
        ..RelayConfig::default()
    };
    assert!(ContactRelay::new(no_recipients).is_err());
}
