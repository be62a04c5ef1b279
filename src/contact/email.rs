use std::fmt::Write as _;

use crate::contact::submission::ContactSubmission;

/// A fully formatted message ready for an [`crate::contact::relay::EmailSender`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn subject_line(sub: &ContactSubmission, prefix: &str) -> String {
    match sub.subject.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => format!("{prefix}{s}"),
        None => format!("{prefix}New inquiry from {}", sub.name.trim()),
    }
}

/// Format `sub` as an HTML + plain-text email. All user input is escaped in the HTML body.
pub fn compose_email(
    sub: &ContactSubmission,
    from: &str,
    to: &[String],
    subject_prefix: &str,
) -> OutboundEmail {
    let name = sub.name.trim();
    let email = sub.email.trim();
    let message = sub.message.trim();
    let extras = sub.optional_fields();

    let mut html = String::new();
    html.push_str("<h2>New contact form submission</h2>");
    let _ = write!(
        html,
        "<p><strong>Name:</strong> {}</p><p><strong>Email:</strong> {}</p>",
        escape_html(name),
        escape_html(email)
    );
    for (label, value) in &extras {
        let _ = write!(
            html,
            "<p><strong>{label}:</strong> {}</p>",
            escape_html(value)
        );
    }
    let _ = write!(
        html,
        "<p><strong>Message:</strong></p><p>{}</p>",
        escape_html(message).replace('\n', "<br>")
    );

    let mut text = String::new();
    let _ = writeln!(text, "New contact form submission");
    let _ = writeln!(text);
    let _ = writeln!(text, "Name: {name}");
    let _ = writeln!(text, "Email: {email}");
    for (label, value) in &extras {
        let _ = writeln!(text, "{label}: {value}");
    }
    let _ = writeln!(text);
    let _ = writeln!(text, "Message:");
    let _ = writeln!(text, "{message}");

    OutboundEmail {
        from: from.to_owned(),
        to: to.to_vec(),
        reply_to: Some(email.to_owned()),
        subject: subject_line(sub, subject_prefix),
        html,
        text,
    }
}
