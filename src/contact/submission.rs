use crate::foundation::error::{MotionError, MotionResult};

/// Fields posted by the site's contact form. Only `name`, `email` and `message` are required.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub acquirers: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
}

impl ContactSubmission {
    pub fn validate(&self) -> MotionResult<()> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect();
        if !missing.is_empty() {
            return Err(MotionError::contact(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    /// Optional fields that carry a non-blank value, labelled for display, in form order.
    pub fn optional_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Company", &self.company),
            ("Monthly volume", &self.volume),
            ("Phone", &self.phone),
            ("Website", &self.website),
            ("Current acquirers", &self.acquirers),
        ]
        .into_iter()
        .filter_map(|(label, v)| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| (label, s))
        })
        .collect()
    }

    pub fn parse_json(s: &str) -> MotionResult<Self> {
        let sub: Self = serde_json::from_str(s)?;
        sub.validate()?;
        Ok(sub)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/submission.rs"]
mod tests;
