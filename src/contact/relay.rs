use crate::{
    contact::{
        email::{OutboundEmail, compose_email},
        submission::ContactSubmission,
    },
    foundation::error::{MotionError, MotionResult},
};

/// Failure reported by an outbound email service.
#[derive(thiserror::Error, Debug)]
pub enum SendError {
    /// The `from` domain has not been verified with the provider.
    #[error("sending domain is not verified: {0}")]
    DomainUnverified(String),

    /// The provider refused the message for any other reason.
    #[error("email rejected: {0}")]
    Rejected(String),

    /// Network or client failure.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl From<SendError> for MotionError {
    fn from(err: SendError) -> Self {
        match err {
            SendError::Transport(e) => MotionError::Other(e),
            other => MotionError::contact(other.to_string()),
        }
    }
}

/// Outbound email collaborator. Returns the provider's message id.
pub trait EmailSender {
    fn send(&mut self, email: &OutboundEmail) -> Result<String, SendError>;
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RelayConfig {
    pub recipients: Vec<String>,
    pub primary_from: String,
    /// Retried once when the primary domain is reported unverified.
    #[serde(default)]
    pub fallback_from: Option<String>,
    #[serde(default)]
    pub subject_prefix: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            recipients: vec!["hello@kodano.com".to_owned()],
            primary_from: "Kodano Website <website@kodano.com>".to_owned(),
            fallback_from: Some("Kodano Website <noreply@mail.kodano.com>".to_owned()),
            subject_prefix: "[Kodano Contact] ".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DeliveryReceipt {
    pub message_id: String,
    pub from: String,
    pub used_fallback: bool,
}

/// Validates submissions and forwards them to the fixed recipient list.
#[derive(Clone, Debug)]
pub struct ContactRelay {
    config: RelayConfig,
}

impl ContactRelay {
    pub fn new(config: RelayConfig) -> MotionResult<Self> {
        if config.recipients.iter().all(|r| r.trim().is_empty()) {
            return Err(MotionError::validation(
                "relay needs at least one recipient",
            ));
        }
        if config.primary_from.trim().is_empty() {
            return Err(MotionError::validation("relay primary_from is empty"));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Format `sub` with the given identity, without sending.
    pub fn compose(&self, sub: &ContactSubmission, from: &str) -> OutboundEmail {
        compose_email(
            sub,
            from,
            &self.config.recipients,
            &self.config.subject_prefix,
        )
    }

    #[tracing::instrument(skip_all)]
    pub fn deliver(
        &self,
        sender: &mut dyn EmailSender,
        sub: &ContactSubmission,
    ) -> MotionResult<DeliveryReceipt> {
        sub.validate()?;

        let primary = self.compose(sub, &self.config.primary_from);
        match sender.send(&primary) {
            Ok(message_id) => Ok(DeliveryReceipt {
                message_id,
                from: primary.from,
                used_fallback: false,
            }),
            Err(SendError::DomainUnverified(reason)) => {
                let Some(fallback_from) = self.config.fallback_from.as_deref() else {
                    return Err(SendError::DomainUnverified(reason).into());
                };
                tracing::warn!(
                    %reason,
                    fallback = fallback_from,
                    "primary sender unverified; retrying"
                );
                let fallback = self.compose(sub, fallback_from);
                let message_id = sender.send(&fallback)?;
                Ok(DeliveryReceipt {
                    message_id,
                    from: fallback.from,
                    used_fallback: true,
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/relay.rs"]
mod tests;
