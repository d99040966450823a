//! Form submissions - contact messages and newsletter signups.
//!
//! Both are thin forwards to the external provider: validate, build the
//! outbound payloads, send. At-most-once; nothing is stored or retried.

mod provider;

pub use provider::{HttpProvider, OutboundEmail, Provider, PROVIDER_KEY_ENV};

use serde::Deserialize;

use crate::config::OutreachConfig;
use crate::error::{Error, Result};

/// Contact form fields as posted from the landing page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            "there".to_string()
        } else {
            name.to_string()
        }
    }
}

/// Newsletter form fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsletterForm {
    #[serde(default)]
    pub email: String,
}

/// Forward a contact request to the provider: one internal notification and
/// one acknowledgment to the submitter.
///
/// Requires email and message; validation runs before any provider call.
pub async fn submit_contact(
    provider: &dyn Provider,
    outreach: &OutreachConfig,
    form: &ContactForm,
) -> Result<()> {
    let email = form.email.trim();
    let message = form.message.trim();
    if email.is_empty() || message.is_empty() {
        return Err(Error::Validation(
            "email and message are required".to_string(),
        ));
    }

    let name = form.full_name();

    let notification = OutboundEmail {
        from: outreach.from_address.clone(),
        to: outreach.notify_address.clone(),
        subject: format!("New contact request from {name}"),
        text: format!("From: {name} <{email}>\n\n{message}\n"),
    };

    let acknowledgment = OutboundEmail {
        from: outreach.from_address.clone(),
        to: email.to_string(),
        subject: "We received your message".to_string(),
        text: format!(
            "Hi {name},\n\nThanks for reaching out. We read every message and \
             will get back to you shortly.\n"
        ),
    };

    provider.send_email(&notification).await?;
    provider.send_email(&acknowledgment).await?;

    Ok(())
}

/// Forward a newsletter signup to the provider audience API.
///
/// Requires an email; validation runs before any provider call.
pub async fn subscribe(
    provider: &dyn Provider,
    outreach: &OutreachConfig,
    form: &NewsletterForm,
) -> Result<()> {
    let email = form.email.trim();
    if email.is_empty() {
        return Err(Error::Validation("email is required".to_string()));
    }

    provider.add_contact(&outreach.audience_id, email).await
}
