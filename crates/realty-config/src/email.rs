use std::env;
use std::fmt;

use crate::{flag_env, parse_env};

#[derive(Clone)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
    /// Inbox that receives contact form submissions.
    pub contact_inbox: String,
    pub frontend_url: String,
}

impl EmailConfig {
    pub fn from_env() -> Self {
        let from_email =
            env::var("FROM_EMAIL").unwrap_or_else(|_| "noreply@realty.local".to_string());

        Self {
            enabled: flag_env("SMTP_ENABLED", false),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: parse_env("SMTP_PORT", 1025),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            contact_inbox: env::var("CONTACT_INBOX").unwrap_or_else(|_| from_email.clone()),
            from_email,
            from_name: env::var("FROM_NAME").unwrap_or_else(|_| "Real Estate Team".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        }
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("enabled", &self.enabled)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[redacted]")
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .field("contact_inbox", &self.contact_inbox)
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}
