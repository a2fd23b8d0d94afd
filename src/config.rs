use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::matcher::DEFAULT_MAX_ATTEMPTS;

/// Delivery configuration, loaded from a TOML file. Credentials are passed
/// in explicitly here rather than read from ambient environment variables,
/// and are only ever handed to the SMTP transport.
#[derive(Deserialize)]
pub struct Config {
    // non-secrets
    smtp_host: String,
    #[serde(default = "default_smtp_port")]
    smtp_port: u16,
    sender_address: String,
    #[serde(default = "default_subject")]
    subject: String,
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,
    // secrets
    sender_credential: String,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Hostname of the SMTP relay.
    pub fn smtp_host(&self) -> &str {
        &self.smtp_host
    }

    /// Submission port on the relay; defaults to 587 (STARTTLS).
    pub fn smtp_port(&self) -> u16 {
        self.smtp_port
    }

    /// Address the notifications are sent from, also used as the SMTP
    /// username.
    pub fn sender_address(&self) -> &str {
        &self.sender_address
    }

    /// Password or app-specific credential for the sender account.
    pub fn sender_credential(&self) -> &str {
        &self.sender_credential
    }

    /// Subject line for the notification emails.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Cap on matching restart attempts.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_subject() -> String {
    "Secret Santa".to_string()
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}
