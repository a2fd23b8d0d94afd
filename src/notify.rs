//! Email delivery: rendering the notification template and sending each
//! giver their match over SMTP.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Assignment, Participant, Roster};

/// Template used when the caller doesn't supply one. `{giver}` and
/// `{receiver}` are the recognized placeholders.
pub const DEFAULT_TEMPLATE: &str = "\
Ho ho ho {giver}!

You are {receiver}'s Secret Santa this year. Keep it to yourself!
";

/// Fill the `{giver}` and `{receiver}` placeholders of a message template.
/// A template is free to omit either placeholder.
pub fn render(template: &str, giver: &Participant, receiver: &Participant) -> String {
    template
        .replace("{giver}", giver.name())
        .replace("{receiver}", receiver.name())
}

/// Sends each giver a message naming their receiver. The transport and
/// sender identity come from an explicit [`Config`], never from the process
/// environment.
pub struct Notifier {
    transport: SmtpTransport,
    sender: Mailbox,
}

impl Notifier {
    pub fn new(config: &Config) -> Result<Self> {
        let credentials = Credentials::new(
            config.sender_address().to_string(),
            config.sender_credential().to_string(),
        );
        let transport = SmtpTransport::starttls_relay(config.smtp_host())?
            .port(config.smtp_port())
            .credentials(credentials)
            .build();
        let sender = config.sender_address().parse()?;
        Ok(Self { transport, sender })
    }

    /// Send one message per giver. Each message reveals the receiver only to
    /// their giver; failures abort the run immediately, so a delivery error
    /// surfaces before half the group has been told their match.
    pub fn notify(
        &self,
        roster: &Roster,
        assignment: &Assignment,
        subject: &str,
        template: &str,
    ) -> Result<()> {
        for (giver, receiver) in assignment.iter() {
            let address = roster.address_of(giver).ok_or_else(|| {
                Error::InvalidInput(format!("no contact address for `{giver}`"))
            })?;
            let message = Message::builder()
                .from(self.sender.clone())
                .to(address.parse()?)
                .subject(subject)
                .body(render(template, giver, receiver))?;
            self.transport.send(&message)?;
            // Deliberately not logging the receiver.
            info!("Notified {giver} at {address}");
        }
        info!("All {} participants notified", assignment.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_both_placeholders() {
        let body = render(DEFAULT_TEMPLATE, &"Alice".into(), &"Bob".into());
        assert!(body.contains("Ho ho ho Alice!"));
        assert!(body.contains("You are Bob's Secret Santa"));
        assert!(!body.contains("{giver}"));
        assert!(!body.contains("{receiver}"));
    }

    #[test]
    fn renders_repeated_and_missing_placeholders() {
        let body = render("{giver}, {giver}, go shopping!", &"Alice".into(), &"Bob".into());
        assert_eq!(body, "Alice, Alice, go shopping!");
    }
}
