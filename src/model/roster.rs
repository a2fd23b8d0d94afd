use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::model::Participant;

/// The participant list for one draw: names in file order, plus the contact
/// address each match notification should be sent to.
///
/// Only the names are ever handed to the [`Matcher`](crate::Matcher); the
/// addresses are resolved downstream, once a valid assignment exists.
#[derive(Debug, Clone)]
pub struct Roster {
    participants: Vec<Participant>,
    addresses: HashMap<Participant, String>,
}

impl Roster {
    /// Parse a roster: one participant per line as `name,address`, blank
    /// lines skipped.
    pub fn parse(input: &str) -> Result<Self, RosterError> {
        let mut participants = Vec::new();
        let mut addresses = HashMap::new();
        for (index, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let number = index + 1;
            let (name, address) = line
                .split_once(',')
                .ok_or(RosterError::MissingAddress(number))?;
            let (name, address) = (name.trim(), address.trim());
            if name.is_empty() || address.is_empty() {
                return Err(RosterError::EmptyField(number));
            }
            let participant = Participant::new(name);
            if addresses
                .insert(participant.clone(), address.to_string())
                .is_some()
            {
                return Err(RosterError::DuplicateName {
                    line: number,
                    name: name.to_string(),
                });
            }
            participants.push(participant);
        }
        Ok(Self {
            participants,
            addresses,
        })
    }

    /// Load a roster from a file.
    pub fn load(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text)?)
    }

    /// Participant names in file order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// The contact address for a participant, if they are on the roster.
    pub fn address_of(&self, participant: &Participant) -> Option<&str> {
        self.addresses.get(participant).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("line {0}: expected `name,address`")]
    MissingAddress(usize),
    #[error("line {0}: empty name or address")]
    EmptyField(usize),
    #[error("line {line}: duplicate participant `{name}`")]
    DuplicateName { line: usize, name: String },
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl Roster {
        pub fn example() -> Self {
            Roster::parse(
                "Alice,alice@example.com\n\
                 Bob,bob@example.com\n\
                 Carol,carol@example.com\n\
                 Dave,dave@example.com\n",
            )
            .unwrap()
        }
    }
}
