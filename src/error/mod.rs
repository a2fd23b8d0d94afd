use lettre::address::AddressError;
use lettre::error::Error as EmailError;
use lettre::transport::smtp::Error as SmtpError;
use thiserror::Error;

use crate::model::{RestrictionError, RosterError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The participant set or restriction set is unusable: fewer than two
    /// participants, a duplicate name, or a restriction naming someone who
    /// is not on the roster. Reported before any matching attempt is made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// No valid assignment was found within the attempt cap. The restriction
    /// set is likely too dense for the participant count; this is evidence,
    /// not proof, that no assignment exists.
    #[error("No valid assignment found after {attempts} attempts")]
    Unsatisfiable { attempts: u32 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Bad config file: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Bad roster: {0}")]
    Roster(#[from] RosterError),
    #[error("Bad restriction list: {0}")]
    Restriction(#[from] RestrictionError),
    #[error("Bad contact address: {0}")]
    Address(#[from] AddressError),
    #[error("Failed to build message: {0}")]
    Email(#[from] EmailError),
    #[error("SMTP failure: {0}")]
    Smtp(#[from] SmtpError),
}
