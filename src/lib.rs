//! Secret Santa matching with exclusion constraints.
//!
//! The heart of the crate is the [`Matcher`], which draws a random
//! giver → receiver assignment over a participant set: a bijection with no
//! self-assignment and no pair from the restriction set. Around it sit the
//! roster and restriction loaders, a small template renderer, and an SMTP
//! [`Notifier`](notify::Notifier) that mails each giver their match.

pub mod config;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod notify;

pub use config::Config;
pub use error::{Error, Result};
pub use matcher::Matcher;
pub use model::{Assignment, Participant, Restriction, Roster};
