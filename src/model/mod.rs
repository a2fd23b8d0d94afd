//! Domain model: participants, the roster they are drawn from, the
//! restrictions constraining the draw, and the resulting assignment.

pub mod assignment;
pub mod participant;
pub mod restriction;
pub mod roster;

pub use assignment::Assignment;
pub use participant::Participant;
pub use restriction::{load_restrictions, parse_restrictions, Restriction, RestrictionError};
pub use roster::{Roster, RosterError};
