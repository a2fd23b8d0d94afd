use std::collections::HashSet;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::model::Participant;

/// An unordered pair of participants who must not be matched with each other
/// in either direction (e.g. spouses, or last year's pairing).
///
/// Construction normalizes the pair, so `{A, B}` and `{B, A}` compare and
/// hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Restriction {
    first: Participant,
    second: Participant,
}

impl Restriction {
    pub fn new(a: Participant, b: Participant) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> &Participant {
        &self.first
    }

    pub fn second(&self) -> &Participant {
        &self.second
    }

    /// Whether this restriction forbids the given pairing, in either order.
    pub fn forbids(&self, giver: &Participant, receiver: &Participant) -> bool {
        (&self.first == giver && &self.second == receiver)
            || (&self.first == receiver && &self.second == giver)
    }
}

#[derive(Debug, Error)]
pub enum RestrictionError {
    #[error("line {0}: expected `name,name`")]
    MissingSeparator(usize),
    #[error("line {0}: empty participant name")]
    EmptyName(usize),
    #[error("line {line}: `{name}` cannot be restricted against themselves")]
    SelfPair { line: usize, name: String },
}

/// Parse a restriction list: one `a,b` pair per line, order-insensitive,
/// blank lines skipped.
pub fn parse_restrictions(input: &str) -> Result<HashSet<Restriction>, RestrictionError> {
    let mut restrictions = HashSet::new();
    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let number = index + 1;
        let (a, b) = line
            .split_once(',')
            .ok_or(RestrictionError::MissingSeparator(number))?;
        let (a, b) = (a.trim(), b.trim());
        if a.is_empty() || b.is_empty() {
            return Err(RestrictionError::EmptyName(number));
        }
        if a == b {
            return Err(RestrictionError::SelfPair {
                line: number,
                name: a.to_string(),
            });
        }
        restrictions.insert(Restriction::new(a.into(), b.into()));
    }
    Ok(restrictions)
}

/// Load a restriction list from a file.
pub fn load_restrictions(path: impl AsRef<Path>) -> crate::error::Result<HashSet<Restriction>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_restrictions(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restriction_is_symmetric() {
        let forwards = Restriction::new("Alice".into(), "Bob".into());
        let backwards = Restriction::new("Bob".into(), "Alice".into());
        assert_eq!(forwards, backwards);

        let mut set = HashSet::new();
        set.insert(forwards);
        assert!(set.contains(&backwards));
    }

    #[test]
    fn forbids_both_directions() {
        let restriction = Restriction::new("Alice".into(), "Bob".into());
        assert!(restriction.forbids(&"Alice".into(), &"Bob".into()));
        assert!(restriction.forbids(&"Bob".into(), &"Alice".into()));
        assert!(!restriction.forbids(&"Alice".into(), &"Carol".into()));
    }

    #[test]
    fn parses_pairs_and_skips_blank_lines() {
        let restrictions = parse_restrictions("Alice,Bob\n\nCarol, Dave\n").unwrap();
        assert_eq!(restrictions.len(), 2);
        assert!(restrictions.contains(&Restriction::new("Bob".into(), "Alice".into())));
        assert!(restrictions.contains(&Restriction::new("Carol".into(), "Dave".into())));
    }

    #[test]
    fn duplicate_pairs_collapse() {
        let restrictions = parse_restrictions("Alice,Bob\nBob,Alice\n").unwrap();
        assert_eq!(restrictions.len(), 1);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(
            parse_restrictions("Alice Bob"),
            Err(RestrictionError::MissingSeparator(1))
        ));
        assert!(matches!(
            parse_restrictions("Alice,Bob\n,Carol"),
            Err(RestrictionError::EmptyName(2))
        ));
        assert!(matches!(
            parse_restrictions("Alice,Alice"),
            Err(RestrictionError::SelfPair { line: 1, .. })
        ));
    }
}
