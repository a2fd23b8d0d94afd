use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::model::{Participant, Restriction};

/// A complete giver → receiver mapping, one entry per participant in the
/// order the givers were processed.
///
/// Instances are only built by the [`Matcher`](crate::Matcher), which
/// guarantees validity by construction; [`Assignment::is_valid`] re-checks
/// the invariants independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pairs: Vec<(Participant, Participant)>,
}

impl Assignment {
    pub(crate) fn from_pairs(pairs: Vec<(Participant, Participant)>) -> Self {
        Self { pairs }
    }

    /// The receiver assigned to a giver, if the giver is part of this
    /// assignment.
    pub fn receiver_for(&self, giver: &Participant) -> Option<&Participant> {
        self.pairs
            .iter()
            .find(|(candidate, _)| candidate == giver)
            .map(|(_, receiver)| receiver)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Participant, &Participant)> {
        self.pairs.iter().map(|(giver, receiver)| (giver, receiver))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Independently verify this assignment against the participant set and
    /// restriction set, without relying on how it was produced:
    ///
    /// 1. every participant appears exactly once as a giver;
    /// 2. every participant appears exactly once as a receiver;
    /// 3. nobody is assigned to themselves;
    /// 4. no assigned pair is restricted, in either order.
    pub fn is_valid(
        &self,
        participants: &[Participant],
        restrictions: &HashSet<Restriction>,
    ) -> bool {
        let everyone: HashSet<&Participant> = participants.iter().collect();
        if self.pairs.len() != everyone.len() {
            return false;
        }

        let mut givers = HashSet::with_capacity(self.pairs.len());
        let mut receivers = HashSet::with_capacity(self.pairs.len());
        for (giver, receiver) in &self.pairs {
            if giver == receiver {
                return false;
            }
            if !givers.insert(giver) || !receivers.insert(receiver) {
                return false;
            }
            if restrictions.contains(&Restriction::new(giver.clone(), receiver.clone())) {
                return false;
            }
        }
        givers == everyone && receivers == everyone
    }
}

impl Display for Assignment {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        for (giver, receiver) in &self.pairs {
            writeln!(formatter, "{giver} -> {receiver}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participants(names: &[&str]) -> Vec<Participant> {
        names.iter().map(|name| Participant::new(*name)).collect()
    }

    fn assignment(pairs: &[(&str, &str)]) -> Assignment {
        Assignment::from_pairs(
            pairs
                .iter()
                .map(|(giver, receiver)| ((*giver).into(), (*receiver).into()))
                .collect(),
        )
    }

    #[test]
    fn accepts_a_valid_derangement() {
        let people = participants(&["Alice", "Bob", "Carol"]);
        let cycle = assignment(&[("Alice", "Bob"), ("Bob", "Carol"), ("Carol", "Alice")]);
        assert!(cycle.is_valid(&people, &HashSet::new()));
        assert_eq!(cycle.receiver_for(&"Alice".into()), Some(&"Bob".into()));
        assert_eq!(cycle.receiver_for(&"Eve".into()), None);
    }

    #[test]
    fn rejects_self_assignment() {
        let people = participants(&["Alice", "Bob", "Carol"]);
        let fixed_point =
            assignment(&[("Alice", "Alice"), ("Bob", "Carol"), ("Carol", "Bob")]);
        assert!(!fixed_point.is_valid(&people, &HashSet::new()));
    }

    #[test]
    fn rejects_repeated_receiver() {
        let people = participants(&["Alice", "Bob", "Carol"]);
        let repeated = assignment(&[("Alice", "Bob"), ("Bob", "Alice"), ("Carol", "Bob")]);
        assert!(!repeated.is_valid(&people, &HashSet::new()));
    }

    #[test]
    fn rejects_missing_giver() {
        let people = participants(&["Alice", "Bob", "Carol"]);
        let short = assignment(&[("Alice", "Bob"), ("Bob", "Alice")]);
        assert!(!short.is_valid(&people, &HashSet::new()));
    }

    #[test]
    fn rejects_restricted_pair_in_either_order() {
        let people = participants(&["Alice", "Bob", "Carol"]);
        let cycle = assignment(&[("Alice", "Bob"), ("Bob", "Carol"), ("Carol", "Alice")]);
        let mut restrictions = HashSet::new();
        restrictions.insert(Restriction::new("Bob".into(), "Alice".into()));
        assert!(!cycle.is_valid(&people, &restrictions));
    }

    #[test]
    fn rejects_outsider() {
        let people = participants(&["Alice", "Bob", "Carol"]);
        let outsider = assignment(&[("Alice", "Bob"), ("Bob", "Eve"), ("Eve", "Alice")]);
        assert!(!outsider.is_valid(&people, &HashSet::new()));
    }

    #[test]
    fn displays_one_pair_per_line() {
        let pairs = assignment(&[("Alice", "Bob"), ("Bob", "Alice")]);
        assert_eq!(pairs.to_string(), "Alice -> Bob\nBob -> Alice\n");
    }
}
