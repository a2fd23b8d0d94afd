//! The core matching engine: randomized giver-by-giver construction with
//! restart on deadlock.

use std::collections::HashSet;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::model::{Assignment, Participant, Restriction};

/// Default cap on restart attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Produces a random giver → receiver assignment over a participant set,
/// honouring a set of symmetric restrictions.
///
/// Each attempt walks the givers in roster order, picking a receiver
/// uniformly at random from those still available, not the giver, and not
/// restricted against them. An attempt that strands a giver with no eligible
/// receiver is discarded wholesale and retried, up to `max_attempts` times.
/// An assignment that survives to the last giver is valid by construction.
///
/// Exceeding the cap is a probabilistic "could not find one", not proof that
/// no assignment exists; with a few dozen participants and sparse
/// restrictions the cap is effectively never hit.
///
/// The random source is injected, so a seeded RNG reproduces the same
/// assignment. Pure function of its inputs and the RNG; no I/O, no shared
/// state.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    max_attempts: u32,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Draw an assignment, or fail with [`Error::InvalidInput`] for unusable
    /// inputs and [`Error::Unsatisfiable`] once the attempt cap is exceeded.
    pub fn assign<R: Rng>(
        &self,
        participants: &[Participant],
        restrictions: &HashSet<Restriction>,
        rng: &mut R,
    ) -> Result<Assignment> {
        validate(participants, restrictions)?;

        // With two participants the only candidate assignment is the mutual
        // swap, so a restriction on that pair is immediately fatal.
        if participants.len() == 2
            && restrictions.contains(&Restriction::new(
                participants[0].clone(),
                participants[1].clone(),
            ))
        {
            return Err(Error::Unsatisfiable { attempts: 0 });
        }

        for attempt in 1..=self.max_attempts {
            if let Some(assignment) = try_draw(participants, restrictions, rng) {
                debug!(
                    "Drew an assignment for {} participants on attempt {attempt}",
                    participants.len()
                );
                return Ok(assignment);
            }
        }
        warn!(
            "Gave up after {} attempts; the restriction set is likely too dense \
             for {} participants",
            self.max_attempts,
            participants.len()
        );
        Err(Error::Unsatisfiable {
            attempts: self.max_attempts,
        })
    }
}

/// A single construction attempt. Returns `None` on deadlock: some giver was
/// left with no eligible receiver and the partial assignment cannot be
/// salvaged.
fn try_draw<R: Rng>(
    participants: &[Participant],
    restrictions: &HashSet<Restriction>,
    rng: &mut R,
) -> Option<Assignment> {
    let mut available: Vec<&Participant> = participants.iter().collect();
    let mut pairs = Vec::with_capacity(participants.len());

    for giver in participants {
        let eligible: Vec<usize> = available
            .iter()
            .enumerate()
            .filter(|(_, receiver)| {
                **receiver != giver
                    && !restrictions
                        .contains(&Restriction::new(giver.clone(), (**receiver).clone()))
            })
            .map(|(index, _)| index)
            .collect();
        let &choice = eligible.choose(rng)?;
        let receiver = available.swap_remove(choice);
        pairs.push((giver.clone(), receiver.clone()));
    }

    Some(Assignment::from_pairs(pairs))
}

fn validate(participants: &[Participant], restrictions: &HashSet<Restriction>) -> Result<()> {
    if participants.len() < 2 {
        return Err(Error::InvalidInput(format!(
            "at least 2 participants required, got {}",
            participants.len()
        )));
    }
    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !seen.insert(participant) {
            return Err(Error::InvalidInput(format!(
                "duplicate participant `{participant}`"
            )));
        }
    }
    for restriction in restrictions {
        for name in [restriction.first(), restriction.second()] {
            if !seen.contains(name) {
                return Err(Error::InvalidInput(format!(
                    "restriction names unknown participant `{name}`"
                )));
            }
        }
    }
    Ok(())
}
