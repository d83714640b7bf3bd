//! Mentor matching.
//!
//! Matching is a read-only query over the registry. Selection runs in three
//! narrowing steps:
//!
//! 1. available mentors;
//! 2. of those, mentors speaking the immigrant's native or desired language;
//! 3. of those, mentors whose expertise covers the requested area.
//!
//! The first step-3 candidate in registry order wins. When step 3 is empty
//! but step 2 is not, the first step-2 candidate is returned with
//! [`MatchBasis::LanguageOnly`] so callers can say the expertise differs.
//! When step 2 is empty the result is [`MatchOutcome::NoMatchFound`].

use crate::goals::current_goal_expertise;
use crate::models::{Expertise, Immigrant, Mentor};
use crate::registry::MentorRegistry;

/// Why a mentor was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchBasis {
    /// Shared language and the requested expertise.
    LanguageAndExpertise,
    /// Shared language only; no available speaker had the requested expertise.
    LanguageOnly,
}

/// Result of a matching query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome<'a> {
    Matched {
        mentor: &'a Mentor,
        basis: MatchBasis,
    },
    NoMatchFound,
}

impl<'a> MatchOutcome<'a> {
    pub fn mentor(&self) -> Option<&'a Mentor> {
        match *self {
            MatchOutcome::Matched { mentor, .. } => Some(mentor),
            MatchOutcome::NoMatchFound => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }
}

/// Selects mentors from a registry.
#[derive(Debug, Clone, Copy)]
pub struct MatchingEngine<'a> {
    registry: &'a MentorRegistry,
}

impl<'a> MatchingEngine<'a> {
    pub fn new(registry: &'a MentorRegistry) -> Self {
        Self { registry }
    }

    /// Match using the expertise implied by the immigrant's goals.
    pub fn match_mentor(&self, immigrant: &Immigrant) -> MatchOutcome<'a> {
        self.select(immigrant, current_goal_expertise(immigrant.goals()))
    }

    /// Match for an explicitly requested expertise area.
    pub fn match_mentor_for(&self, immigrant: &Immigrant, expertise: Expertise) -> MatchOutcome<'a> {
        self.select(immigrant, Some(expertise))
    }

    fn select(&self, immigrant: &Immigrant, wanted: Option<Expertise>) -> MatchOutcome<'a> {
        let languages = immigrant.languages();
        let speakers: Vec<&'a Mentor> = self
            .registry
            .filter_by(|m| m.is_available() && m.speaks_any(&languages));

        let Some(first_speaker) = speakers.first().copied() else {
            return MatchOutcome::NoMatchFound;
        };

        let expert = wanted.and_then(|e| speakers.iter().copied().find(|m| m.has_expertise(e)));
        match expert {
            Some(mentor) => MatchOutcome::Matched {
                mentor,
                basis: MatchBasis::LanguageAndExpertise,
            },
            None => MatchOutcome::Matched {
                mentor: first_speaker,
                basis: MatchBasis::LanguageOnly,
            },
        }
    }
}

/// Immigrants whose progress log records a match with `mentor`.
pub fn mentees_of<'i>(
    mentor: &Mentor,
    immigrants: impl IntoIterator<Item = &'i Immigrant>,
) -> Vec<&'i Immigrant> {
    immigrants
        .into_iter()
        .filter(|imm| imm.progress_log().iter().any(|e| e.names_mentor(mentor.name())))
        .collect()
}
