//! Mentor registry keyed by email.

use crate::error::{CoreError, Result};
use crate::models::{Expertise, Mentor};

/// Criteria for [`MentorRegistry::filter`]. `None` fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentorFilter {
    pub expertise: Option<Expertise>,
    pub language: Option<String>,
    pub available: Option<bool>,
}

impl MentorFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expertise(mut self, expertise: Expertise) -> Self {
        self.expertise = Some(expertise);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    pub fn matches(&self, mentor: &Mentor) -> bool {
        self.expertise.map_or(true, |e| mentor.has_expertise(e))
            && self.language.as_deref().map_or(true, |l| mentor.speaks(l))
            && self.available.map_or(true, |a| mentor.is_available() == a)
    }
}

/// All registered mentors, iterated in registration order.
#[derive(Debug, Clone, Default)]
pub struct MentorRegistry {
    mentors: Vec<Mentor>,
}

impl MentorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from persisted mentors, rejecting duplicate emails.
    pub fn from_mentors(mentors: impl IntoIterator<Item = Mentor>) -> Result<Self> {
        let mut registry = Self::new();
        for mentor in mentors {
            registry.register(mentor)?;
        }
        Ok(registry)
    }

    /// Add `mentor`. Emails are compared case-insensitively.
    pub fn register(&mut self, mentor: Mentor) -> Result<()> {
        if self.position(mentor.email()).is_some() {
            return Err(CoreError::DuplicateMentor(mentor.email().to_string()));
        }
        self.mentors.push(mentor);
        Ok(())
    }

    /// Deregister the mentor with `email` and return it.
    pub fn remove(&mut self, email: &str) -> Result<Mentor> {
        let pos = self
            .position(email)
            .ok_or_else(|| CoreError::NotFound(email.trim().to_string()))?;
        Ok(self.mentors.remove(pos))
    }

    /// Update the availability flag in place.
    pub fn set_availability(&mut self, email: &str, available: bool) -> Result<()> {
        let pos = self
            .position(email)
            .ok_or_else(|| CoreError::NotFound(email.trim().to_string()))?;
        self.mentors[pos].set_available(available);
        Ok(())
    }

    pub fn get(&self, email: &str) -> Option<&Mentor> {
        self.position(email).map(|pos| &self.mentors[pos])
    }

    pub fn contains(&self, email: &str) -> bool {
        self.position(email).is_some()
    }

    /// Mentors matching `filter`, in registration order.
    pub fn filter(&self, filter: &MentorFilter) -> Vec<&Mentor> {
        self.filter_by(|m| filter.matches(m))
    }

    /// Mentors satisfying an arbitrary predicate, in registration order.
    pub fn filter_by<P>(&self, predicate: P) -> Vec<&Mentor>
    where
        P: Fn(&Mentor) -> bool,
    {
        self.mentors.iter().filter(|m| predicate(m)).collect()
    }

    pub fn len(&self) -> usize {
        self.mentors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mentors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mentor> {
        self.mentors.iter()
    }

    pub fn as_slice(&self) -> &[Mentor] {
        &self.mentors
    }

    fn position(&self, email: &str) -> Option<usize> {
        let email = email.trim();
        self.mentors
            .iter()
            .position(|m| m.email().eq_ignore_ascii_case(email))
    }
}
