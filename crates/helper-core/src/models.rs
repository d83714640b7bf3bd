use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::validation::{
    normalize_key, validate_email, validate_key, validate_non_empty, validate_person_name,
};

/// Session type recorded when an immigrant is matched with a mentor.
pub const MENTOR_MATCHED: &str = "Mentor Matched";

/// Wall-clock format used for progress timestamps on disk.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Expertise ─────────────────────────────────────────────────────────────────

/// The fixed set of areas a volunteer can mentor in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expertise {
    Language,
    #[serde(rename = "cultural integration")]
    CulturalIntegration,
    Career,
    Health,
    Legal,
}

impl Expertise {
    /// Every variant, in menu order.
    pub const ALL: [Expertise; 5] = [
        Expertise::Language,
        Expertise::CulturalIntegration,
        Expertise::Career,
        Expertise::Health,
        Expertise::Legal,
    ];

    /// Lowercase key used in JSON documents.
    pub fn key(self) -> &'static str {
        match self {
            Expertise::Language => "language",
            Expertise::CulturalIntegration => "cultural integration",
            Expertise::Career => "career",
            Expertise::Health => "health",
            Expertise::Legal => "legal",
        }
    }

    /// Human-readable label, e.g. `"Cultural Integration"`.
    pub fn label(self) -> &'static str {
        match self {
            Expertise::Language => "Language",
            Expertise::CulturalIntegration => "Cultural Integration",
            Expertise::Career => "Career",
            Expertise::Health => "Health",
            Expertise::Legal => "Legal",
        }
    }

    /// Volunteer role title shown next to a mentor, e.g. `"Legal Advisor"`.
    pub fn role_title(self) -> &'static str {
        match self {
            Expertise::Language => "Language Mentor",
            Expertise::CulturalIntegration => "Cultural Integration Mentor",
            Expertise::Career => "Career Mentor",
            Expertise::Health => "Health Advisor",
            Expertise::Legal => "Legal Advisor",
        }
    }
}

impl fmt::Display for Expertise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Expertise {
    type Err = CoreError;

    /// Accepts the JSON key or the label in any case; separators between
    /// "cultural" and "integration" may be a space, `_`, `-` or nothing.
    fn from_str(s: &str) -> Result<Self> {
        let compact: String = normalize_key(s)
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();
        match compact.as_str() {
            "language" => Ok(Expertise::Language),
            "culturalintegration" => Ok(Expertise::CulturalIntegration),
            "career" => Ok(Expertise::Career),
            "health" => Ok(Expertise::Health),
            "legal" => Ok(Expertise::Legal),
            _ => Err(CoreError::validation(
                "expertise",
                format!(
                    "'{}' is not one of: {}",
                    s.trim(),
                    Expertise::ALL.map(Expertise::key).join(", ")
                ),
            )),
        }
    }
}

// ── Progress log ──────────────────────────────────────────────────────────────

/// One entry in an immigrant's progress log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEntry {
    /// Kind of session, e.g. `"Mentor Matched"` or `"Language Practice"`.
    pub session_type: String,
    /// Free-text note.
    pub details: String,
    /// Local wall-clock time the entry was recorded.
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

impl ProgressEntry {
    pub fn new(
        session_type: impl Into<String>,
        details: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            session_type: session_type.into(),
            details: details.into(),
            timestamp,
        }
    }

    /// The entry appended to an immigrant's log after a successful match.
    pub fn mentor_matched(mentor_name: &str, at: NaiveDateTime) -> Self {
        Self::new(MENTOR_MATCHED, format!("Matched with {}", mentor_name), at)
    }

    /// Returns `true` when this entry records a match with exactly
    /// `mentor_name`.
    pub fn names_mentor(&self, mentor_name: &str) -> bool {
        self.session_type == MENTOR_MATCHED && self.details == format!("Matched with {}", mentor_name)
    }
}

/// Serde adapter for [`TIMESTAMP_FORMAT`].
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    /// Parse the on-disk format, also accepting an ISO-8601 `T` separator.
    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S"))
            .ok()
    }
}

// ── Immigrant ─────────────────────────────────────────────────────────────────

/// A person seeking mentoring and community resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Immigrant {
    name: String,
    email: String,
    native_language: String,
    desired_language: String,
    location: String,
    goals: Vec<String>,
    progress_log: Vec<ProgressEntry>,
}

impl Immigrant {
    /// Build a validated immigrant with an empty progress log.
    ///
    /// Languages are stored lowercased; duplicate goals are dropped.
    pub fn new(
        name: &str,
        email: &str,
        native_language: &str,
        desired_language: &str,
        location: &str,
        goals: Vec<String>,
    ) -> Result<Self> {
        Ok(Self {
            name: validate_person_name("name", name)?,
            email: validate_email("email", email)?,
            native_language: normalize_key(&validate_non_empty("native_language", native_language)?),
            desired_language: normalize_key(&validate_non_empty(
                "desired_language",
                desired_language,
            )?),
            location: validate_non_empty("location", location)?,
            goals: dedupe_goals(goals),
            progress_log: Vec::new(),
        })
    }

    /// Attach a previously persisted progress log.
    pub fn with_progress_log(mut self, log: Vec<ProgressEntry>) -> Self {
        self.progress_log = log;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn native_language(&self) -> &str {
        &self.native_language
    }

    pub fn desired_language(&self) -> &str {
        &self.desired_language
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn goals(&self) -> &[String] {
        &self.goals
    }

    pub fn progress_log(&self) -> &[ProgressEntry] {
        &self.progress_log
    }

    /// Both languages the immigrant can be mentored in.
    pub fn languages(&self) -> [&str; 2] {
        [&self.native_language, &self.desired_language]
    }

    /// Replace the goal list. At least one non-blank goal is required.
    pub fn update_goals(&mut self, goals: Vec<String>) -> Result<()> {
        let goals = dedupe_goals(goals);
        if goals.is_empty() {
            return Err(CoreError::validation("goals", "at least one goal is required"));
        }
        self.goals = goals;
        Ok(())
    }

    /// Append an entry to the progress log.
    pub fn record_progress(&mut self, entry: ProgressEntry) {
        self.progress_log.push(entry);
    }
}

fn dedupe_goals(goals: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(goals.len());
    for goal in goals {
        let goal = goal.trim().to_string();
        if !goal.is_empty() && !out.contains(&goal) {
            out.push(goal);
        }
    }
    out
}

// ── Mentor ────────────────────────────────────────────────────────────────────

/// A volunteer mentor.
///
/// Expertise is a set so matching can intersect categories; registration
/// currently allows exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mentor {
    name: String,
    email: String,
    expertise: BTreeSet<Expertise>,
    #[serde(rename = "available_languages")]
    languages: Vec<String>,
    #[serde(rename = "availability")]
    available: bool,
}

impl Mentor {
    /// Build a validated mentor. Languages are trimmed, lowercased and
    /// de-duplicated; at least one is required.
    pub fn new(
        name: &str,
        email: &str,
        expertise: Expertise,
        languages: &[String],
        available: bool,
    ) -> Result<Self> {
        Self::with_expertise(name, email, BTreeSet::from([expertise]), languages, available)
    }

    /// Like [`Mentor::new`] but taking an expertise set, which must hold
    /// exactly one value.
    pub fn with_expertise(
        name: &str,
        email: &str,
        expertise: BTreeSet<Expertise>,
        languages: &[String],
        available: bool,
    ) -> Result<Self> {
        if expertise.len() != 1 {
            return Err(CoreError::validation(
                "expertise",
                format!("exactly one area is required, got {}", expertise.len()),
            ));
        }

        let mut normalized: Vec<String> = Vec::with_capacity(languages.len());
        for lang in languages {
            let lang = normalize_key(lang);
            if !lang.is_empty() && !normalized.contains(&lang) {
                normalized.push(lang);
            }
        }
        if normalized.is_empty() {
            return Err(CoreError::validation(
                "available_languages",
                "at least one language is required",
            ));
        }

        Ok(Self {
            name: validate_person_name("name", name)?,
            email: validate_email("email", email)?,
            expertise,
            languages: normalized,
            available,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn expertise(&self) -> &BTreeSet<Expertise> {
        &self.expertise
    }

    /// The single expertise area allowed in the current scope.
    pub fn primary_expertise(&self) -> Expertise {
        // Construction guarantees a non-empty set.
        self.expertise.iter().next().copied().unwrap_or(Expertise::Language)
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn has_expertise(&self, expertise: Expertise) -> bool {
        self.expertise.contains(&expertise)
    }

    /// Case-insensitive check against the mentor's spoken languages.
    pub fn speaks(&self, language: &str) -> bool {
        let lang = normalize_key(language);
        self.languages.iter().any(|l| *l == lang)
    }

    /// Returns `true` when the mentor speaks at least one of `languages`.
    pub fn speaks_any(&self, languages: &[&str]) -> bool {
        languages.iter().any(|l| self.speaks(l))
    }
}

// ── Resource ──────────────────────────────────────────────────────────────────

/// A community resource filed under a (location, category) bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    location: String,
    category: String,
    title: String,
}

impl Resource {
    /// Build a validated resource. Location and category must be letters and
    /// spaces and are stored lowercased; the title is trimmed.
    pub fn new(location: &str, category: &str, title: &str) -> Result<Self> {
        Ok(Self {
            location: validate_key("location", location)?,
            category: validate_key("category", category)?,
            title: validate_non_empty("title", title)?,
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The (location, category) bucket key.
    pub fn key(&self) -> (&str, &str) {
        (&self.location, &self.category)
    }

    /// Returns `true` when both resources have the same identity tuple.
    pub fn same_identity(&self, other: &Resource) -> bool {
        self.location == other.location
            && self.category == other.category
            && self.title == other.title
    }
}
