use crate::models::{Immigrant, Mentor, ProgressEntry, Resource, TIMESTAMP_FORMAT};

/// Capitalize the first letter of every whitespace-separated word.
///
/// # Examples
///
/// ```
/// use helper_core::formatting::title_case;
///
/// assert_eq!(title_case("san jose"), "San Jose");
/// assert_eq!(title_case("mental health"), "Mental Health");
/// assert_eq!(title_case(""), "");
/// ```
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Human-readable availability label.
pub fn availability_label(available: bool) -> &'static str {
    if available {
        "Available"
    } else {
        "Unavailable"
    }
}

/// One-line mentor summary.
///
/// `[Career Mentor] Name: Priya Patel, Expertise: Career, Availability: Available, Languages: hindi, english`
pub fn format_mentor(mentor: &Mentor) -> String {
    let expertise = mentor
        .expertise()
        .iter()
        .map(|e| e.label())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "[{}] Name: {}, Expertise: {}, Availability: {}, Languages: {}",
        mentor.primary_expertise().role_title(),
        mentor.name(),
        expertise,
        availability_label(mentor.is_available()),
        mentor.languages().join(", ")
    )
}

/// One-line immigrant summary.
pub fn format_immigrant(immigrant: &Immigrant) -> String {
    format!(
        "Name: {}, Email: {}, Native Language: {}, Desired Language: {}, Location: {}, Goals: {}",
        immigrant.name(),
        immigrant.email(),
        title_case(immigrant.native_language()),
        title_case(immigrant.desired_language()),
        immigrant.location(),
        immigrant.goals().join(", ")
    )
}

/// `- <session type> (<timestamp>): <details>`
pub fn format_progress_entry(entry: &ProgressEntry) -> String {
    format!(
        "- {} ({}): {}",
        entry.session_type,
        entry.timestamp.format(TIMESTAMP_FORMAT),
        entry.details
    )
}

/// Render resources as `- <Category>: title, title` lines, one per category.
///
/// Input is expected grouped by category, as returned by
/// [`crate::catalog::ResourceCatalog::find_by_location`].
pub fn format_resources_by_category(resources: &[Resource]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current: Option<&str> = None;
    let mut titles: Vec<&str> = Vec::new();

    for resource in resources {
        if current != Some(resource.category()) {
            if let Some(category) = current {
                lines.push(format!("- {}: {}", title_case(category), titles.join(", ")));
            }
            current = Some(resource.category());
            titles.clear();
        }
        titles.push(resource.title());
    }
    if let Some(category) = current {
        lines.push(format!("- {}: {}", title_case(category), titles.join(", ")));
    }
    lines
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expertise;
    use chrono::NaiveDate;

    // ── title_case ───────────────────────────────────────────────────────────

    #[test]
    fn test_title_case_collapses_whitespace() {
        assert_eq!(title_case("  san   francisco "), "San Francisco");
    }

    #[test]
    fn test_title_case_keeps_rest_of_word() {
        assert_eq!(title_case("sIREN network"), "SIREN Network");
    }

    // ── format_mentor ────────────────────────────────────────────────────────

    #[test]
    fn test_format_mentor() {
        let m = Mentor::new(
            "Priya Patel",
            "priya@example.com",
            Expertise::Career,
            &["hindi".to_string(), "english".to_string()],
            true,
        )
        .unwrap();
        assert_eq!(
            format_mentor(&m),
            "[Career Mentor] Name: Priya Patel, Expertise: Career, Availability: Available, Languages: hindi, english"
        );
    }

    // ── format_immigrant ─────────────────────────────────────────────────────

    #[test]
    fn test_format_immigrant() {
        let imm = Immigrant::new(
            "Ana Lopez",
            "ana@example.com",
            "spanish",
            "english",
            "San Jose",
            vec!["Career Guidance".into(), "Health Support".into()],
        )
        .unwrap();
        assert_eq!(
            format_immigrant(&imm),
            "Name: Ana Lopez, Email: ana@example.com, Native Language: Spanish, \
             Desired Language: English, Location: San Jose, Goals: Career Guidance, Health Support"
        );
    }

    // ── format_progress_entry ────────────────────────────────────────────────

    #[test]
    fn test_format_progress_entry() {
        let at = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap().and_hms_opt(17, 45, 9).unwrap();
        let entry = ProgressEntry::mentor_matched("Dana Lee", at);
        assert_eq!(
            format_progress_entry(&entry),
            "- Mentor Matched (2024-06-30 17:45:09): Matched with Dana Lee"
        );
    }

    // ── format_resources_by_category ─────────────────────────────────────────

    #[test]
    fn test_format_resources_by_category() {
        let resources = vec![
            Resource::new("sf", "health", "General Hospital").unwrap(),
            Resource::new("sf", "legal", "Aid A").unwrap(),
            Resource::new("sf", "legal", "Aid B").unwrap(),
        ];
        assert_eq!(
            format_resources_by_category(&resources),
            vec!["- Health: General Hospital", "- Legal: Aid A, Aid B"]
        );
    }

    #[test]
    fn test_format_resources_by_category_empty() {
        assert!(format_resources_by_category(&[]).is_empty());
    }
}
