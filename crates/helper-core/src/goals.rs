//! Goal vocabulary and the keyword rule mapping goal text to an expertise area.

use crate::models::Expertise;
use crate::validation::is_alpha_words;

/// Goals offered in the goal-setting menu, in menu order.
pub const PREDEFINED_GOALS: [&str; 5] = [
    "Language Practice",
    "Career Guidance",
    "Health Support",
    "Community Engagement",
    "Cultural Adaptation",
];

/// Keyword table, checked top to bottom; the first row with a keyword
/// contained in the goal wins.
const KEYWORDS: &[(Expertise, &[&str])] = &[
    (Expertise::Legal, &["legal", "law", "immigration"]),
    (Expertise::Health, &["health", "medical"]),
    (Expertise::Career, &["career", "job", "employment", "work"]),
    (
        Expertise::CulturalIntegration,
        &["cultur", "community", "integration"],
    ),
    (Expertise::Language, &["language", "english", "practice"]),
];

/// Map free-form goal text to an expertise area.
///
/// ```
/// use helper_core::goals::expertise_for_goal;
/// use helper_core::models::Expertise;
///
/// assert_eq!(expertise_for_goal("career guidance"), Some(Expertise::Career));
/// assert_eq!(expertise_for_goal("Community Engagement"), Some(Expertise::CulturalIntegration));
/// assert_eq!(expertise_for_goal("gardening"), None);
/// ```
pub fn expertise_for_goal(goal: &str) -> Option<Expertise> {
    let lower = goal.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(expertise, _)| *expertise)
}

/// The expertise implied by the first goal that maps to one.
pub fn current_goal_expertise(goals: &[String]) -> Option<Expertise> {
    goals.iter().find_map(|g| expertise_for_goal(g))
}

/// Custom goals must be letters and spaces.
pub fn is_valid_custom_goal(goal: &str) -> bool {
    is_alpha_words(goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_goals_all_map() {
        let mapped: Vec<Option<Expertise>> =
            PREDEFINED_GOALS.iter().map(|g| expertise_for_goal(g)).collect();
        assert_eq!(
            mapped,
            vec![
                Some(Expertise::Language),
                Some(Expertise::Career),
                Some(Expertise::Health),
                Some(Expertise::CulturalIntegration),
                Some(Expertise::CulturalIntegration),
            ]
        );
    }

    #[test]
    fn test_keyword_order_prefers_legal() {
        assert_eq!(expertise_for_goal("immigration paperwork"), Some(Expertise::Legal));
        assert_eq!(expertise_for_goal("find a JOB"), Some(Expertise::Career));
    }

    #[test]
    fn test_current_goal_expertise_skips_unmapped() {
        let goals = vec!["Gardening".to_string(), "Health Support".to_string()];
        assert_eq!(current_goal_expertise(&goals), Some(Expertise::Health));
        assert_eq!(current_goal_expertise(&[]), None);
    }

    #[test]
    fn test_is_valid_custom_goal() {
        assert!(is_valid_custom_goal("Open a bakery"));
        assert!(!is_valid_custom_goal("Save $500"));
    }
}
