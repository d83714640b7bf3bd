//! Demo data used when a document does not exist yet.

use helper_core::models::{Expertise, Mentor, Resource};

/// (location, category, title)
const DEMO_RESOURCES: &[(&str, &str, &str)] = &[
    ("san jose", "Health", "San Jose Community Health Center - https://www.sjcommunityhealth.org"),
    ("san jose", "Education", "San Jose Adult Learning Center - https://www.sjadulted.org"),
    ("san jose", "Legal", "San Jose Immigration Legal Aid - https://www.immigrationadvocates.org"),
    (
        "san jose",
        "Nonprofit Organizations",
        "SIREN: Services, Immigrant Rights & Education Network - https://siren-bayarea.org",
    ),
    ("san jose", "Employment", "San Jose Career and Job Training Center - https://www.careercentersanjose.org"),
    ("san jose", "Mental Health", "San Jose Family Counseling Center - https://www.sanjosecounseling.com"),
    ("san jose", "Housing", "San Jose Housing Assistance - https://www.sanjosehousing.org"),
    ("san jose", "Transportation", "San Jose Public Transport Assistance - https://www.vta.org"),
    ("cupertino", "Cultural", "Cupertino Cultural Center - https://www.cupertinoculture.org"),
    ("cupertino", "Education", "Cupertino Language Immersion Program - https://www.clipprogram.org"),
    ("cupertino", "Nonprofit Organizations", "Cupertino Immigrant Support Network - https://www.cupertinoisn.org"),
    ("cupertino", "Legal", "Cupertino Legal Aid Society - https://www.cupertinolegalaid.org"),
    ("cupertino", "Health", "Cupertino Community Clinic - https://www.cupertinocommunityclinic.org"),
    ("cupertino", "Childcare", "Cupertino Childcare Resources - https://www.cupertinochildcare.org"),
    ("san francisco", "Health", "San Francisco General Hospital - https://www.sfgh.org"),
    ("san francisco", "Education", "City College of San Francisco - https://www.ccsf.edu"),
    ("san francisco", "Legal", "San Francisco Legal Aid Society - https://www.legalaidatwork.org"),
    ("san francisco", "Nonprofit Organizations", "SF Immigrant Support Network - https://www.sfisn.org"),
    (
        "san francisco",
        "Employment",
        "San Francisco Workforce Development Center - https://www.workforcedevelopmentsf.org",
    ),
    ("san francisco", "Mental Health", "San Francisco Behavioral Health Center - https://www.sfbhc.org"),
    ("san francisco", "Housing", "San Francisco Housing Support Services - https://www.sfhousing.org"),
    ("san francisco", "Cultural", "San Francisco Cultural Center - https://www.sfculturalcenter.org"),
    ("san francisco", "Transportation", "San Francisco Muni Assistance - https://www.sfmta.com"),
    ("san francisco", "Childcare", "San Francisco Childcare Resources - https://www.sfchildcare.org"),
];

/// (name, email, expertise, languages)
const DEMO_MENTORS: &[(&str, &str, Expertise, &[&str])] = &[
    ("Alice Smith", "alice.smith@example.com", Expertise::Language, &["english", "spanish"]),
    ("Juan Perez", "juan.perez@example.com", Expertise::Language, &["spanish", "english"]),
    ("Mai Nguyen", "mai.nguyen@example.com", Expertise::Language, &["vietnamese", "english"]),
    ("Ahmet Yilmaz", "ahmet@example.com", Expertise::CulturalIntegration, &["turkish", "english"]),
    ("Sofia Rossi", "sofia.rossi@example.com", Expertise::CulturalIntegration, &["italian", "english"]),
    ("Charlie Davis", "charlie.davis@example.com", Expertise::Career, &["english", "french"]),
    ("Priya Patel", "priya.patel@example.com", Expertise::Career, &["hindi", "english"]),
    ("Dana Lee", "dana.lee@example.com", Expertise::Health, &["korean", "english"]),
    ("Alex Green", "alex.green@example.com", Expertise::Health, &["english", "german"]),
    ("Eve Martinez", "eve.martinez@example.com", Expertise::Legal, &["english", "portuguese"]),
    ("Yuki Tanaka", "yuki.tanaka@example.com", Expertise::Legal, &["japanese", "english"]),
];

/// Resources for San Jose, Cupertino and San Francisco.
pub fn demo_resources() -> helper_core::Result<Vec<Resource>> {
    DEMO_RESOURCES
        .iter()
        .map(|(location, category, title)| Resource::new(location, category, title))
        .collect()
}

/// Two or three available mentors per expertise area.
pub fn demo_mentors() -> helper_core::Result<Vec<Mentor>> {
    DEMO_MENTORS
        .iter()
        .map(|(name, email, expertise, languages)| {
            let languages: Vec<String> = languages.iter().map(|l| l.to_string()).collect();
            Mentor::new(name, email, *expertise, &languages, true)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use helper_core::{MentorRegistry, ResourceCatalog};

    #[test]
    fn test_demo_resources_are_valid_and_unique() {
        let resources = demo_resources().unwrap();
        assert_eq!(resources.len(), 24);
        let catalog = ResourceCatalog::from_resources(resources).unwrap();
        assert_eq!(catalog.locations(), vec!["cupertino", "san francisco", "san jose"]);
        assert_eq!(catalog.find_by_location_and_category("San Jose", "mental health").len(), 1);
    }

    #[test]
    fn test_demo_mentors_cover_every_expertise() {
        let registry = MentorRegistry::from_mentors(demo_mentors().unwrap()).unwrap();
        assert_eq!(registry.len(), 11);
        for expertise in Expertise::ALL {
            assert!(
                registry.iter().any(|m| m.has_expertise(expertise)),
                "no demo mentor for {}",
                expertise
            );
        }
        assert!(registry.iter().all(|m| m.is_available()));
    }
}
