//! Resource browsing and contribution.

use std::io::{self, BufRead, Write};

use helper_core::formatting::{format_resources_by_category, title_case};
use helper_core::validation::{normalize_key, validate_non_empty};
use helper_core::Resource;
use tracing::info;

use super::{ask_location, persist, Console};
use crate::app::Toolkit;

pub(super) fn menu<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &mut Toolkit) -> io::Result<()> {
    loop {
        console.say("")?;
        console.say("--- Community Resources ---")?;
        console.list([
            "View all resources in a city",
            "Search by city and category",
            "Add a resource",
            "Back",
        ])?;
        match console.choose("Enter your choice: ", 4)? {
            1 => view_city(console, toolkit)?,
            2 => search(console, toolkit)?,
            3 => add(console, toolkit)?,
            _ => return Ok(()),
        }
    }
}

fn view_city<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &Toolkit) -> io::Result<()> {
    let location = ask_location(console, "Enter your city: ")?;
    let found = toolkit.catalog.find_by_location(&location);
    if found.is_empty() {
        return report_unknown_city(console, toolkit, &location);
    }
    console.say(format!("Resources in {}:", title_case(&location)))?;
    for line in format_resources_by_category(&found) {
        console.say(line)?;
    }
    Ok(())
}

fn search<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &Toolkit) -> io::Result<()> {
    let location = ask_location(console, "Enter your city: ")?;
    let categories = toolkit.catalog.categories_in(&location);
    if categories.is_empty() {
        return report_unknown_city(console, toolkit, &location);
    }
    console.say(format!(
        "Categories: {}",
        categories.iter().map(|c| title_case(c)).collect::<Vec<_>>().join(", ")
    ))?;

    let category = console.ask_with("Enter a category: ", |answer| validate_non_empty("category", answer))?;
    let found = toolkit.catalog.find_by_location_and_category(&location, &category);
    if found.is_empty() {
        return console.say(format!(
            "No {} resources found in {}.",
            title_case(&normalize_key(&category)),
            title_case(&location)
        ));
    }
    for resource in &found {
        console.say(format!("- {}", resource.title()))?;
    }
    Ok(())
}

fn add<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &mut Toolkit) -> io::Result<()> {
    let location = ask_location(console, "City: ")?;
    let category = console.ask_with("Category: ", |answer| validate_non_empty("category", answer))?;
    let title = console.ask_with("Resource name and link: ", |answer| validate_non_empty("title", answer))?;

    let added = Resource::new(&location, &category, &title).and_then(|resource| toolkit.catalog.add(resource));
    match added {
        Ok(()) => {
            info!("Added resource '{}' under {} in {}", title, category, location);
            console.say("Resource added. Thank you for contributing!")?;
            persist(console, toolkit.save_resources())
        }
        Err(e) => console.say(e),
    }
}

fn report_unknown_city<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    toolkit: &Toolkit,
    location: &str,
) -> io::Result<()> {
    console.say(format!("No resources found for {}.", title_case(location)))?;
    let known = toolkit.catalog.locations();
    if !known.is_empty() {
        console.say(format!(
            "Resources are available for: {}",
            known.iter().map(|l| title_case(l)).collect::<Vec<_>>().join(", ")
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tests::{drive, seeded_toolkit};
    use tempfile::TempDir;

    #[test]
    fn test_view_city_groups_by_category() {
        let tmp = TempDir::new().unwrap();
        let mut toolkit = seeded_toolkit(&tmp);
        let out = drive(&mut toolkit, "3\n1\ncupertino\n4\n4\n");

        assert!(out.contains("Resources in Cupertino:"));
        assert!(out.contains("- Childcare: Cupertino Childcare Resources - https://www.cupertinochildcare.org"));
        assert!(!out.contains("San Jose Adult Learning Center"));
    }

    #[test]
    fn test_search_returns_matching_titles_only() {
        let tmp = TempDir::new().unwrap();
        let mut toolkit = seeded_toolkit(&tmp);
        let out = drive(&mut toolkit, "3\n2\nSan Francisco\nLEGAL\n4\n4\n");

        assert!(out.contains("- San Francisco Legal Aid Society"));
        assert!(!out.contains("Cupertino Legal Aid Society"));
    }

    #[test]
    fn test_unknown_city_lists_known_locations() {
        let tmp = TempDir::new().unwrap();
        let mut toolkit = seeded_toolkit(&tmp);
        let out = drive(&mut toolkit, "3\n1\nOakland\n4\n4\n");

        assert!(out.contains("No resources found for Oakland."));
        assert!(out.contains("Resources are available for: Cupertino, San Francisco, San Jose"));
    }

    #[test]
    fn test_add_resource_saves_and_rejects_duplicate() {
        let tmp = TempDir::new().unwrap();
        let mut toolkit = seeded_toolkit(&tmp);
        let add = "3\n3\nOakland\nFood\nOakland Food Bank\n";
        let out = drive(&mut toolkit, &format!("{add}{add}4\n4\n"));

        assert_eq!(out.matches("Resource added.").count(), 1);
        assert!(out.contains("already exists"));
        assert_eq!(toolkit.catalog.find_by_location_and_category("oakland", "food").len(), 1);

        let saved = std::fs::read_to_string(tmp.path().join("resources.json")).unwrap();
        assert!(saved.contains("Oakland Food Bank"));
    }
}
