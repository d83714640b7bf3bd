//! Volunteer side: mentor registration and self-service.

use std::io::{self, BufRead, Write};

use helper_core::formatting::{availability_label, format_mentor};
use helper_core::matching::mentees_of;
use helper_core::validation::{is_supported_language, normalize_key, validate_person_name, SUPPORTED_LANGUAGES};
use helper_core::{Expertise, Mentor};
use tracing::info;

use super::{ask_email, persist, Console};
use crate::app::Toolkit;

pub(super) fn enter<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &mut Toolkit) -> io::Result<()> {
    let mut current: Option<String> = None;

    loop {
        console.say("")?;
        match &current {
            Some(email) => console.say(format!("--- Volunteer Menu ({}) ---", email))?,
            None => console.say("--- Volunteer Menu ---")?,
        }
        console.list([
            "Log in",
            "Register as a mentor",
            "Update my availability",
            "View my information",
            "View my mentees",
            "Deregister",
            "Back to main menu",
        ])?;
        let choice = console.choose("Enter your choice: ", 7)?;

        match choice {
            1 => current = log_in(console, toolkit)?.or(current),
            2 => current = register(console, toolkit)?.or(current),
            7 => return Ok(()),
            _ => {
                let Some(email) = current.clone() else {
                    console.say("Please log in or register first.")?;
                    continue;
                };
                match choice {
                    3 => update_availability(console, toolkit, &email)?,
                    4 => view_info(console, toolkit, &email)?,
                    5 => view_mentees(console, toolkit, &email)?,
                    _ => {
                        if deregister(console, toolkit, &email)? {
                            current = None;
                        }
                    }
                }
            }
        }
    }
}

fn log_in<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &Toolkit) -> io::Result<Option<String>> {
    let email = ask_email(console, "Enter your email: ")?;
    match toolkit.registry.get(&email) {
        Some(mentor) => {
            console.say(format!("Welcome back, {}!", mentor.name()))?;
            Ok(Some(mentor.email().to_string()))
        }
        None => {
            console.say(format!("No mentor found with email: {}. Please register first.", email))?;
            Ok(None)
        }
    }
}

fn register<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &mut Toolkit) -> io::Result<Option<String>> {
    let name = console.ask_with("Enter your full name: ", |answer| validate_person_name("name", answer))?;
    let email = ask_email(console, "Enter your email: ")?;
    if toolkit.registry.contains(&email) {
        console.say("That email is already registered. Please log in instead.")?;
        return Ok(None);
    }

    console.say("Choose your area of expertise:")?;
    console.list(Expertise::ALL.iter().map(|e| e.label()))?;
    let expertise = Expertise::ALL[console.choose("Enter your choice: ", Expertise::ALL.len())? - 1];

    let languages = console.ask_with("Languages you speak (comma separated): ", parse_languages)?;
    let available = console.confirm("Are you available to take new mentees? (y/n): ")?;

    let registered =
        Mentor::new(&name, &email, expertise, &languages, available).and_then(|mentor| toolkit.registry.register(mentor));
    match registered {
        Ok(()) => {
            info!("Registered mentor {} ({})", email, expertise);
            console.say(format!("Thank you for volunteering, {}!", name))?;
            persist(console, toolkit.save_mentors())?;
            Ok(Some(email))
        }
        Err(e) => {
            console.say(e)?;
            Ok(None)
        }
    }
}

/// Split a comma-separated answer into supported, lowercased languages.
fn parse_languages(answer: &str) -> Result<Vec<String>, String> {
    let mut languages: Vec<String> = Vec::new();
    for part in answer.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if !is_supported_language(part) {
            return Err(format!(
                "Unsupported language '{}'. Choose from: {}",
                part,
                SUPPORTED_LANGUAGES.join(", ")
            ));
        }
        let language = normalize_key(part);
        if !languages.contains(&language) {
            languages.push(language);
        }
    }
    if languages.is_empty() {
        return Err("Please enter at least one language.".to_string());
    }
    Ok(languages)
}

fn update_availability<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    toolkit: &mut Toolkit,
    email: &str,
) -> io::Result<()> {
    if let Some(mentor) = toolkit.registry.get(email) {
        console.say(format!("You are currently {}.", availability_label(mentor.is_available()).to_lowercase()))?;
    }
    let available = console.confirm("Are you available to take new mentees? (y/n): ")?;
    match toolkit.registry.set_availability(email, available) {
        Ok(()) => {
            info!("Mentor {} is now {}", email, availability_label(available));
            console.say(format!("Availability updated to: {}", availability_label(available)))?;
            persist(console, toolkit.save_mentors())
        }
        Err(e) => console.say(e),
    }
}

fn view_info<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &Toolkit, email: &str) -> io::Result<()> {
    match toolkit.registry.get(email) {
        Some(mentor) => console.say(format_mentor(mentor)),
        None => console.say(format!("No mentor found with email: {}", email)),
    }
}

fn view_mentees<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &Toolkit, email: &str) -> io::Result<()> {
    let Some(mentor) = toolkit.registry.get(email) else {
        return console.say(format!("No mentor found with email: {}", email));
    };
    let mentees = mentees_of(mentor, toolkit.immigrants.iter());
    if mentees.is_empty() {
        return console.say("You have no mentees yet.");
    }
    console.say("Your mentees:")?;
    for mentee in mentees {
        console.say(format!("- {} ({})", mentee.name(), mentee.email()))?;
    }
    Ok(())
}

/// Returns `true` when the mentor was removed.
fn deregister<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &mut Toolkit, email: &str) -> io::Result<bool> {
    if !console.confirm("Are you sure you want to deregister? (y/n): ")? {
        console.say("Deregistration cancelled.")?;
        return Ok(false);
    }
    match toolkit.registry.remove(email) {
        Ok(mentor) => {
            info!("Deregistered mentor {}", mentor.email());
            console.say(format!("{} has been deregistered. Thank you for your help!", mentor.name()))?;
            persist(console, toolkit.save_mentors())?;
            Ok(true)
        }
        Err(e) => {
            console.say(e)?;
            Ok(false)
        }
    }
}
