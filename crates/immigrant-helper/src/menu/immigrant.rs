//! Immigrant side: registration, mentor requests, progress and goals.

use std::io::{self, BufRead, Write};

use chrono::Local;
use helper_core::formatting::{format_immigrant, format_progress_entry};
use helper_core::validation::validate_person_name;
use helper_core::{Expertise, Immigrant, MatchBasis, MatchOutcome, MatchingEngine, ProgressEntry};
use tracing::{info, warn};

use super::{ask_email, ask_goals, ask_language, ask_location, persist, resources, Console};
use crate::app::Toolkit;

/// Log in by email, registering a new profile when the email is unknown.
pub(super) fn enter<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &mut Toolkit) -> io::Result<()> {
    let email = ask_email(console, "Enter your email: ")?;

    if let Some(immigrant) = toolkit.immigrants.get(&email) {
        console.say(format!("Welcome back, {}!", immigrant.name()))?;
    } else {
        console.say("No profile found for that email. Let's create one.")?;
        let immigrant = register(console, &email)?;
        console.say(format!("Welcome, {}!", immigrant.name()))?;
        info!("Registered immigrant {}", immigrant.email());
        toolkit.immigrants.insert(immigrant);
        persist(console, toolkit.save_immigrants())?;
    }

    menu(console, toolkit, &email)
}

fn register<R: BufRead, W: Write>(console: &mut Console<R, W>, email: &str) -> io::Result<Immigrant> {
    loop {
        let name = console.ask_with("Enter your full name: ", |answer| validate_person_name("name", answer))?;
        let native = ask_language(console, "Enter your native language: ")?;
        let desired = ask_language(console, "Enter the language you want to learn: ")?;
        let location = ask_location(console, "Enter your city: ")?;
        let goals = ask_goals(console)?;

        match Immigrant::new(&name, email, &native, &desired, &location, goals) {
            Ok(immigrant) => return Ok(immigrant),
            Err(e) => console.say(format!("{}. Please try again.", e))?,
        }
    }
}

fn menu<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &mut Toolkit, email: &str) -> io::Result<()> {
    loop {
        console.say("")?;
        console.say("--- Immigrant Menu ---")?;
        console.list([
            "Ask for a mentor",
            "Check community resources",
            "View my progress",
            "Update my goals",
            "Back to main menu",
        ])?;
        match console.choose("Enter your choice: ", 5)? {
            1 => ask_for_mentor(console, toolkit, email)?,
            2 => resources::menu(console, toolkit)?,
            3 => view_progress(console, toolkit, email)?,
            4 => update_goals(console, toolkit, email)?,
            _ => return Ok(()),
        }
    }
}

fn ask_for_mentor<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    toolkit: &mut Toolkit,
    email: &str,
) -> io::Result<()> {
    console.say("What kind of help do you need?")?;
    let from_goals = Expertise::ALL.len() + 1;
    console.list(Expertise::ALL.iter().map(|e| e.label()).chain(["Whatever fits my goals"]))?;
    let choice = console.choose("Enter your choice: ", from_goals)?;
    let requested = (choice != from_goals).then(|| Expertise::ALL[choice - 1]);

    let Some(immigrant) = toolkit.immigrants.get(email) else {
        warn!("Immigrant {} disappeared from the directory", email);
        return Ok(());
    };

    let engine = MatchingEngine::new(&toolkit.registry);
    let outcome = match requested {
        Some(expertise) => engine.match_mentor_for(immigrant, expertise),
        None => engine.match_mentor(immigrant),
    };

    let mentor_name = match outcome {
        MatchOutcome::Matched { mentor, basis } => {
            console.say(format!("Congratulations! You have been matched with {}.", mentor.name()))?;
            console.say(format!("Contact email: {}", mentor.email()))?;
            if basis == MatchBasis::LanguageOnly {
                console.say(format!(
                    "No available mentor with the expertise you asked for speaks your languages; {} can help with {}.",
                    mentor.name(),
                    mentor.primary_expertise()
                ))?;
            }
            info!("Matched {} with {} ({:?})", email, mentor.email(), basis);
            mentor.name().to_string()
        }
        MatchOutcome::NoMatchFound => {
            info!("No mentor available for {}", email);
            return console.say("Sorry, no available mentors match your request at this time.");
        }
    };

    if let Some(immigrant) = toolkit.immigrants.get_mut(email) {
        immigrant.record_progress(ProgressEntry::mentor_matched(&mentor_name, Local::now().naive_local()));
    }
    persist(console, toolkit.save_immigrants())
}

fn view_progress<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &Toolkit, email: &str) -> io::Result<()> {
    let Some(immigrant) = toolkit.immigrants.get(email) else {
        return Ok(());
    };
    console.say(format_immigrant(immigrant))?;
    if immigrant.progress_log().is_empty() {
        return console.say("No progress recorded yet.");
    }
    console.say("Progress log:")?;
    for entry in immigrant.progress_log() {
        console.say(format_progress_entry(entry))?;
    }
    Ok(())
}

fn update_goals<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &mut Toolkit, email: &str) -> io::Result<()> {
    if let Some(immigrant) = toolkit.immigrants.get(email) {
        console.say(format!("Current goals: {}", immigrant.goals().join(", ")))?;
    }
    let goals = ask_goals(console)?;
    if !console.confirm("Replace your goals with these? (y/n): ")? {
        return console.say("Goals unchanged.");
    }

    let Some(immigrant) = toolkit.immigrants.get_mut(email) else {
        return Ok(());
    };
    match immigrant.update_goals(goals) {
        Ok(()) => {
            console.say(format!("Goals updated: {}", immigrant.goals().join(", ")))?;
            persist(console, toolkit.save_immigrants())
        }
        Err(e) => console.say(e),
    }
}
