//! Interactive text menus.
//!
//! Every menu reads from and writes to a [`Console`], so flows can be driven
//! from in-memory buffers in tests. End of input unwinds as an
//! [`io::ErrorKind::UnexpectedEof`] error and is treated like choosing
//! "Exit" by [`run`].

mod immigrant;
mod resources;
mod volunteer;

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use helper_core::goals::{is_valid_custom_goal, PREDEFINED_GOALS};
use helper_core::validation::{
    is_alpha_words, is_supported_language, normalize_key, validate_email, SUPPORTED_LANGUAGES,
};
use tracing::{debug, error, info};

use crate::app::Toolkit;

const GOODBYE: &str = "Goodbye! Thank you for using Immigrant Helper.";

// ── Console ───────────────────────────────────────────────────────────────────

/// Line-oriented prompt wrapper over any reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Write one line.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Print `prompt` and read one trimmed line.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        Ok(line.trim().to_string())
    }

    /// Ask until `parse` accepts the answer, printing its complaint each time.
    pub fn ask_with<T, E: Display>(
        &mut self,
        prompt: &str,
        mut parse: impl FnMut(&str) -> Result<T, E>,
    ) -> io::Result<T> {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(complaint) => self.say(complaint)?,
            }
        }
    }

    /// Ask for a number in `1..=max`.
    pub fn choose(&mut self, prompt: &str, max: usize) -> io::Result<usize> {
        self.ask_with(prompt, |answer| match answer.parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => Ok(n),
            _ => Err(format!("Invalid choice. Please enter a number between 1 and {}.", max)),
        })
    }

    /// Ask a yes/no question.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self.ask_with(prompt, |answer| match answer.to_lowercase().as_str() {
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            _ => Err("Please answer 'y' or 'n'."),
        })
    }

    /// Print a numbered list of options.
    pub fn list<T: Display>(&mut self, options: impl IntoIterator<Item = T>) -> io::Result<()> {
        for (i, option) in options.into_iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, option)?;
        }
        Ok(())
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Run the main menu until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &mut Toolkit) -> io::Result<()> {
    match main_menu(console, toolkit) {
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            debug!("Input closed, leaving");
            console.say("")?;
            console.say(GOODBYE)
        }
        other => other,
    }
}

fn main_menu<R: BufRead, W: Write>(console: &mut Console<R, W>, toolkit: &mut Toolkit) -> io::Result<()> {
    loop {
        console.say("")?;
        console.say("=== Immigrant Helper ===")?;
        console.list([
            "I am an immigrant looking for help",
            "I am a volunteer mentor",
            "Browse community resources",
            "Exit",
        ])?;
        match console.choose("Enter your choice: ", 4)? {
            1 => immigrant::enter(console, toolkit)?,
            2 => volunteer::enter(console, toolkit)?,
            3 => resources::menu(console, toolkit)?,
            _ => {
                info!("User exited");
                return console.say(GOODBYE);
            }
        }
    }
}

// ── Shared prompts ────────────────────────────────────────────────────────────

fn ask_email<R: BufRead, W: Write>(console: &mut Console<R, W>, prompt: &str) -> io::Result<String> {
    console.ask_with(prompt, |answer| validate_email("email", answer))
}

fn ask_language<R: BufRead, W: Write>(console: &mut Console<R, W>, prompt: &str) -> io::Result<String> {
    console.ask_with(prompt, |answer| {
        if is_supported_language(answer) {
            Ok(normalize_key(answer))
        } else {
            Err(format!(
                "Unsupported language. Choose from: {}",
                SUPPORTED_LANGUAGES.join(", ")
            ))
        }
    })
}

fn ask_location<R: BufRead, W: Write>(console: &mut Console<R, W>, prompt: &str) -> io::Result<String> {
    console.ask_with(prompt, |answer| {
        if is_alpha_words(answer) {
            Ok(answer.split_whitespace().collect::<Vec<_>>().join(" "))
        } else {
            Err("Location must contain only letters and spaces.")
        }
    })
}

/// Collect at least one goal from the predefined list or as free text.
fn ask_goals<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<Vec<String>> {
    let custom = PREDEFINED_GOALS.len() + 1;
    let done = PREDEFINED_GOALS.len() + 2;
    let mut goals: Vec<String> = Vec::new();

    loop {
        console.say("")?;
        console.say("Select your goals:")?;
        console.list(PREDEFINED_GOALS.iter().copied().chain(["Enter a custom goal", "Done"]))?;
        let choice = console.choose("Enter your choice: ", done)?;

        if choice == done {
            if goals.is_empty() {
                console.say("Please select at least one goal.")?;
                continue;
            }
            return Ok(goals);
        }

        let goal = if choice == custom {
            console.ask_with("Describe your goal: ", |answer| {
                if is_valid_custom_goal(answer) {
                    Ok(answer.to_string())
                } else {
                    Err("Goals may contain only letters and spaces.")
                }
            })?
        } else {
            PREDEFINED_GOALS[choice - 1].to_string()
        };

        if goals.contains(&goal) {
            console.say(format!("'{}' is already selected.", goal))?;
        } else {
            console.say(format!("Added goal: {}", goal))?;
            goals.push(goal);
        }
    }
}

/// Report the result of a save. Failures are shown and logged but do not
/// leave the menu.
fn persist<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    saved: helper_data::Result<PathBuf>,
) -> io::Result<()> {
    match saved {
        Ok(path) => {
            debug!("Saved {}", path.display());
            Ok(())
        }
        Err(e) => {
            error!("Save failed: {}", e);
            console.say(format!("Warning: your changes could not be saved ({}).", e))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
