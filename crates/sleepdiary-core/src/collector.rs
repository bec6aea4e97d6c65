//! Interactive collection of a diary entry.
//!
//! [`DiaryCollector`] asks the diary questions in order and builds a
//! [`RawEntry`]. Input comes from any [`LineSource`], so the same flow runs
//! against the terminal ([`StdinLines`]) or a canned script ([`ScriptedLines`]).
//!
//! Typing `exit`, `quit`, `q` or `stop` at any prompt cancels the entry.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::diary::RawEntry;
use crate::error::CollectError;
use crate::metrics::parse_clock;

/// A source of input lines.
pub trait LineSource {
    /// Next line without its line terminator, or `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads lines from the process's standard input.
pub struct StdinLines {
    stdin: io::Stdin,
}

impl StdinLines {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Default for StdinLines {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for StdinLines {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.stdin.lock().read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Replays a fixed list of lines, then reports end of input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLines {
    lines: VecDeque<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedLines {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Whether `input` asks to leave the questionnaire.
pub fn is_exit_command(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "exit" | "quit" | "q" | "stop"
    )
}

/// Prompts for each diary field and assembles the answers into a [`RawEntry`].
pub struct DiaryCollector<S, W> {
    source: S,
    out: W,
}

impl<S: LineSource, W: Write> DiaryCollector<S, W> {
    pub fn new(source: S, out: W) -> Self {
        Self { source, out }
    }

    /// Give back the prompt writer, e.g. to inspect what was printed.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run the questionnaire for `entry_date`.
    ///
    /// Numeric answers left empty count as zero; invalid numbers are asked
    /// again. Clock times are stored as typed and parsed later.
    ///
    /// # Errors
    /// [`CollectError::UserExit`] if an exit word is entered,
    /// [`CollectError::InputClosed`] if input ends early, or an IO error.
    pub fn collect(&mut self, entry_date: &str) -> Result<RawEntry, CollectError> {
        writeln!(self.out, "--- Sleep diary for {entry_date} ---")?;
        writeln!(self.out, "Type 'exit', 'quit' or 'q' at any prompt to stop.")?;

        let bedtime = self.ask("What time did you go to bed last night? (HH:MM, e.g. 22:30): ")?;
        let wake_time_target = self.ask("What time did you plan to wake up? (HH:MM, e.g. 07:00): ")?;
        let wake_time_actual =
            self.ask("What time did you actually wake up? (HH:MM, e.g. 07:15): ")?;

        let nap_minutes = self.ask_number("How many minutes did you nap yesterday? (0 if none): ")?;
        let sleep_quality_score = self.ask_number(
            "Rate your sleep quality (1=very poor, 2=poor, 3=fair, 4=good, 5=excellent): ",
        )?;

        let total_sleep_minutes =
            self.ask_duration("How much total sleep did you get? (HH:MM or minutes): ")?;
        let awake_minutes = self.ask_number(
            "How many minutes were you awake during the night (not counting time to fall asleep)? ",
        )?;
        let sleep_latency_minutes =
            self.ask_number("How many minutes did it take you to fall asleep? ")?;
        let wake_count = self.ask_number("How many times did you wake up during the night? ")?;

        let notes = self.ask("Any notes about your sleep? (optional, press Enter to skip): ")?;

        Ok(RawEntry {
            entry_date: entry_date.to_string(),
            bedtime,
            wake_time_target,
            wake_time_actual,
            nap_minutes,
            sleep_quality_score,
            total_sleep_minutes,
            awake_minutes,
            sleep_latency_minutes,
            wake_count,
            notes: (!notes.is_empty()).then_some(notes),
        })
    }

    fn ask(&mut self, prompt: &str) -> Result<String, CollectError> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let line = self.source.next_line()?.ok_or(CollectError::InputClosed)?;
        let answer = line.trim();
        if is_exit_command(answer) {
            return Err(CollectError::UserExit);
        }
        Ok(answer.to_string())
    }

    fn ask_number(&mut self, prompt: &str) -> Result<u32, CollectError> {
        loop {
            let answer = self.ask(prompt)?;
            if answer.is_empty() {
                return Ok(0);
            }
            match answer.parse::<u32>() {
                Ok(n) => return Ok(n),
                Err(_) => writeln!(self.out, "Please enter a valid number (or 'exit' to quit).")?,
            }
        }
    }

    /// Accepts either plain minutes or an `HH:MM` duration.
    fn ask_duration(&mut self, prompt: &str) -> Result<u32, CollectError> {
        loop {
            let answer = self.ask(prompt)?;
            if answer.is_empty() {
                return Ok(0);
            }
            if let Ok(minutes) = answer.parse::<u32>() {
                return Ok(minutes);
            }
            match parse_clock(&answer) {
                Ok(minutes) => return Ok(minutes),
                Err(e) => writeln!(self.out, "Please enter HH:MM or a number of minutes ({e}).")?,
            }
        }
    }
}
