use std::collections::VecDeque;
use std::io::{self, BufRead, StdinLock, Write};

use crossterm::tty::IsTty;

use crate::debug_log;

pub const DEFAULT_RESPONSE: &str = "quit";

/// Where player responses come from: a live terminal, a queue of scripted
/// responses, or a fixed default once both are unavailable.
pub struct InputSource<R: BufRead> {
    reader: R,
    interactive: bool,
    scripted: VecDeque<String>,
    default: String,
}

impl<R: BufRead> InputSource<R> {
    pub fn new(
        reader: R,
        interactive: bool,
        scripted: Vec<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            reader,
            interactive,
            scripted: scripted.into(),
            default: default.into(),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn remaining(&self) -> usize {
        self.scripted.len()
    }

    /// Returns the next response for `prompt`, echoing it to `out`.
    ///
    /// A closed or failing live stream is never an error; only failures
    /// writing to `out` are.
    pub fn get<W: Write>(&mut self, prompt: &str, out: &mut W) -> io::Result<String> {
        if self.interactive {
            write!(out, "{prompt} ")?;
            out.flush()?;
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    debug_log!("live input closed, falling back");
                }
                Ok(_) => return Ok(line.trim().to_string()),
                Err(e) => {
                    debug_log!("live input failed ({}), falling back", e);
                }
            }
            // Finish the prompt line left open above.
            writeln!(out)?;
            return self.fallback(prompt, out, "  # fallback after input error");
        }
        self.fallback(prompt, out, "")
    }

    fn fallback<W: Write>(
        &mut self,
        prompt: &str,
        out: &mut W,
        note: &str,
    ) -> io::Result<String> {
        if let Some(response) = self.scripted.pop_front() {
            writeln!(out, "{prompt} {response}{note}")?;
            return Ok(response);
        }
        let note = if note.is_empty() {
            "  # default (non-interactive)"
        } else {
            note
        };
        writeln!(out, "{prompt} {}{note}", self.default)?;
        Ok(self.default.clone())
    }
}

impl InputSource<StdinLock<'static>> {
    /// Reads from the process stdin. Live prompting is used only when both
    /// stdin and stdout are terminals and no scripted responses were given.
    pub fn stdin(scripted: Vec<String>, default: impl Into<String>) -> Self {
        let tty = io::stdin().is_tty() && io::stdout().is_tty();
        let interactive = tty && scripted.is_empty();
        debug_log!(
            "input source: tty={}, interactive={}, scripted={}",
            tty,
            interactive,
            scripted.len()
        );
        Self::new(io::stdin().lock(), interactive, scripted, default)
    }
}

/// Splits a comma-separated response list, trimming entries and dropping
/// empty ones.
pub fn parse_scripted(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Guesses used by `--auto` when nothing else is scripted.
pub fn demo_script() -> Vec<String> {
    ('0'..='5').map(|d| d.to_string().repeat(3)).collect()
}
