use clap::Parser;
use crate::code::SecretCode;
use crate::error::EXIT_RUNTIME_ERROR;
use crate::feedback::{Scored, format_feedback};
use crate::game_state::{GameInterface, play};
use crate::info_log;
use crate::input::{DEFAULT_RESPONSE, InputSource, demo_script, parse_scripted};
use rand::Rng;
use std::io::{self, BufRead, Write};

/// Codebreaker with difficulty levels and hints
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run the self-test battery and exit
    #[arg(long)]
    pub test: bool,

    /// Run in auto/demo mode (non-interactive)
    #[arg(long)]
    pub auto: bool,

    /// Scripted responses, comma-separated (e.g. "medium,1234,hint")
    #[arg(long, env = "CODEBREAKER_INPUTS")]
    pub sim: Option<String>,

    /// Response used once live and scripted input are both unavailable
    #[arg(long, default_value = DEFAULT_RESPONSE)]
    pub default_response: String,

    /// Seed for the random generator, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// The scripted responses for this run. An explicit list wins; `--auto`
    /// supplies the demo guesses only when nothing else was given.
    pub fn scripted_inputs(&self) -> Vec<String> {
        let scripted = self.sim.as_deref().map(parse_scripted).unwrap_or_default();
        if self.auto && scripted.is_empty() {
            return demo_script();
        }
        scripted
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Plays one game and returns the process exit code. Every outcome,
/// a loss included, is a normal finish; an error during play is reported
/// to `out` and mapped to a nonzero code.
pub fn run_game<I: GameInterface, W: Write>(
    ui: &mut I,
    rng: &mut impl Rng,
    out: &mut W,
) -> u8 {
    match play(ui, rng) {
        Ok(outcome) => {
            info_log!("finished: {:?}", outcome);
            0
        }
        Err(e) => {
            log::error!("game aborted: {e}");
            let _ = writeln!(out, "An unexpected error occurred during play: {e}");
            EXIT_RUNTIME_ERROR
        }
    }
}

pub fn display_instructions<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "=== CODEBREAKER: ADVANCED EDITION ===")?;
    writeln!(out, "Instructions:")?;
    writeln!(out, "✅ = Correct digit & correct position")?;
    writeln!(out, "⚠️ = Digit is in code but wrong position")?;
    writeln!(out, "❌ = Digit not in code at all")?;
    writeln!(out, "You can type 'hint' once to reveal one correct digit (costs 2 attempts).")?;
    writeln!(out, "Type 'quit' anytime to exit.\n")
}

/// Terminal implementation of the GameInterface trait.
/// Prompts go through the input source, everything else is written to `out`.
pub struct CliInterface<R: BufRead, W: Write> {
    input: InputSource<R>,
    out: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(input: InputSource<R>, out: W) -> Self {
        Self { input, out }
    }

    pub fn into_parts(self) -> (InputSource<R>, W) {
        (self.input, self.out)
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn prompt(&mut self, prompt: &str) -> io::Result<String> {
        self.input.get(prompt, &mut self.out)
    }

    fn display_instructions(&mut self) -> io::Result<()> {
        display_instructions(&mut self.out)
    }

    fn display_difficulty_fallback(&mut self) -> io::Result<()> {
        writeln!(self.out, "Invalid choice, defaulting to Easy mode.")
    }

    fn display_quit(&mut self) -> io::Result<()> {
        writeln!(self.out, "Quitting game.")
    }

    fn display_hint(&mut self, position: usize, digit: char) -> io::Result<()> {
        writeln!(self.out, "💡 Hint: The digit at position {} is {digit}", position + 1)
    }

    fn display_hint_already_used(&mut self) -> io::Result<()> {
        writeln!(self.out, "Hint already used! You can use only one per game.")
    }

    fn display_invalid_guess(&mut self, code_length: usize) -> io::Result<()> {
        writeln!(
            self.out,
            "Enter exactly {code_length} digits (e.g. {}).",
            "0".repeat(code_length)
        )
    }

    fn display_feedback(&mut self, scored: &[Scored]) -> io::Result<()> {
        writeln!(self.out, "{}", format_feedback(scored))
    }

    fn display_win(&mut self) -> io::Result<()> {
        writeln!(self.out, "ACCESS GRANTED! ✅ You cracked the code!")
    }

    fn display_loss(&mut self, secret: &SecretCode) -> io::Result<()> {
        writeln!(self.out, "ACCESS DENIED. The code was {secret}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct ClosedStdout;

    impl Write for ClosedStdout {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn scripted_ui(responses: &[&str]) -> CliInterface<io::Empty, Vec<u8>> {
        let responses = responses.iter().map(|s| s.to_string()).collect();
        CliInterface::new(
            InputSource::new(io::empty(), false, responses, DEFAULT_RESPONSE),
            Vec::new(),
        )
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("codebreaker").chain(args.iter().copied())).unwrap()
    }

    fn output_of<F>(f: F) -> String
    where
        F: FnOnce(&mut CliInterface<io::Empty, Vec<u8>>) -> io::Result<()>,
    {
        let input = InputSource::new(io::empty(), false, Vec::new(), DEFAULT_RESPONSE);
        let mut ui = CliInterface::new(input, Vec::new());
        f(&mut ui).unwrap();
        String::from_utf8(ui.into_parts().1).unwrap()
    }

    #[test]
    fn test_parse_cli_defaults() {
        let cli = cli(&[]);
        assert!(!cli.test);
        assert!(!cli.auto);
        assert_eq!(cli.default_response, "quit");
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_parse_cli_flags() {
        let cli = cli(&["--test", "--auto", "--seed", "7", "--default-response", "exit"]);
        assert!(cli.test);
        assert!(cli.auto);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.default_response, "exit");
    }

    #[test]
    fn test_sim_list_is_split() {
        let cli = cli(&["--sim", "medium, 1234,,hint"]);
        assert_eq!(cli.scripted_inputs(), vec!["medium", "1234", "hint"]);
    }

    #[test]
    fn test_auto_uses_demo_script_without_sim() {
        let cli = Cli {
            test: false,
            auto: true,
            sim: None,
            default_response: DEFAULT_RESPONSE.to_string(),
            seed: None,
        };
        assert_eq!(cli.scripted_inputs(), demo_script());
    }

    #[test]
    fn test_auto_prefers_explicit_sim() {
        let cli = Cli {
            test: false,
            auto: true,
            sim: Some("hard,quit".to_string()),
            default_response: DEFAULT_RESPONSE.to_string(),
            seed: None,
        };
        assert_eq!(cli.scripted_inputs(), vec!["hard", "quit"]);
    }

    #[test]
    fn test_blank_sim_falls_back_to_demo_in_auto() {
        let cli = Cli {
            test: false,
            auto: true,
            sim: Some(" , ".to_string()),
            default_response: DEFAULT_RESPONSE.to_string(),
            seed: None,
        };
        assert_eq!(cli.scripted_inputs(), demo_script());
    }

    #[test]
    fn test_invalid_guess_message() {
        let text = output_of(|ui| ui.display_invalid_guess(4));
        assert_eq!(text, "Enter exactly 4 digits (e.g. 0000).\n");
    }

    #[test]
    fn test_hint_message_is_one_based() {
        let text = output_of(|ui| ui.display_hint(0, '7'));
        assert_eq!(text, "💡 Hint: The digit at position 1 is 7\n");
    }

    #[test]
    fn test_loss_message_reveals_code() {
        let secret: SecretCode = "042".parse().unwrap();
        let text = output_of(|ui| ui.display_loss(&secret));
        assert_eq!(text, "ACCESS DENIED. The code was 042.\n");
    }

    #[test]
    fn test_prompt_echoes_scripted_value() {
        let input = InputSource::new(io::empty(), false, vec!["hard".to_string()], "quit");
        let mut ui = CliInterface::new(input, Vec::new());
        assert_eq!(ui.prompt("Choose:").unwrap(), "hard");
        assert_eq!(String::from_utf8(ui.into_parts().1).unwrap(), "Choose: hard\n");
    }

    #[test]
    fn test_run_game_loss_exits_zero() {
        // Five guesses of a code that differs everywhere from the secret.
        let secret = SecretCode::generate(5, &mut StdRng::seed_from_u64(12));
        let wrong: String = secret
            .as_str()
            .chars()
            .map(|c| if c == '9' { '0' } else { char::from(c as u8 + 1) })
            .collect();
        let mut responses = vec!["hard"];
        responses.extend([wrong.as_str(); 5]);
        let mut ui = scripted_ui(&responses);
        let mut errors = Vec::new();

        let code = run_game(&mut ui, &mut StdRng::seed_from_u64(12), &mut errors);

        assert_eq!(code, 0);
        assert!(errors.is_empty());
        let text = String::from_utf8(ui.into_parts().1).unwrap();
        assert!(text.contains(&format!("ACCESS DENIED. The code was {secret}.")));
    }

    #[test]
    fn test_run_game_quit_exits_zero() {
        let mut ui = scripted_ui(&["easy", "quit"]);
        let mut errors = Vec::new();
        assert_eq!(run_game(&mut ui, &mut StdRng::seed_from_u64(1), &mut errors), 0);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_run_game_output_failure_exits_one() {
        let input = InputSource::new(io::empty(), false, Vec::new(), DEFAULT_RESPONSE);
        let mut ui = CliInterface::new(input, ClosedStdout);
        let mut errors = Vec::new();

        let code = run_game(&mut ui, &mut StdRng::seed_from_u64(1), &mut errors);

        assert_eq!(code, EXIT_RUNTIME_ERROR);
        let text = String::from_utf8(errors).unwrap();
        assert!(text.starts_with("An unexpected error occurred during play: "));
        assert!(text.contains("stdout closed"));
    }
}
