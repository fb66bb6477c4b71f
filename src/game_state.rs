use std::io;

use rand::Rng;

use crate::code::{Difficulty, SecretCode};
use crate::error::Error;
use crate::feedback::{Scored, get_feedback, tally};
use crate::{debug_log, info_log};

/// Attempts deducted for revealing a digit.
pub const HINT_COST: i32 = 2;

/// A line of player input, classified before any guess validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Hint,
    Guess(String),
    Invalid,
}

impl Command {
    pub fn classify(input: &str, code_length: usize) -> Self {
        let input = input.trim();
        match input.to_lowercase().as_str() {
            "quit" | "exit" | "giveup" => Self::Quit,
            "hint" => Self::Hint,
            _ if is_valid_guess(input, code_length) => Self::Guess(input.to_string()),
            _ => Self::Invalid,
        }
    }
}

fn is_valid_guess(guess: &str, code_length: usize) -> bool {
    guess.len() == code_length && guess.bytes().all(|b| b.is_ascii_digit())
}

/// What applying one command did to the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    Quit,
    HintRevealed { position: usize, digit: char },
    HintAlreadyUsed,
    Invalid,
    Won,
    Scored(Vec<Scored>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    Quit,
}

/// Presentation seam between the engine and whoever is playing.
pub trait GameInterface {
    fn prompt(&mut self, prompt: &str) -> io::Result<String>;
    fn display_instructions(&mut self) -> io::Result<()>;
    fn display_difficulty_fallback(&mut self) -> io::Result<()>;
    fn display_quit(&mut self) -> io::Result<()>;
    fn display_hint(&mut self, position: usize, digit: char) -> io::Result<()>;
    fn display_hint_already_used(&mut self) -> io::Result<()>;
    fn display_invalid_guess(&mut self, code_length: usize) -> io::Result<()>;
    fn display_feedback(&mut self, scored: &[Scored]) -> io::Result<()>;
    fn display_win(&mut self) -> io::Result<()>;
    fn display_loss(&mut self, secret: &SecretCode) -> io::Result<()>;
}

#[derive(Debug)]
pub struct Game {
    secret: SecretCode,
    difficulty: Difficulty,
    attempts: i32,
    hint_used: bool,
}

impl Game {
    pub fn new(difficulty: Difficulty, rng: &mut impl Rng) -> Self {
        let secret = SecretCode::generate(difficulty.code_length(), rng);
        Self::with_secret(difficulty, secret)
    }

    pub fn with_secret(difficulty: Difficulty, secret: SecretCode) -> Self {
        debug_assert_eq!(secret.len(), difficulty.code_length());
        Self {
            secret,
            difficulty,
            attempts: difficulty.starting_attempts(),
            hint_used: false,
        }
    }

    pub fn secret(&self) -> &SecretCode {
        &self.secret
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// May be negative after a hint on a low budget.
    pub fn attempts_left(&self) -> i32 {
        self.attempts
    }

    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    pub fn is_over(&self) -> bool {
        self.attempts <= 0
    }

    pub fn apply(&mut self, command: Command, rng: &mut impl Rng) -> Turn {
        match command {
            Command::Quit => Turn::Quit,
            Command::Hint if self.hint_used => Turn::HintAlreadyUsed,
            Command::Hint => {
                let position = rng.gen_range(0..self.secret.len());
                let digit = self.secret.digit_at(position).unwrap_or_default();
                self.hint_used = true;
                self.attempts -= HINT_COST;
                Turn::HintRevealed { position, digit }
            }
            Command::Invalid => Turn::Invalid,
            Command::Guess(guess) if self.secret.matches(&guess) => Turn::Won,
            Command::Guess(guess) => {
                let scored = get_feedback(self.secret.as_str(), &guess);
                self.attempts -= 1;
                Turn::Scored(scored)
            }
        }
    }

    /// Drives the guess loop until a win, a quit, or the budget runs out.
    pub fn run<I: GameInterface>(
        &mut self,
        ui: &mut I,
        rng: &mut impl Rng,
    ) -> Result<Outcome, Error> {
        let length = self.difficulty.code_length();
        while !self.is_over() {
            let prompt = format!(
                "[{} attempts left] Enter guess ({length} digits):",
                self.attempts
            );
            let input = ui.prompt(&prompt)?;

            match self.apply(Command::classify(&input, length), rng) {
                Turn::Quit => {
                    ui.display_quit()?;
                    return Ok(Outcome::Quit);
                }
                Turn::HintRevealed { position, digit } => {
                    debug_log!("hint used, {} attempts left", self.attempts);
                    ui.display_hint(position, digit)?;
                }
                Turn::HintAlreadyUsed => ui.display_hint_already_used()?,
                Turn::Invalid => ui.display_invalid_guess(length)?,
                Turn::Won => {
                    ui.display_win()?;
                    return Ok(Outcome::Won);
                }
                Turn::Scored(scored) => {
                    debug_log!("scored (exact, misplaced, absent): {:?}", tally(&scored));
                    ui.display_feedback(&scored)?;
                }
            }
        }

        ui.display_loss(&self.secret)?;
        Ok(Outcome::Lost)
    }
}

/// Plays one full game: instructions, difficulty selection, guess loop.
pub fn play<I: GameInterface>(ui: &mut I, rng: &mut impl Rng) -> Result<Outcome, Error> {
    ui.display_instructions()?;

    let choice = ui.prompt("Choose difficulty (easy / medium / hard):")?;
    let (difficulty, fell_back) = Difficulty::select(&choice);
    if fell_back {
        ui.display_difficulty_fallback()?;
    }
    info_log!("difficulty: {}", difficulty);

    let mut game = Game::new(difficulty, rng);
    let outcome = game.run(ui, rng)?;
    info_log!("game over: {:?}", outcome);
    Ok(outcome)
}
