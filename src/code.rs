use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::UnknownDifficulty;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn code_length(self) -> usize {
        match self {
            Self::Easy => 3,
            Self::Medium => 4,
            Self::Hard => 5,
        }
    }

    pub const fn starting_attempts(self) -> i32 {
        match self {
            Self::Easy => 8,
            Self::Medium => 6,
            Self::Hard => 5,
        }
    }

    /// Parses a player's choice, falling back to `Easy`.
    /// The flag is `true` when the fallback was taken.
    pub fn select(input: &str) -> (Self, bool) {
        match input.parse() {
            Ok(difficulty) => (difficulty, false),
            Err(_) => (Self::default(), true),
        }
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// The hidden digit string. Immutable once generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretCode(String);

impl SecretCode {
    pub fn generate(length: usize, rng: &mut impl Rng) -> Self {
        let digits = (0..length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn digit_at(&self, position: usize) -> Option<char> {
        self.0.as_bytes().get(position).map(|&b| char::from(b))
    }

    pub fn matches(&self, guess: &str) -> bool {
        self.0 == guess
    }
}

impl FromStr for SecretCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(format!("secret code must be digits only, got `{s}`"))
        }
    }
}

impl fmt::Display for SecretCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
