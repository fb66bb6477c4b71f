use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// Right digit, right position.
    Match,
    /// Digit is in the code, elsewhere.
    PartialMatch,
    NoMatch,
}

impl Feedback {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Match => "✅",
            Self::PartialMatch => "⚠️",
            Self::NoMatch => "❌",
        }
    }
}

/// One guessed digit with its classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scored {
    pub feedback: Feedback,
    pub digit: char,
}

impl fmt::Display for Scored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.feedback.symbol(), self.digit)
    }
}

/// Scores `guess` against `secret`, one entry per guessed digit in guess order.
///
/// Exact matches consume their secret digit first, then each remaining guessed
/// digit consumes at most one unconsumed occurrence in the secret. A repeated
/// guess digit can therefore only be credited as often as it occurs in the code.
pub fn get_feedback(secret: &str, guess: &str) -> Vec<Scored> {
    let mut secret_chars: Vec<Option<char>> = secret.chars().map(Some).collect();
    let guess_chars: Vec<char> = guess.chars().collect();
    let mut feedback = vec![Feedback::NoMatch; guess_chars.len()];

    // First pass: exact matches
    for (i, &g) in guess_chars.iter().enumerate() {
        if let Some(slot) = secret_chars.get_mut(i)
            && *slot == Some(g)
        {
            feedback[i] = Feedback::Match;
            *slot = None;
        }
    }

    // Second pass: misplaced, left to right
    for (i, &g) in guess_chars.iter().enumerate() {
        if feedback[i] == Feedback::Match {
            continue;
        }
        if let Some(pos) = secret_chars.iter().position(|&c| c == Some(g)) {
            feedback[i] = Feedback::PartialMatch;
            secret_chars[pos] = None;
        }
    }

    feedback
        .into_iter()
        .zip(guess_chars)
        .map(|(feedback, digit)| Scored { feedback, digit })
        .collect()
}

pub fn format_feedback(scored: &[Scored]) -> String {
    scored
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Counts of (exact, misplaced, absent).
pub fn tally(scored: &[Scored]) -> (usize, usize, usize) {
    scored
        .iter()
        .fold((0, 0, 0), |(exact, misplaced, absent), s| match s.feedback {
            Feedback::Match => (exact + 1, misplaced, absent),
            Feedback::PartialMatch => (exact, misplaced + 1, absent),
            Feedback::NoMatch => (exact, misplaced, absent + 1),
        })
}
