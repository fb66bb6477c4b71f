// Offline correctness checks behind `--test`. Not used during play.

use std::io::{self, Write};

use rand::Rng;

use crate::code::SecretCode;
use crate::error::EXIT_SELF_TEST_FAILED;
use crate::feedback::{format_feedback, get_feedback};

const FEEDBACK_CASES: [(&str, &str, &str); 4] = [
    ("123", "123", "✅1 ✅2 ✅3"),
    ("1234", "4123", "⚠️4 ⚠️1 ⚠️2 ⚠️3"),
    ("1234", "5678", "❌5 ❌6 ❌7 ❌8"),
    ("1223", "2122", "⚠️2 ⚠️1 ✅2 ❌2"),
];

#[derive(Debug, Default)]
pub struct SelfTestReport {
    checks: usize,
    failures: Vec<String>,
}

impl SelfTestReport {
    fn check_eq<T: PartialEq + std::fmt::Debug>(&mut self, actual: T, expected: T, context: &str) {
        self.checks += 1;
        if actual != expected {
            self.failures.push(format!(
                "Assertion failed: {actual:?} != {expected:?}. {context}"
            ));
        }
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn exit_code(&self) -> u8 {
        if self.passed() { 0 } else { EXIT_SELF_TEST_FAILED }
    }

    pub fn checks(&self) -> usize {
        self.checks
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.passed() {
            return writeln!(out, "\nAll tests passed.");
        }
        writeln!(out, "\nTESTS FAILED:")?;
        for failure in &self.failures {
            writeln!(out, " - {failure}")?;
        }
        Ok(())
    }
}

pub fn run_self_tests(rng: &mut impl Rng) -> SelfTestReport {
    let mut report = SelfTestReport::default();

    for length in [1, 3, 5] {
        let code = SecretCode::generate(length, rng);
        report.check_eq(code.len(), length, "generated code length");
        report.check_eq(
            code.as_str().bytes().all(|b| b.is_ascii_digit()),
            true,
            "generated code is all digits",
        );
    }

    for (secret, guess, expected) in FEEDBACK_CASES {
        let actual = format_feedback(&get_feedback(secret, guess));
        report.check_eq(
            actual.as_str(),
            expected,
            &format!("feedback for secret {secret}, guess {guess}"),
        );
    }

    report
}

/// Runs the battery, writes the summary to `out` and returns the exit code.
pub fn run_battery<W: Write>(rng: &mut impl Rng, out: &mut W) -> u8 {
    let report = run_self_tests(rng);
    if let Err(e) = report.write_summary(out) {
        log::error!("failed to write self-test summary: {e}");
    }
    report.exit_code()
}
