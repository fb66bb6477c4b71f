use codebreaker::cli::{CliInterface, parse_cli, run_game};
use codebreaker::input::InputSource;
use codebreaker::selftest::run_battery;
use codebreaker::{debug_log, logging};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();
    let cli = parse_cli();
    debug_log!("{:?}", cli);

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if cli.test {
        return ExitCode::from(run_battery(&mut rng, &mut io::stdout()));
    }

    let input = InputSource::stdin(cli.scripted_inputs(), cli.default_response.as_str());
    let mut ui = CliInterface::new(input, io::stdout());
    ExitCode::from(run_game(&mut ui, &mut rng, &mut io::stdout()))
}
