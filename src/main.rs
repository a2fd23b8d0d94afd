//! Command-line front end for drawing Secret Santa assignments: `draw`
//! prints the pairings, `notify` emails each giver their match instead of
//! revealing the full assignment to whoever runs the program.

use std::collections::HashSet;
use std::fs;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::error;
use rand::rngs::StdRng;
use rand::SeedableRng;

use secret_santa::config::Config;
use secret_santa::error::{Error, Result};
use secret_santa::logging;
use secret_santa::matcher::Matcher;
use secret_santa::model::{load_restrictions, Assignment, Restriction, Roster};
use secret_santa::notify::{Notifier, DEFAULT_TEMPLATE};

const PROGRAM_NAME: &str = "secret-santa";

const ABOUT_TEXT: &str = "Draw a Secret Santa assignment over a participant roster.

EXIT CODES:
   0: Success.
   2: Unusable roster, restrictions or participant set.
   3: No valid assignment found within the attempt cap.
   1: Any other error.";

const DRAW: &str = "draw";
const NOTIFY: &str = "notify";

const ROSTER_PATH: &str = "ROSTER_PATH";
const ROSTER_PATH_HELP: &str = "The path to the participant roster:\n\
one `name,address` line per participant";

const RESTRICTIONS: &str = "restrictions";
const RESTRICTIONS_HELP: &str = "A file of forbidden pairings, one `name,name` per line,\n\
order-insensitive";

const SEED: &str = "seed";
const SEED_HELP: &str = "Seed the random source so the draw is reproducible";

const ATTEMPTS: &str = "attempts";
const ATTEMPTS_HELP: &str = "Cap on matching restart attempts";

const CONFIG_PATH: &str = "config";
const CONFIG_PATH_HELP: &str = "TOML delivery config with smtp_host, smtp_port,\n\
sender_address and sender_credential";

const TEMPLATE: &str = "template";
const TEMPLATE_HELP: &str = "Message template file; `{giver}` and `{receiver}`\n\
are substituted";

const SUBJECT: &str = "subject";
const SUBJECT_HELP: &str = "Subject line, overriding the config";

const VERBOSE: &str = "verbose";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    let roster = Arg::new(ROSTER_PATH)
        .help(ROSTER_PATH_HELP)
        .action(ArgAction::Set)
        .required(true);
    let restrictions = Arg::new(RESTRICTIONS)
        .long(RESTRICTIONS)
        .help(RESTRICTIONS_HELP)
        .action(ArgAction::Set);
    let seed = Arg::new(SEED)
        .long(SEED)
        .help(SEED_HELP)
        .action(ArgAction::Set)
        .value_parser(value_parser!(u64));
    let attempts = Arg::new(ATTEMPTS)
        .long(ATTEMPTS)
        .help(ATTEMPTS_HELP)
        .action(ArgAction::Set)
        .value_parser(value_parser!(u32));

    clap::command!(PROGRAM_NAME)
        .about(ABOUT_TEXT)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(VERBOSE)
                .long(VERBOSE)
                .short('v')
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new(DRAW)
                .about("Draw an assignment and print one `giver -> receiver` per line")
                .arg(roster.clone())
                .arg(restrictions.clone())
                .arg(seed.clone())
                .arg(attempts.clone()),
        )
        .subcommand(
            Command::new(NOTIFY)
                .about("Draw an assignment and email each giver their match")
                .arg(roster)
                .arg(restrictions)
                .arg(seed)
                .arg(attempts)
                .arg(
                    Arg::new(CONFIG_PATH)
                        .long(CONFIG_PATH)
                        .help(CONFIG_PATH_HELP)
                        .action(ArgAction::Set)
                        .required(true),
                )
                .arg(
                    Arg::new(TEMPLATE)
                        .long(TEMPLATE)
                        .help(TEMPLATE_HELP)
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new(SUBJECT)
                        .long(SUBJECT)
                        .help(SUBJECT_HELP)
                        .action(ArgAction::Set),
                ),
        )
}

/// Load the roster and the (possibly empty) restriction set.
fn load_inputs(args: &ArgMatches) -> Result<(Roster, HashSet<Restriction>)> {
    let path: &String = args.get_one(ROSTER_PATH).unwrap(); // Required argument is guaranteed to be present.
    let roster = Roster::load(path)?;
    let restrictions = match args.get_one::<String>(RESTRICTIONS) {
        Some(path) => load_restrictions(path)?,
        None => HashSet::new(),
    };
    Ok((roster, restrictions))
}

/// Draw an assignment with the seed and attempt cap from the command line.
fn draw_assignment(
    args: &ArgMatches,
    roster: &Roster,
    restrictions: &HashSet<Restriction>,
    default_attempts: Option<u32>,
) -> Result<Assignment> {
    let matcher = match args.get_one::<u32>(ATTEMPTS).copied().or(default_attempts) {
        Some(cap) => Matcher::with_max_attempts(cap),
        None => Matcher::new(),
    };
    let mut rng = match args.get_one::<u64>(SEED) {
        Some(&seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    matcher.assign(roster.participants(), restrictions, &mut rng)
}

fn draw(args: &ArgMatches) -> Result<()> {
    let (roster, restrictions) = load_inputs(args)?;
    let assignment = draw_assignment(args, &roster, &restrictions, None)?;
    print!("{assignment}");
    Ok(())
}

fn notify(args: &ArgMatches) -> Result<()> {
    let (roster, restrictions) = load_inputs(args)?;
    let config_path: &String = args.get_one(CONFIG_PATH).unwrap(); // Required argument is guaranteed to be present.
    let config = Config::load(config_path)?;

    let assignment = draw_assignment(args, &roster, &restrictions, Some(config.max_attempts()))?;
    // Re-check the invariants before anything leaves the machine.
    if !assignment.is_valid(roster.participants(), &restrictions) {
        return Err(Error::InvalidInput(
            "drawn assignment failed validation".to_string(),
        ));
    }

    let template = match args.get_one::<String>(TEMPLATE) {
        Some(path) => fs::read_to_string(path)?,
        None => DEFAULT_TEMPLATE.to_string(),
    };
    let subject = args
        .get_one::<String>(SUBJECT)
        .map(String::as_str)
        .unwrap_or_else(|| config.subject());

    Notifier::new(&config)?.notify(&roster, &assignment, subject, &template)
}

/// Run the selected subcommand and return the exit code.
fn run(args: &ArgMatches) -> u8 {
    let result = match args.subcommand() {
        Some((DRAW, sub_args)) => draw(sub_args),
        Some((NOTIFY, sub_args)) => notify(sub_args),
        _ => unreachable!("subcommand is required"),
    };
    match result {
        Ok(()) => 0,
        Err(err) => {
            error!("{err}");
            match err {
                Error::InvalidInput(_) | Error::Roster(_) | Error::Restriction(_) => 2,
                Error::Unsatisfiable { .. } => 3,
                _ => 1,
            }
        }
    }
}

fn main() {
    let args = cli().get_matches();
    logging::init(args.get_flag(VERBOSE));
    std::process::exit(run(&args).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logging() {
        log4rs_test_utils::test_logging::init_logging_once_for(["secret_santa"], None, None);
    }

    #[test]
    fn draw_produces_valid_pairings() {
        init_logging();

        let command_line = [
            PROGRAM_NAME,
            DRAW,
            "example_data/roster.txt",
            "--restrictions",
            "example_data/restrictions.txt",
            "--seed",
            "42",
        ];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 0);
    }

    #[test]
    fn draw_reports_missing_roster() {
        init_logging();

        let command_line = [PROGRAM_NAME, DRAW, "example_data/no_such_roster.txt"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 1);
    }

    #[test]
    fn draw_reports_unsatisfiable_restrictions() {
        init_logging();

        // Both participants restricted against each other.
        let command_line = [
            PROGRAM_NAME,
            DRAW,
            "example_data/couple_roster.txt",
            "--restrictions",
            "example_data/couple_restrictions.txt",
            "--seed",
            "1",
        ];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 3);
    }

    #[test]
    fn rejects_bad_command_lines() {
        assert!(cli().try_get_matches_from([PROGRAM_NAME]).is_err());
        assert!(cli()
            .try_get_matches_from([PROGRAM_NAME, DRAW])
            .is_err());
        assert!(cli()
            .try_get_matches_from([PROGRAM_NAME, NOTIFY, "example_data/roster.txt"])
            .is_err());
        assert!(cli()
            .try_get_matches_from([
                PROGRAM_NAME,
                DRAW,
                "example_data/roster.txt",
                "--seed",
                "not-a-number"
            ])
            .is_err());
    }
}
