use fsmbuilder::prelude::*;

use tracing::{debug, error, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("fsm-demo")
        .about("Runs binary numbers through a DFA that computes their remainder modulo three")
        .subcommand_required(true)
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .subcommand(
            Command::new("mod3")
                .about("prints the state that is reached for each given binary number")
                .arg(Arg::new("words").required(true).num_args(1..)),
        )
        .subcommand(Command::new("table").about("prints the transition table of the automaton"))
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

/// Builds the automaton whose state `Si` is reached on a binary number iff the number is `i` modulo three.
fn modulo_three() -> Result<DFA, DfaError> {
    let mut builder = DFABuilder::new();
    builder
        .add_states(["S0", "S1", "S2"])
        .add_symbols(['0', '1']);
    builder
        .set_initial_state("S0")?
        .add_final_states(["S0", "S1", "S2"])?
        .add_transitions([
            [(("S0", '0'), "S0")],
            [(("S0", '1'), "S1")],
            [(("S1", '0'), "S2")],
            [(("S1", '1'), "S0")],
            [(("S2", '0'), "S1")],
            [(("S2", '1'), "S2")],
        ])?;
    builder.build()
}

fn describe(dfa: &mut DFA, word: &str) -> Result<String, DfaError> {
    dfa.process_input(word)?;
    let state = dfa.current_state();
    Ok(match state.as_str() {
        "S0" => format!("{word} => S0 (mod 3 = 0)"),
        "S1" => format!("{word} => S1 (mod 3 = 1)"),
        "S2" => format!("{word} => S2 (mod 3 = 2)"),
        _ => format!("{word} => unknown state {state}"),
    })
}

fn run(matches: &ArgMatches) -> Result<(), DfaError> {
    let mut dfa = modulo_three()?;
    debug!("built modulo three automaton");

    match matches.subcommand() {
        Some(("mod3", sub_matches)) => {
            for word in sub_matches
                .get_many::<String>("words")
                .into_iter()
                .flatten()
            {
                println!("{}", describe(&mut dfa, word)?);
            }
        }
        Some(("table", _)) => println!("{}", dfa.colored_transition_table()),
        _ => unreachable!(),
    }
    Ok(())
}

pub fn main() {
    let matches = cli().get_matches();

    setup_logging(&matches);

    if let Err(e) = run(&matches) {
        error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
