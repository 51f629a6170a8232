use std::io::{BufRead, IsTerminal, Write};

use clap::Parser;
use fsa_lib::{
    automaton::{
        Automaton,
        dfa::{DFA, run::DfaRun},
        nfa::{determinize::SubsetConstruction, run::NfaRun},
    },
    catalog::{CatalogEntry, Sample},
    config::{GeneralConfig, HarnessConfig},
    logger::Logger,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "Finite State Automata Tool")]
#[command(version = "0.1")]
#[command(about = "Run words through the sample DFAs and NFAs", long_about = None)]
struct Args {
    /// One of: xyzzy, 987, fours, parity, gh, moo, special
    #[arg(required_unless_present = "list")]
    automaton: Option<CatalogEntry>,

    /// Words to run. Read line by line from stdin until `quit` if empty.
    words: Vec<String>,

    /// Determinize NFAs with subset construction before running them.
    #[arg(short, long)]
    determinize: bool,

    /// Print the automaton in graphviz DOT format and exit.
    #[arg(long)]
    dot: bool,

    /// List the available automata and exit.
    #[arg(short, long)]
    list: bool,

    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum RunReport {
    Dfa(DfaRun),
    Nfa(NfaRun),
}

#[derive(Debug, Serialize)]
struct WordReport<'a> {
    automaton: &'a str,
    word: &'a str,
    accepted: bool,
    run: RunReport,
}

/// The automaton words are actually run on.
enum Runner {
    Sample(Sample),
    Determinized(DFA),
}

impl Runner {
    fn run(&self, word: &str, logger: Option<&Logger>) -> RunReport {
        let input = word.as_bytes();
        match self {
            Runner::Sample(Sample::Dfa(dfa)) | Runner::Determinized(dfa) => {
                RunReport::Dfa(dfa.run_with_logger(input, logger))
            }
            Runner::Sample(Sample::Nfa(nfa)) => {
                RunReport::Nfa(nfa.run_with_logger(input, logger))
            }
        }
    }

    fn to_graphviz(&self) -> String {
        match self {
            Runner::Sample(sample) => sample.to_graphviz(),
            Runner::Determinized(dfa) => dfa.to_graphviz(),
        }
    }
}

fn report(
    entry: CatalogEntry,
    runner: &Runner,
    word: &str,
    logger: Option<&Logger>,
) -> anyhow::Result<()> {
    let run = runner.run(word, logger);
    let accepted = match &run {
        RunReport::Dfa(r) => r.accepted,
        RunReport::Nfa(r) => r.accepted,
    };

    let json_res = serde_json::to_string(&WordReport {
        automaton: entry.name(),
        word,
        accepted,
        run,
    })?;
    println!("{}", json_res);

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.list {
        for entry in CatalogEntry::ALL {
            println!("{:<8} {}", entry.name(), entry.description());
        }
        return Ok(());
    }

    let Some(entry) = args.automaton else {
        anyhow::bail!("No automaton given");
    };

    let config = HarnessConfig::from_optional_file(args.config)?;

    tracing_subscriber::fmt()
        .with_max_level(config.logger().get_log_level().tracing_level())
        .with_writer(std::io::stderr)
        .init();

    let logger = Logger::from_config(config.logger(), entry.name())?;

    let sample = entry.build()?;
    let runner = match sample {
        Sample::Nfa(nfa) if args.determinize || *config.get_determinize() => {
            let determinized = SubsetConstruction::new(
                &nfa,
                config.get_determinize_config().clone(),
                logger.as_ref(),
            )
            .run()?;

            tracing::info!(
                "determinized {} NFA states into {} DFA states",
                nfa.state_count(),
                determinized.dfa.state_count()
            );
            Runner::Determinized(determinized.dfa)
        }
        sample => Runner::Sample(sample),
    };

    if args.dot {
        print!("{}", runner.to_graphviz());
        return Ok(());
    }

    if !args.words.is_empty() {
        for word in &args.words {
            report(entry, &runner, word, logger.as_ref())?;
        }
        return Ok(());
    }

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();

    loop {
        if interactive {
            eprint!("Enter an input (\"quit\" to quit): ");
            std::io::stderr().flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let word = line.trim_end_matches(['\n', '\r']);
        if word == "quit" {
            break;
        }

        report(entry, &runner, word, logger.as_ref())?;
    }

    Ok(())
}
