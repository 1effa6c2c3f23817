//! Command-line interface for pegma
//! This binary matches input text against the built-in arithmetic grammar
//! and reports the outcome.
//!
//! Usage:
//!   pegma match `<input>` [--format `<format>`]  - Match input against the arithmetic grammar
//!   pegma dump-grammar [--format `<format>`]     - Print the arithmetic grammar rules

use clap::{Arg, Command};
use pegma::peg::arith;

fn main() {
    let matches = Command::new("pegma")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A PEG-style grammar matching engine")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("match")
                .about("Match input text against the arithmetic grammar")
                .arg(
                    Arg::new("input")
                        .help("Input text to match")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('text' or 'json')")
                        .default_value("text"),
                ),
        )
        .subcommand(
            Command::new("dump-grammar")
                .about("Print the arithmetic grammar rules")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('text' or 'json')")
                        .default_value("text"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("match", match_matches)) => {
            let input = match_matches.get_one::<String>("input").unwrap();
            let format = match_matches.get_one::<String>("format").unwrap();
            handle_match_command(input, format);
        }
        Some(("dump-grammar", dump_matches)) => {
            let format = dump_matches.get_one::<String>("format").unwrap();
            handle_dump_command(format);
        }
        _ => unreachable!(),
    }
}

/// Handle the match command
fn handle_match_command(input: &str, format: &str) {
    let report = arith::grammar().report(input);

    match format {
        "json" => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: failed to serialize report: {}", e);
                std::process::exit(2);
            }
        },
        "text" => {
            if report.matched {
                println!(
                    "matched: consumed {} of {} characters",
                    report.consumed, report.input_len
                );
            } else {
                println!("no match");
            }
        }
        other => {
            eprintln!("Error: unknown format '{}'", other);
            std::process::exit(2);
        }
    }

    if !report.matched {
        std::process::exit(1);
    }
}

/// Handle the dump-grammar command
fn handle_dump_command(format: &str) {
    let grammar = arith::grammar();

    match format {
        "json" => {
            let rules: Vec<serde_json::Value> = grammar
                .rules()
                .map(|(name, body)| serde_json::json!({ "name": name, "expr": body }))
                .collect();
            let dump = serde_json::json!({
                "root": grammar.root_name(),
                "rules": rules,
            });
            match serde_json::to_string_pretty(&dump) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: failed to serialize grammar: {}", e);
                    std::process::exit(2);
                }
            }
        }
        "text" => {
            for (name, body) in grammar.rules() {
                println!("{} <- {}", name, body);
            }
        }
        other => {
            eprintln!("Error: unknown format '{}'", other);
            std::process::exit(2);
        }
    }
}
