// File: ./src/cli.rs
//! Command-line argument handling and help text.
use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamesAction {
    List,
    Add(String),
    Remove(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Parse {
        text: String,
        names: Vec<String>,
        user: Option<String>,
        today: Option<NaiveDate>,
        json: bool,
    },
    /// `source` of `None` reads stdin.
    Batch {
        source: Option<PathBuf>,
        user: Option<String>,
        today: Option<NaiveDate>,
        json: bool,
    },
    Names {
        action: NamesAction,
        user: Option<String>,
    },
}

/// Options accepted before the command word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub root: Option<PathBuf>,
    pub verbose: bool,
}

/// Parses everything after the binary name.
pub fn parse_args(args: &[String]) -> Result<(GlobalOptions, Command)> {
    let mut global = GlobalOptions::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-r" | "--root" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| anyhow!("{} needs a path", args[i]))?;
                global.root = Some(PathBuf::from(path));
                i += 2;
            }
            "-v" | "--verbose" => {
                global.verbose = true;
                i += 1;
            }
            _ => break,
        }
    }

    let Some(command) = args.get(i) else {
        return Ok((global, Command::Help));
    };
    let rest = &args[i + 1..];

    let cmd = match command.as_str() {
        "-h" | "--help" | "help" => Command::Help,
        "parse" => parse_parse(rest)?,
        "batch" => parse_batch(rest)?,
        "names" => parse_names(rest)?,
        other => bail!("Unknown command '{}'. See --help.", other),
    };
    Ok((global, cmd))
}

fn flag_value<'a>(rest: &'a [String], i: usize) -> Result<&'a str> {
    rest.get(i + 1)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow!("{} needs a value", rest[i]))
}

fn parse_date_flag(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| anyhow!("Invalid --today '{}' (expected YYYY-MM-DD): {}", value, e))
}

fn parse_parse(rest: &[String]) -> Result<Command> {
    let mut names = Vec::new();
    let mut user = None;
    let mut today = None;
    let mut json = false;
    let mut words = Vec::new();

    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--name" | "-n" => {
                names.push(flag_value(rest, i)?.to_string());
                i += 2;
            }
            "--user" | "-u" => {
                user = Some(flag_value(rest, i)?.to_string());
                i += 2;
            }
            "--today" => {
                today = Some(parse_date_flag(flag_value(rest, i)?)?);
                i += 2;
            }
            "--json" => {
                json = true;
                i += 1;
            }
            "--" => {
                words.extend(rest[i + 1..].iter().cloned());
                break;
            }
            _ => {
                words.push(rest[i].clone());
                i += 1;
            }
        }
    }

    if words.is_empty() {
        bail!("parse needs some text, e.g. taskwise parse \"call Sarah tomorrow\"");
    }
    Ok(Command::Parse {
        text: words.join(" "),
        names,
        user,
        today,
        json,
    })
}

fn parse_batch(rest: &[String]) -> Result<Command> {
    let mut source = None;
    let mut user = None;
    let mut today = None;
    let mut json = false;

    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--user" | "-u" => {
                user = Some(flag_value(rest, i)?.to_string());
                i += 2;
            }
            "--today" => {
                today = Some(parse_date_flag(flag_value(rest, i)?)?);
                i += 2;
            }
            "--json" => {
                json = true;
                i += 1;
            }
            "-" => {
                source = None;
                i += 1;
            }
            path => {
                source = Some(PathBuf::from(path));
                i += 1;
            }
        }
    }
    Ok(Command::Batch {
        source,
        user,
        today,
        json,
    })
}

fn parse_names(rest: &[String]) -> Result<Command> {
    let mut user = None;
    let mut positional = Vec::new();

    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--user" | "-u" => {
                user = Some(flag_value(rest, i)?.to_string());
                i += 2;
            }
            _ => {
                positional.push(rest[i].clone());
                i += 1;
            }
        }
    }

    let action = match positional.first().map(|s| s.as_str()) {
        None | Some("list") => NamesAction::List,
        Some("add") | Some("remove") if positional.len() < 2 => {
            bail!("names {} needs a name", positional[0])
        }
        Some("add") => NamesAction::Add(positional[1..].join(" ")),
        Some("remove") => NamesAction::Remove(positional[1..].join(" ")),
        Some(other) => bail!("Unknown names action '{}' (list, add, remove)", other),
    };
    Ok(Command::Names { action, user })
}

pub fn print_help(binary_name: &str) {
    println!(
        "Taskwise v{} - turn a sentence into a structured task",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] parse [--name <n>]... [--user <id>] [--today <date>] [--json] <text...>", binary_name);
    println!("    {} [OPTIONS] batch [<file>|-] [--user <id>] [--today <date>] [--json]", binary_name);
    println!("    {} [OPTIONS] names [list|add <name>|remove <name>] [--user <id>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for the config.");
    println!("    -v, --verbose         Log every parse decision to stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("RECOGNISED PHRASES:");
    println!("    Dates     today, tomorrow, end of week, by friday, end of month,");
    println!("              tuesday next week, next week, next month, 12/25/2025,");
    println!("              August 15th, mid-October, friday, in 3 days, in 2 weeks");
    println!("    Priority  p1-p4, priority 1-4, high/medium/normal/low priority");
    println!("    Urgency   urgent, asap, immediately, critical, emergency, rush");
    println!("    Owner     I need to..., Sarah should..., assign to X, owner: X");
    println!("    Subject   ask/call/email X, meet with X, send ... to X,");
    println!("              about X, project: X, category: X");
    println!();
    println!("Dates from explicit phrases that land on a weekend move to Monday.");
    println!();
    println!("EXAMPLES:");
    println!("    {} parse URGENT: ask Sarah about the budget by friday p1", binary_name);
    println!("    {} names add Sarah", binary_name);
    println!("    {} batch tasks.txt --json > tasks.json", binary_name);
}
