use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::fs;
use std::io::{self, Read};
use taskwise::cli::{self, Command, GlobalOptions, NamesAction};
use taskwise::config::{Config, OutputFormat};
use taskwise::context::StandardContext;
use taskwise::model::{ParsedTask, TaskDisplay, parse_batch, parse_task_on};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (global, command) = cli::parse_args(&args)?;

    if command == Command::Help {
        cli::print_help("taskwise");
        return Ok(());
    }

    let ctx = StandardContext::new(global.root.clone());
    let mut config = Config::load_or_default(&ctx)?;
    init_logging(&global, &config);

    match command {
        // Printed before touching the config.
        Command::Help => {}
        Command::Parse {
            text,
            names,
            user,
            today,
            json,
        } => {
            let mut known = config.names_for(user.as_deref());
            known.extend(names);
            let task = parse_task_on(&text, &known, today.unwrap_or_else(local_today));
            print_one(&task, json || config.output == OutputFormat::Json)?;
        }
        Command::Batch {
            source,
            user,
            today,
            json,
        } => {
            let input = match &source {
                Some(path) => fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };
            let known = config.names_for(user.as_deref());
            let tasks = parse_batch(input.lines(), &known, today.unwrap_or_else(local_today));
            log::info!("Parsed {} task(s)", tasks.len());
            print_many(&tasks, json || config.output == OutputFormat::Json)?;
        }
        Command::Names { action, user } => match action {
            NamesAction::List => {
                for name in config.names_for(user.as_deref()) {
                    println!("{}", name);
                }
            }
            NamesAction::Add(name) => {
                if config.add_name(&name, user.as_deref()) {
                    config.save(&ctx)?;
                    println!("Added '{}'", name.trim());
                } else {
                    println!("'{}' is already known", name.trim());
                }
            }
            NamesAction::Remove(name) => {
                if config.remove_name(&name, user.as_deref()) {
                    config.save(&ctx)?;
                    println!("Removed '{}'", name.trim());
                } else {
                    println!("'{}' was not in the list", name.trim());
                }
            }
        },
    }
    Ok(())
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn init_logging(global: &GlobalOptions, config: &Config) {
    let configured = config.log_level_filter();
    let level = if global.verbose {
        LevelFilter::Debug
    } else {
        match &configured {
            Ok(Some(level)) => *level,
            _ => LevelFilter::Warn,
        }
    };
    let log_config = ConfigBuilder::new()
        .add_filter_allow_str("taskwise")
        .build();
    // Stdout carries the results, so logs go to stderr only.
    if let Err(e) = TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("Failed to initialise logging: {}", e);
    }
    if let Err(e) = configured {
        log::warn!("{}", e);
    }
}

fn print_one(task: &ParsedTask, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        for line in task.to_detail_lines() {
            println!("{}", line);
        }
    }
    Ok(())
}

fn print_many(tasks: &[ParsedTask], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
    } else {
        for task in tasks {
            println!("{}", task.to_smart_string());
        }
    }
    Ok(())
}
