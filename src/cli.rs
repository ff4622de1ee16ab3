use anyhow::{bail, Context, Result};

use crate::config::{self, BoardTarget, TargetOverrides};
use crate::error::BoardError;
use crate::providers;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Board(TargetOverrides),
    Fetch {
        overrides: TargetOverrides,
        compact: bool,
    },
    Item {
        title: String,
        overrides: TargetOverrides,
    },
    Field {
        name: String,
        overrides: TargetOverrides,
    },
    Help,
}

/// Parse the process arguments (without the program name).
///
/// Supported forms:
///   ghboard [-u <login>] [-p <number>] [-t <path>]
///   ghboard fetch [--compact] [options]
///   ghboard item <title> [options]
///   ghboard field <name> [options]
pub fn parse_args(args: &[String]) -> Result<Command> {
    let (command, rest) = match args.first().map(String::as_str) {
        Some("help" | "-h" | "--help") => return Ok(Command::Help),
        Some("fetch") => ("fetch", &args[1..]),
        Some("item") => ("item", &args[1..]),
        Some("field") => ("field", &args[1..]),
        _ => ("board", args),
    };

    let mut overrides = TargetOverrides::default();
    let mut positional: Vec<String> = Vec::new();
    let mut compact = false;
    let mut i = 0;

    while i < rest.len() {
        match rest[i].as_str() {
            "-u" | "--user" => {
                overrides.username = Some(flag_value(rest, &mut i, "--user")?.to_string());
            }
            "-p" | "--project" => {
                let raw = flag_value(rest, &mut i, "--project")?;
                let number = raw
                    .parse::<u32>()
                    .with_context(|| format!("Invalid project number: {raw}"))?;
                overrides.project_number = Some(number);
            }
            "-t" | "--token-file" => {
                overrides.token_file = Some(flag_value(rest, &mut i, "--token-file")?.into());
            }
            "--compact" if command == "fetch" => compact = true,
            other if other.starts_with('-') => bail!("Unknown option: {other}"),
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    match command {
        "fetch" | "board" => {
            if let Some(extra) = positional.first() {
                bail!("Unexpected argument: {extra}");
            }
            if command == "fetch" {
                Ok(Command::Fetch { overrides, compact })
            } else {
                Ok(Command::Board(overrides))
            }
        }
        _ => {
            let value = positional.join(" ");
            if value.is_empty() {
                bail!("Usage: ghboard {command} <{}> [options]", if command == "item" { "title" } else { "name" });
            }
            if command == "item" {
                Ok(Command::Item {
                    title: value,
                    overrides,
                })
            } else {
                Ok(Command::Field {
                    name: value,
                    overrides,
                })
            }
        }
    }
}

fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    match args.get(*i) {
        Some(value) => Ok(value.as_str()),
        None => bail!("Missing value for {flag} flag"),
    }
}

pub fn resolve_target(overrides: TargetOverrides) -> Result<BoardTarget> {
    let config = config::load_config()?;
    BoardTarget::resolve(&config, overrides)
}

/// Runs one of the non-interactive commands and prints JSON to stdout.
pub async fn handle(command: Command) -> Result<()> {
    match command {
        Command::Fetch { overrides, compact } => {
            let target = resolve_target(overrides)?;
            let snapshot = providers::fetch_project_snapshot(&target)
                .await
                .map_err(explain)?;
            let json = if compact {
                serde_json::to_string(&snapshot)?
            } else {
                serde_json::to_string_pretty(&snapshot)?
            };
            println!("{json}");
        }
        Command::Item { title, overrides } => {
            let project = providers::open_project(&resolve_target(overrides)?)
                .await
                .map_err(explain)?;
            let item = project
                .item_by_title(&title)
                .with_context(|| format!("No item titled \"{title}\" in {}", project.details().title))?;
            println!("{}", serde_json::to_string_pretty(item)?);
        }
        Command::Field { name, overrides } => {
            let project = providers::open_project(&resolve_target(overrides)?)
                .await
                .map_err(explain)?;
            let item = project
                .item_by_field_name(&name)
                .with_context(|| format!("No item has a \"{name}\" field in {}", project.details().title))?;
            println!("{}", serde_json::to_string_pretty(item)?);
        }
        Command::Board(_) | Command::Help => print_help(),
    }
    Ok(())
}

fn explain(err: BoardError) -> anyhow::Error {
    match err.status() {
        Some(401) => anyhow::Error::new(err).context("GitHub rejected the token; check the token file"),
        Some(403) => anyhow::Error::new(err)
            .context("GitHub refused the request; the token may lack the read:project scope"),
        _ => err.into(),
    }
}

pub fn print_help() {
    println!("ghboard - flatten a GitHub project board\n");
    println!("USAGE:");
    println!("  ghboard                Browse the board in the terminal");
    println!("  ghboard fetch          Print the board's items as JSON");
    println!("  ghboard item <title>   Print the raw item with that title");
    println!("  ghboard field <name>   Print the first raw item that has that field");
    println!();
    println!("OPTIONS:");
    println!("  -u, --user <login>         Owner of the project");
    println!("  -p, --project <number>     Project number (see the project URL)");
    println!("  -t, --token-file <path>    File holding a GitHub token on one line");
    println!("      --compact              Single-line JSON (fetch only)");
    println!();
    println!("Defaults are read from ~/.ghboard/config.toml ([github] table).");
}
