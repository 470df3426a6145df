use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::warn;

use crate::config;
use crate::generator;
use crate::tracker::jira::JiraClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run { file: PathBuf },
    Help,
    Version,
}

/// Dispatch the parsed command.
pub async fn run(args: Vec<String>) -> Result<()> {
    match parse_args(&args)? {
        Command::Run { file } => run_file(&file).await,
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Parse the top-level arguments.
///
/// Supported forms:
///   jiragen -f tasks.json
///   jiragen --file tasks.json
///   jiragen --help / --version
pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut file: Option<PathBuf> = None;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-f" | "--file" => {
                i += 1;
                if i < args.len() {
                    file = Some(PathBuf::from(&args[i]));
                } else {
                    bail!("Missing value for -f/--file flag");
                }
            }
            "-h" | "--help" => return Ok(Command::Help),
            "-v" | "-V" | "--version" => return Ok(Command::Version),
            other => bail!("Unknown argument: {other}\n\nRun jiragen --help for usage."),
        }
        i += 1;
    }

    match file {
        Some(file) => Ok(Command::Run { file }),
        None => bail!(
            "Usage: jiragen -f <tasks.json>\n\nExamples:\n  jiragen -f tasks.json\n  jiragen --file sprint-42.json"
        ),
    }
}

async fn run_file(file: &Path) -> Result<()> {
    let config = config::load_config()?;
    let jira = match config.jira {
        Some(jira) => jira,
        None => bail!(
            "No tracker configured. Add a [jira] section (url, user, token) to ~/.jiragen/config.toml"
        ),
    };

    let client = JiraClient::new(&jira);
    client.verify_credentials().await?;
    let summary = generator::run(&client, file).await?;

    if summary.failed > 0 {
        bail!("{} task(s) failed to create", summary.failed);
    }
    Ok(())
}

// Version output never fails: an unreadable config just loses the URL line.
fn print_version() {
    println!("jiragen {}", env!("CARGO_PKG_VERSION"));
    match config::load_config() {
        Ok(config) => {
            if let Some(jira) = config.jira {
                println!("Jira URL: {}", jira.url);
            }
        }
        Err(e) => warn!("config not readable: {e:#}"),
    }
}

pub fn print_help() {
    println!("jiragen — batch issue creator for Jira\n");
    println!("USAGE:");
    println!("  jiragen -f <tasks.json>   Create every issue in the file and link them");
    println!();
    println!("OPTIONS:");
    println!("  -f, --file <JSON>  Tasks file in JSON format");
    println!("  -h, --help         Show this help");
    println!("  -V, --version      Show the version and configured Jira URL");
    println!();
    println!("EXAMPLES:");
    println!("  jiragen -f tasks.json");
    println!("  jiragen --file sprint-42.json");
}
