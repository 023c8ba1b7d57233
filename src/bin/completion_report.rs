use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use marketplace_profiles::config::load_or_default;
use marketplace_profiles::logging;
use marketplace_profiles::profiles::model::UserRecord;
use marketplace_profiles::service::ProfileCompletionService;
use marketplace_profiles::storage::{JsonFileStore, StorageKeys};

fn main() -> Result<()> {
    let args = CliArgs::parse()?;
    let config = load_or_default()?;
    logging::init(&config.logging);

    let store_dir = match args.store {
        Some(dir) => dir,
        None => config.store_path()?,
    };
    let data = fs::read_to_string(&args.user)
        .with_context(|| format!("Failed to read user record {:?}", args.user))?;
    let user: UserRecord = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse user record {:?}", args.user))?;

    let service = ProfileCompletionService::new(
        JsonFileStore::new(store_dir),
        StorageKeys::new(config.storage.clone()),
    );
    if args.full {
        let report = service.report(&user)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let status = service.status(Some(&user))?;
        println!("{}", serde_json::to_string_pretty(&status)?);
    }
    Ok(())
}

struct CliArgs {
    user: PathBuf,
    store: Option<PathBuf>,
    full: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut user = None;
        let mut store = None;
        let mut full = false;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--store" => {
                    let value = args
                        .next()
                        .context("Expected a directory after --store")?;
                    store = Some(PathBuf::from(value));
                }
                "--full" => full = true,
                "-h" | "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                other if user.is_none() => user = Some(PathBuf::from(other)),
                other => anyhow::bail!("Unexpected argument '{other}'. Use --help for usage."),
            }
        }
        Ok(Self {
            user: user.context("Provide the path of a user record JSON file")?,
            store,
            full,
        })
    }
}

fn print_help() {
    println!(
        "Usage: completion_report <user.json> [--store <dir>] [--full]\n\
         Prints the profile completion status for the user record.\n\
         --store  JSON store directory (defaults to the configured store)\n\
         --full   include missing items, review counts and sidebar entries"
    );
}
