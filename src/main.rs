use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use herdbook::cli::args::{Cli, Commands};
use herdbook::cli::{commands, prompt};
use herdbook::config::{Config, Paths};
use herdbook::error::HerdbookError;
use herdbook::{Database, RecordStore};

fn main() {
    if let Err(e) = run() {
        match e.downcast_ref::<HerdbookError>() {
            Some(err) if err.is_user_facing() => {
                eprintln!("{}: {}", "warning".yellow().bold(), err);
            }
            _ => eprintln!("{}: {:#}", "error".red().bold(), e),
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = Paths::default();
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load_from_path(&paths.config_file)?,
    };
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    // Commands that never touch the database
    match &cli.command {
        Commands::Completions { shell } => {
            print!("{}", commands::completions(*shell));
            return Ok(());
        }
        Commands::Districts { district } => {
            println!("{}", commands::districts(district.as_deref(), format)?);
            return Ok(());
        }
        _ => {}
    }

    let db_path = config.database_path(cli.database, &paths);
    let db = Database::init_at(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    log::debug!("using database {}", db.path().display());
    let store = RecordStore::new(db);

    let output = match cli.command {
        Commands::List(args) => commands::list(&store, &args, &config.list, format)?,
        Commands::Show { id } => commands::show(&store, id, format)?,
        Commands::Add(args) => commands::add(&store, args, format)?,
        Commands::Update(args) => commands::update(&store, args, format)?,
        Commands::Delete { id, yes } => commands::delete(
            &store,
            id,
            |record| {
                yes || prompt::confirm(&format!(
                    "Delete record #{} ({} / {}, {})?",
                    record.id, record.district, record.commune, record.year
                ))
            },
            format,
        )?,
        Commands::Stats(args) => commands::stats(&store, &args, format)?,
        Commands::Seed { count, yes } => commands::seed(
            &store,
            count.unwrap_or(config.seed.default_count),
            |existing, count| {
                yes || prompt::confirm_word(
                    &format!("Replace all {existing} records with {count} generated ones?"),
                    "reseed",
                )
            },
            &mut rand::rng(),
            format,
        )?,
        Commands::Tui => {
            herdbook::tui::run(&store, config.list.order)?;
            String::new()
        }
        Commands::Completions { .. } | Commands::Districts { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
