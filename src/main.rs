use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;
use ewit::command::{ListCommand, ListFormat, QuoteCommand};
use ewit::import::import_json;
use ewit::quote::ChannelCaps;
use ewit::storage::RecordRange;
use ewit::{QuoteCog, Reply};

fn setup_logging(level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ewit")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("ewit.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let mut builder = env_logger::Builder::new();
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    // RUST_LOG wins over the configured level
    builder.parse_default_env();
    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let cog = QuoteCog::open(config.store_config(), config.cog_settings()).context("Failed to open quote store")?;

    if cli.is_verbose() {
        println!("{} {}", "Quotes file:".cyan(), cog.store().path().display());
    }

    match &cli.command {
        Commands::Quote { tokens } => handle_quote_command(&cog, tokens, config.channel_caps(cli.embed)),
        Commands::List { format, range, out } => {
            let out_dir = out.as_deref().unwrap_or(config.export.out_dir.as_path());
            handle_list_command(&cog, *format, range.unwrap_or_default(), out_dir)
        }
        Commands::Import { file, start, end } => handle_import_command(&cog, file, *start, *end),
        Commands::Info => handle_info_command(&cog),
    }
}

fn handle_quote_command(cog: &QuoteCog, tokens: &[String], caps: ChannelCaps) -> Result<()> {
    let command = QuoteCommand::parse(tokens);
    info!("Handling quote command: {:?}", command);
    print_reply(&cog.handle_quote(&command, caps), Path::new("."))
}

fn handle_list_command(cog: &QuoteCog, format: ListFormat, range: RecordRange, out_dir: &Path) -> Result<()> {
    info!("Listing quotes - format: {}, range: {}", format, range);
    let command = ListCommand { format, range };
    print_reply(&cog.handle_list(&command), out_dir)
}

fn handle_import_command(cog: &QuoteCog, file: &Path, start: Option<usize>, end: Option<usize>) -> Result<()> {
    info!("Importing legacy quotes from {}", file.display());
    let reader = fs::File::open(file).context(format!("Failed to open {}", file.display()))?;
    let window = RecordRange { min: start, max: end };

    let summary = import_json(reader, cog.store(), window).context("Import failed")?;

    println!("{} {} quotes", "Imported:".green(), summary.imported);
    if summary.skipped > 0 {
        println!("{} {} entries (see log for details)", "Skipped:".yellow(), summary.skipped);
    }
    Ok(())
}

fn handle_info_command(cog: &QuoteCog) -> Result<()> {
    let store = cog.store();
    println!("{} {}", "Quotes file:".green(), store.path().display());
    println!("{} {}", "Quotes:".green(), store.quote_count()?);
    println!("{} {} bytes", "Size:".green(), store.size_bytes()?);
    Ok(())
}

fn print_reply(reply: &Reply, out_dir: &Path) -> Result<()> {
    match reply {
        Reply::Text(text) => println!("{}", text),
        Reply::Embed(embed) => {
            println!("{}", embed.title.bold());
            if let Some(footer) = &embed.footer {
                println!("  {}", footer.italic());
            }
        }
        Reply::Batches(batches) => {
            for (i, batch) in batches.iter().enumerate() {
                if i > 0 {
                    println!("{}", "---".dimmed());
                }
                println!("{}", batch);
            }
        }
        Reply::File(export) => {
            fs::create_dir_all(out_dir).context("Failed to create export directory")?;
            let path = out_dir.join(&export.filename);
            fs::write(&path, &export.bytes).context(format!("Failed to write {}", path.display()))?;
            println!("{} {} bytes to {}", "Exported:".green(), export.bytes.len(), path.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging once the configured level is known
    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
