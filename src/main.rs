// src/main.rs
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};
use notionmap::config::{Command, CommandLineInput};
use notionmap::{
    save_json, ClientConfig, Database, NotionClient, NotionObject, Page, Property, Query,
};
use serde_json::Value;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}"
    } else {
        "[{l}] {m}{n}"
    };

    // Logs go to stderr so stdout stays clean for the summary.
    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .build(Root::builder().appender("stderr").build(log_level))?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized at {}", log_level);
    Ok(())
}

fn print_database(database: &Database) {
    let title = NotionObject::Database(database.clone()).display_title();
    println!("🗂  {} ({})", title, database.id);
    for prop in &database.properties {
        println!("  {:<24} {} [{}]", prop.name(), prop.kind(), prop.id());
    }
}

fn print_page(page: &Page) {
    println!("📄 {} ({})", page.title(), page.id);
    for prop in &page.properties {
        let label = if prop.name().is_empty() {
            prop.id()
        } else {
            prop.name()
        };
        println!("  {:<24} {}", label, prop.value);
    }
}

/// Writes `value` to the `--save` path, if one was given.
fn save_if_requested(cli: &CommandLineInput, value: &Value) -> anyhow::Result<()> {
    if let Some(path) = &cli.save {
        save_json(value, path).with_context(|| format!("writing {}", path.display()))?;
        println!("✓ JSON saved to {}", path.display());
    }
    Ok(())
}

fn run(cli: &CommandLineInput) -> anyhow::Result<()> {
    let config = ClientConfig::resolve(cli)?;
    let mut client = NotionClient::new(&config)?;

    match &cli.command {
        Command::Database { id } => {
            let raw = client
                .retrieve_database_raw(id)
                .with_context(|| format!("retrieving database {}", id))?;
            let database = client.mapper().map_to_database(&raw)?;
            print_database(&database);
            save_if_requested(cli, &raw)?;
        }
        Command::Page { id } => {
            let raw = client
                .retrieve_page_raw(id)
                .with_context(|| format!("retrieving page {}", id))?;
            let page = client.page_from_wire(&raw)?;
            print_page(&page);
            save_if_requested(cli, &raw)?;
        }
        Command::Block { id } => {
            let raw = client
                .retrieve_block_raw(id)
                .with_context(|| format!("retrieving block {}", id))?;
            let block = client.mapper().map_to_block(&raw)?;
            println!("🧱 {} block {}", block.kind, block.id);
            let text = block.plain_text();
            if !text.is_empty() {
                println!("  {}", text);
            }
            save_if_requested(cli, &raw)?;
        }
        Command::Query {
            id,
            page_size,
            limit,
        } => {
            let query = Query::new().page_size(*page_size);
            let stream = client
                .query_database(id, Some(&query))
                .with_context(|| format!("querying database {}", id))?;

            let mut rows = Vec::new();
            let mut count = 0;
            for page in stream.take(limit.unwrap_or(usize::MAX)) {
                let page = page?;
                count += 1;
                println!("📄 {} ({})", page.title(), page.id);
                if cli.save.is_some() {
                    rows.push(page.serialize()?);
                }
            }
            println!("Fetched {} rows.", count);
            save_if_requested(cli, &Value::Array(rows))?;
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).map_err(|e| anyhow::anyhow!("failed to set up logging: {}", e))?;

    run(&cli)
}
