use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use converter_core::{ControllerEvent, ConversionController};
use storage::{LastConversionStore, Storage};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod clipboard;
mod commands;
mod config;

use clipboard::SystemClipboard;
use commands::{parse_command, UiCommand, HELP};
use config::{load_settings, prepare_database_url};

#[derive(Parser, Debug)]
#[command(about = "Convert lengths and remember the most recent conversion")]
struct Args {
    #[arg(long, default_value = "converter.toml")]
    config: PathBuf,
    #[arg(long)]
    database_url: Option<String>,
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(&args.config);
    if let Some(database_url) = args.database_url {
        settings.database_url = database_url;
    }
    if let Some(log_filter) = args.log_filter {
        settings.log_filter = log_filter;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;
    info!(%database_url, "storage ready");

    let store = Arc::new(LastConversionStore::open(Arc::new(storage)).await);
    let mut controller = ConversionController::new(store);

    let mut history = controller.subscribe_last_conversion();
    let history_task = tokio::spawn(async move {
        while let Some(record) = history.next().await {
            match record {
                Some(record) => println!("Recent conversion: {record}"),
                None => println!("No recent conversion yet."),
            }
        }
    });

    let mut events = controller.subscribe_events();
    let notice_task = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let ControllerEvent::Notice(message) = event {
                println!("! {message}");
            }
        }
    });

    println!("{HELP}");
    let clipboard = SystemClipboard;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("! {err}");
                continue;
            }
        };

        match command {
            UiCommand::SetInput(text) => controller.set_input(text),
            UiCommand::SetFromUnit(unit) => controller.set_from_unit(unit),
            UiCommand::SetToUnit(unit) => controller.set_to_unit(unit),
            UiCommand::Convert => {
                if controller.convert().is_ok() {
                    println!("Result: {}", controller.result());
                }
            }
            UiCommand::Swap => {
                controller.swap_units();
                println!("{} -> {}", controller.from_unit(), controller.to_unit());
            }
            UiCommand::Copy => {
                controller.copy_last_conversion(&clipboard);
            }
            UiCommand::Show => {
                let state = controller.state();
                println!(
                    "value='{}' from={} to={} result='{}'",
                    state.input, state.from_unit, state.to_unit, state.result
                );
            }
            UiCommand::Units => {
                let names: Vec<&str> = controller.units().iter().map(|u| u.name()).collect();
                println!("{}", names.join(", "));
            }
            UiCommand::Help => println!("{HELP}"),
            UiCommand::Quit => break,
        }
    }

    controller.shutdown().await;
    history_task.abort();
    notice_task.abort();
    info!("bye");
    Ok(())
}
