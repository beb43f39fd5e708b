//! dex - browse the PokeAPI catalog from a terminal
//!
//! Loads the catalog index once, then reads line commands from stdin and
//! prints the resulting page or detail panel.

mod commands;
mod settings;
mod view;

use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use dex_catalog::Browser;
use dex_integration::CatalogClient;

use crate::commands::Command;
use crate::settings::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let settings = Settings::load();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    if std::env::args().any(|arg| arg == "--init-config") {
        settings.save().context("Failed to write settings")?;
        return Ok(());
    }

    info!("Starting dex against {}", settings.api.base_url);

    let client = CatalogClient::new(settings.api.clone()).context("Failed to create API client")?;
    let mut browser = Browser::start(client, settings.browse.page_size, |state| {
        println!("[{:>3.0}%] {}", state.progress() * 100.0, state.description());
    })
    .await
    .context("Failed to initialize the catalog")?;

    print!("{}", view::render_filters(browser.index()));
    let ticket = browser.refresh();
    if let Some(page) = browser.run(ticket).await.into_page() {
        print!("{}", view::render_page(&page, &browser.cards(&page)));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let command = match commands::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Query(intent) => match browser.dispatch(intent).await {
                Some(page) => print!("{}", view::render_page(&page, &browser.cards(&page))),
                None => println!("Already there."),
            },
            Command::Show(id) => match browser.detail(id).await {
                Ok(record) => print!("{}", view::render_detail(record)),
                Err(e) => println!("{}", e),
            },
            Command::Filters => print!("{}", view::render_filters(browser.index())),
            Command::Help => println!("{}", commands::HELP),
            Command::Quit => break,
        }
    }

    if !browser.source().is_online() {
        info!("Last request did not reach the server");
    }
    info!("Cached {} detail records this session", browser.cache().len());
    Ok(())
}
