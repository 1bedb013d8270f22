mod browse;
mod cli;
mod console;

use std::cell::RefCell;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_api::tmdb::TmdbClient;
use marquee_core::config::AppConfig;
use marquee_core::error::MarqueeError;
use marquee_core::home::load_home;
use marquee_core::modal::{open_details, DetailsModal};
use marquee_core::search::{dispatch, SearchController};

use crate::cli::{Cli, Commands};
use crate::console::ConsoleFactory;

const DEFAULT_FILTER: &str = "marquee=info,marquee_core=info,marquee_api=info";

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(AppConfig::log_dir(), "marquee.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();
    guard
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _guard = init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "marquee stopped");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), MarqueeError> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    // Nothing is fetched without a token.
    let token = config.access_token()?;
    let client = TmdbClient::with_settings(token, config.tmdb_settings());
    let image_base = config.api.image_base_url.as_str();

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Home => {
            let mut factory = ConsoleFactory::new("hero");
            let home = load_home(&client, &mut factory, &config).await;
            if let Some(hero) = &home.hero {
                console::print_hero(hero, image_base);
            }
            for (index, row) in home.rows.iter().enumerate() {
                console::print_row(index, row);
            }
        }
        Commands::Details { id } => {
            let mut modal = DetailsModal::new(ConsoleFactory::new("modal"));
            open_details(&client, &mut modal, id).await;
            match modal.view() {
                Some(view) => console::print_modal(&view, image_base),
                None => println!("Detalhes indisponíveis para {id}"),
            }
        }
        Commands::Search { query } => {
            let search = RefCell::new(SearchController::new(config.search_debounce()));
            let ticket = search.borrow_mut().input(&query.join(" "));
            if let Some(ticket) = ticket {
                dispatch(&search, &client, ticket).await;
            }
            console::print_search(&search.borrow(), image_base);
        }
        Commands::Browse => browse::run(&client, &config).await?,
    }
    Ok(())
}
