mod cli;
mod config;
mod display;
mod error;
mod extract;
mod ocr;
mod report;
mod store;

use clap::Parser;
use cli::{Cli, Command};
use tokio::io::BufReader;

use crate::store::DemoStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Build recognizer registry
    let recognizers = ocr::build_recognizer_registry();

    match cli.command {
        Command::Shell => {
            let mut session = cli::session::Session::new(recognizers);
            println!("provedocs: escribe 'help' para ver los comandos, 'exit' para salir.");
            session
                .run(BufReader::new(tokio::io::stdin()), true)
                .await?;
        }
        Command::Run { script } => {
            let file = tokio::fs::File::open(&script)
                .await
                .map_err(|e| anyhow::anyhow!("No se pudo abrir {script}: {e}"))?;
            let mut session = cli::session::Session::new(recognizers);
            session.run(BufReader::new(file), false).await?;
        }
        Command::Extract { file } => cli::ocr::run_extract(&file)?,
        Command::Ocr {
            file,
            engine,
            lang,
            export,
        } => {
            cli::ocr::run_ocr(&recognizers, &file, &engine, &lang, export.as_deref()).await?;
        }
        Command::Report { format, output } => {
            cli::report::generate_report(&DemoStore::seeded(), &format, output.as_deref())?;
        }
    }

    Ok(())
}
