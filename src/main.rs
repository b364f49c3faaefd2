mod app;
mod cli;
mod clipboard;
mod config;
mod history;
mod llm;
mod model;
mod output;
mod paths;
mod prompt;
mod prompter;
mod request_engine;
mod session;

use anyhow::Result;
use clap::Parser;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    app::run(cli).await
}
