use anyhow::{Context, Result, bail};
use std::io::{self, IsTerminal};
use tracing::warn;

use crate::cli::{Cli, Command, GenerateArgs};
use crate::clipboard;
use crate::config::ClientConfig;
use crate::history::{HistoryStore, JsonFilePersistence, query};
use crate::llm::{GenerationError, LlmClient};
use crate::model::{GenerationInput, InputDraft};
use crate::output;
use crate::paths;
use crate::prompter::{self, EditorPrompter, InputPrompter, StdioPrompter};
use crate::request_engine::{RequestEngine, RetryPolicy};
use crate::session::CopySession;

pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose);

    let store = HistoryStore::open(Box::new(JsonFilePersistence::new(paths::history_path())));
    let mut session = CopySession::new(store);

    match cli.command {
        Command::Generate(args) => {
            let config = ClientConfig::resolve(cli.key.as_deref(), cli.model.as_deref())?;
            generate(&config, args, &mut session).await
        }
        Command::History => {
            let records: Vec<_> = session.store().records().iter().collect();
            output::print_history(&records);
            Ok(())
        }
        Command::Show { id } => {
            let Some(record) = session.select_record(&id) else {
                bail!("no history record with id '{id}'");
            };
            output::print_record(record);
            Ok(())
        }
        Command::Delete { id } => {
            if !session.delete_record(&id)? {
                bail!("no history record with id '{id}'");
            }
            println!("deleted {id}");
            Ok(())
        }
        Command::Favorite { copy_id } => match session.toggle_favorite(&copy_id)? {
            Some(true) => {
                println!("★ {copy_id}");
                Ok(())
            }
            Some(false) => {
                println!("☆ {copy_id}");
                Ok(())
            }
            None => bail!("no copy with id '{copy_id}'"),
        },
        Command::Favorites { search } => {
            let entries = query::favorites(session.store().records(), search.as_deref());
            output::print_favorites(&entries);
            Ok(())
        }
        Command::Search { term } => {
            let records = query::search(session.store().records(), &term);
            output::print_history(&records);
            Ok(())
        }
        Command::Copy { copy_id } => {
            let Some(copy) = session.find_copy(&copy_id) else {
                bail!("no copy with id '{copy_id}'");
            };
            report_clipboard(clipboard::copy_text(&copy.content), "copied to clipboard");
            Ok(())
        }
        Command::Share { copy_id } => {
            let Some(copy) = session.find_copy(&copy_id) else {
                bail!("no copy with id '{copy_id}'");
            };
            report_clipboard(
                clipboard::share_content(&copy.title, &copy.content),
                "copied title and content to clipboard for sharing",
            );
            Ok(())
        }
    }
}

async fn generate(config: &ClientConfig, args: GenerateArgs, session: &mut CopySession) -> Result<()> {
    let input = collect_input(&args)?;
    let client = LlmClient::new(config)?;
    let engine = RequestEngine::new(&client, RetryPolicy::new(args.max_attempts));

    let submission = engine.submit(input, session).await.map_err(with_user_message)?;
    output::print_variants(submission.outputs);

    if args.copy
        && let Some(first) = submission.outputs.first()
    {
        report_clipboard(clipboard::copy_text(&first.content), "copied first copy to clipboard");
    }
    Ok(())
}

/// Puts the per-kind user message in front of a generation failure.
fn with_user_message(err: anyhow::Error) -> anyhow::Error {
    let message = err
        .downcast_ref::<GenerationError>()
        .map(GenerationError::user_message);
    match message {
        Some(message) => err.context(message),
        None => err,
    }
}

fn collect_input(args: &GenerateArgs) -> Result<GenerationInput> {
    let mut draft = InputDraft::new();
    draft.topic = args.topic.clone().unwrap_or_default();
    draft.product_name = args.product.clone().unwrap_or_default();
    draft.target_audience = args.audience.clone().unwrap_or_default();
    draft.style = args.style;
    for feature in &args.features {
        draft.add_feature(feature)?;
    }

    if draft.missing_topic() || draft.missing_product_name() {
        let mut prompter: Box<dyn InputPrompter> = if io::stdin().is_terminal() {
            Box::new(EditorPrompter::new()?)
        } else {
            Box::new(StdioPrompter)
        };
        prompter::complete_draft(&mut draft, prompter.as_mut())
            .context("could not collect generation input")?;
    }
    draft.submit()
}

fn report_clipboard(result: Result<()>, done: &str) {
    match result {
        Ok(()) => eprintln!("{done}"),
        Err(err) => warn!("clipboard unavailable: {err:#}"),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
