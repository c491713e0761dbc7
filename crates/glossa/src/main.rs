use anyhow::Context;
use clap::Parser;
use glossa_engine::cli::{self, OutputHandlers, ReplOptions};
use glossa_engine::config::{ConfigLoader, GlossaConfig};
use glossa_engine::executor::CommandExecutor;
use glossa_engine::gateway::AuthGateway;
use glossa_engine::history::SearchHistory;
use glossa_engine::history::store::FileStore;
use glossa_engine::http::HttpBackend;
use glossa_engine::pipeline::SuggestionPipeline;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glossa", version, about = "Fuzzy dictionary client")]
struct Args {
    /// Config file (defaults to ./glossa.yaml, then ~/.glossa/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the dictionary service
    #[arg(long)]
    api_url: Option<String>,

    /// File holding the recent-search history
    #[arg(long)]
    history: Option<PathBuf>,

    /// Script of commands to execute (non-interactive mode)
    #[arg(long)]
    file: Option<PathBuf>,
}

async fn load_config(args: &Args) -> anyhow::Result<GlossaConfig> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => ConfigLoader::load_default().await?,
    };
    if let Some(url) = &args.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(path) = &args.history {
        config.history.path = path.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so script output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args).await?;
    info!("Using dictionary service at {}", config.api.base_url);

    let backend = HttpBackend::new(&config.api.base_url)?;
    let gateway = Arc::new(AuthGateway::new(Arc::new(backend)));
    let session = gateway.check_session().await;

    let history = SearchHistory::load(
        Box::new(FileStore::new(&config.history.path)),
        config.history.key.clone(),
    );
    let mut pipeline =
        SuggestionPipeline::new(Arc::clone(&gateway), history, config.suggestions.debounce());
    if session.is_authenticated {
        pipeline.load_word_cache().await;
    }
    let mut executor = CommandExecutor::new(pipeline);

    let output = OutputHandlers {
        out: |msg| println!("{}", msg),
        err: |msg| eprintln!("{}", msg),
    };

    if let Some(path) = &args.file {
        cli::run_file(&mut executor, output, path)
            .await
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        return Ok(());
    }

    let greeting = match session.username() {
        Some(user) if session.is_authenticated => format!("Welcome back, @{user}."),
        _ => "Not logged in. Use 'login <username> <password>'.".to_string(),
    };
    let banner = ["Fuzzy Dictionary. Type 'help' for commands, 'exit' to quit.", greeting.as_str()];
    cli::run_repl(
        &mut executor,
        output,
        ReplOptions {
            banner_lines: &banner,
            exit_commands: &["exit", "quit"],
            handle_ctrl_c: true,
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(())
}
