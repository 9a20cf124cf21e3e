//! gmh - CLI entry point.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gmh::text::{Language, Text, using_provider};
use gmh::{
    AppConfig, GitCommitter, GitError, OpenAiCompatibleProvider, Session, SessionError, StagedDiff,
};

/// Draft a commit message for the staged changes with an LLM.
#[derive(Parser, Debug)]
#[command(name = "gmh")]
#[command(about = "Draft a commit message for the staged changes with an LLM")]
#[command(version)]
struct Cli {
    /// Config file to use (defaults to $GMH_CONFIG, then ~/.git_commit)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Provider to use, overriding current_provider from the config file
    #[arg(long)]
    provider: Option<String>,

    /// Print the generated message and exit without committing
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "gmh=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // Step 1: Load config and pick the provider
    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}{}", Text::ConfigError.get(Language::default()), e);
            return Ok(ExitCode::FAILURE);
        }
    };
    if let Some(name) = cli.provider {
        config.set_current_provider(name);
    }
    let language = config.language();

    let provider_config = match config.resolve_provider() {
        Ok(provider_config) => provider_config,
        Err(e) => {
            eprintln!("{}{}", Text::ProviderError.get(language), e);
            return Ok(ExitCode::FAILURE);
        }
    };
    debug!("Resolved provider: {:?}", provider_config);

    println!(
        "{}",
        using_provider(language, &provider_config.name, &provider_config.model)
    );

    // Step 2: Wire up git and the provider
    let provider =
        OpenAiCompatibleProvider::new(provider_config).context("Failed to build HTTP client")?;
    let workdir = std::env::current_dir().context("Failed to read the current directory")?;
    let source = StagedDiff::new(&workdir);
    let committer = GitCommitter::new(&workdir);
    let session = Session::new(&source, &provider, &committer, language);

    // Step 3: Generate and review
    let result = if cli.dry_run {
        println!("{}", Text::Generating.get(language));
        session.draft().await.map(|message| println!("{}", message))
    } else {
        let stdin = io::stdin();
        let stdout = io::stdout();
        session.run(stdin.lock(), stdout.lock()).await.map(|_| ())
    };

    exit_code(result, language)
}

/// Print a session failure, if any, and choose the exit code.
///
/// A commit and a quit both end the session with `Ok(())`.
fn exit_code(result: Result<(), SessionError>, language: Language) -> Result<ExitCode> {
    let Err(err) = result else {
        return Ok(ExitCode::SUCCESS);
    };
    match err {
        SessionError::Git(GitError::StagingEmpty) => {
            println!("{}", Text::StagingEmpty.get(language));
            Ok(ExitCode::SUCCESS)
        }
        SessionError::Git(GitError::NotARepository) => {
            println!("{}", Text::NotARepository.get(language));
            Ok(ExitCode::FAILURE)
        }
        SessionError::Provider(e) => {
            eprintln!("{}{}", Text::GenerationFailed.get(language), e);
            Ok(ExitCode::FAILURE)
        }
        SessionError::Git(e) => Err(e).context("Failed to read staged changes"),
        SessionError::Io(e) => Err(e).context("Terminal I/O failed"),
    }
}
