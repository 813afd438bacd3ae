//! CLI entrypoint for AWS Advisor
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use advisor_application::{
    AcquireProgress, CapabilityAggregator, CapabilityInvoker, ChatModel, ConsultProgress,
    ConsultantSession, ConversationLogger, ConversationRecorder, NoAcquireProgress,
    NoConsultProgress, NoConversationLogger, UsageSummary,
};
use advisor_domain::{
    AWS_PROFILE_ENV, BackendHandle, BackendSelector, CapabilityRegistry, ProviderConfig,
    resolve_aws_profile,
};
use advisor_infrastructure::{
    ConfigLoader, FileConfig, FileTranscriptStore, JsonlConversationLogger, McpLauncher,
    create_chat_model,
};
use advisor_presentation::{
    Cli, ConsoleFormatter, DriverOutcome, ExitReason, ProgressReporter, RustylineSource,
    SimpleProgress, default_history_path, run_interactive, run_single_shot,
};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(&cli)?;

    info!("Starting AWS Advisor");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    let aws_profile = resolve_aws_profile(
        cli.aws_profile.as_deref(),
        std::env::var(AWS_PROFILE_ENV).ok(),
    );
    info!(profile = %aws_profile, "Resolved AWS profile");

    let providers = config.provider_configs(&aws_profile);
    let display = Display::new(&cli, &config);

    // === Dependency Injection ===
    let launcher = Arc::new(McpLauncher::new().with_stderr(cli.verbose > 0));
    let aggregator = CapabilityAggregator::new(launcher).with_progress(display.acquire.clone());

    if cli.list_tools {
        return list_tools(&aggregator, &providers, &aws_profile).await;
    }

    let remote = config.bedrock.to_remote_config(&aws_profile);
    let local = config.local.to_local_config();
    let intended = if cli.local {
        BackendHandle::Local(local.clone())
    } else {
        BackendHandle::Remote(remote.clone())
    };

    let backend = match BackendSelector::new(remote).select(cli.local, local) {
        Ok(backend) => backend,
        Err(e) => return Ok(setup_failure(&intended, &e)),
    };
    let model = match create_chat_model(&backend).await {
        Ok(model) => model,
        Err(e) => return Ok(setup_failure(&backend, &e)),
    };

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.dir));
    let mut recorder = ConversationRecorder::new(Arc::new(FileTranscriptStore::new(output_dir)));

    let conversation_logger: Arc<dyn ConversationLogger> = match &cli.event_log {
        Some(path) => match JsonlConversationLogger::open(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    if !cli.quiet {
        println!("{}", ConsoleFormatter::connecting(&aws_profile));
    }

    let run = RunContext {
        cli: &cli,
        config: &config,
        backend: &backend,
        model,
        conversation_logger,
        display: &display,
        provider_names: providers.iter().map(|p| p.name.clone()).collect(),
    };

    let recorder_ref = &mut recorder;
    let result = aggregator
        .with_capabilities(&providers, move |scope| async move {
            if !run.cli.quiet {
                println!(
                    "{}",
                    ConsoleFormatter::connection_summary(scope.registry().stats())
                );
            }
            run.consult(scope.clone(), scope.registry(), recorder_ref)
                .await
        })
        .await;

    let (outcome, usage) = match result {
        Ok(Ok(report)) => report,
        Ok(Err(e)) => {
            error!(error = %e, "Consultant setup failed");
            return Ok(setup_failure(&backend, &e));
        }
        Err(e) => {
            error!(error = %e, "Provider acquisition failed");
            return Ok(setup_failure(&backend, &e));
        }
    };

    match outcome.reason {
        ExitReason::Interrupted => println!("{}", ConsoleFormatter::interrupted()),
        ExitReason::ExitCommand | ExitReason::EndOfInput => {
            println!("{}", ConsoleFormatter::goodbye())
        }
        ExitReason::InputFailed(ref e) => println!("{}", ConsoleFormatter::error(e)),
        ExitReason::Completed => {}
    }

    if let Some(path) = recorder.flush(None) {
        println!("{}", ConsoleFormatter::saved(&path));
    }

    if !cli.quiet {
        print!("{}", ConsoleFormatter::usage_summary(&usage));
    }

    if outcome.reason.is_failure() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Initialize logging based on verbosity level
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(dir) = &cli.log_dir else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let appender = tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("aws-advisor")
        .filename_suffix("log")
        .build(dir)
        .with_context(|| format!("Failed to open log directory {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Print the error with guidance and exit with status 1
fn setup_failure(backend: &BackendHandle, error: &dyn std::fmt::Display) -> ExitCode {
    eprintln!("{}", ConsoleFormatter::error(&error.to_string()));
    eprintln!("{}", ConsoleFormatter::troubleshooting(backend));
    ExitCode::FAILURE
}

async fn list_tools(
    aggregator: &CapabilityAggregator,
    providers: &[ProviderConfig],
    aws_profile: &str,
) -> Result<ExitCode> {
    println!("{}", ConsoleFormatter::connecting(aws_profile));

    let listing = aggregator
        .with_capabilities(providers, |scope| async move {
            ConsoleFormatter::tool_list(scope.registry())
        })
        .await;

    match listing {
        Ok(text) => {
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::error(&e.to_string()));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Progress sinks chosen from `--quiet` and `[repl].show_progress`
struct Display {
    acquire: Arc<dyn AcquireProgress>,
    consult: Arc<dyn ConsultProgress>,
    spinner: Option<Arc<ProgressReporter>>,
}

impl Display {
    fn new(cli: &Cli, config: &FileConfig) -> Self {
        if cli.quiet {
            return Self {
                acquire: Arc::new(NoAcquireProgress),
                consult: Arc::new(NoConsultProgress),
                spinner: None,
            };
        }
        if config.repl.show_progress {
            let reporter = Arc::new(ProgressReporter::new());
            Self {
                acquire: reporter.clone(),
                consult: reporter.clone(),
                spinner: Some(reporter),
            }
        } else {
            Self {
                acquire: Arc::new(SimpleProgress),
                consult: Arc::new(SimpleProgress),
                spinner: None,
            }
        }
    }
}

/// Everything the consultation needs once the providers are up
struct RunContext<'a> {
    cli: &'a Cli,
    config: &'a FileConfig,
    backend: &'a BackendHandle,
    model: Arc<dyn ChatModel>,
    conversation_logger: Arc<dyn ConversationLogger>,
    display: &'a Display,
    provider_names: Vec<String>,
}

impl RunContext<'_> {
    async fn consult(
        self,
        invoker: Arc<dyn CapabilityInvoker>,
        registry: &CapabilityRegistry,
        recorder: &mut ConversationRecorder,
    ) -> Result<(DriverOutcome, UsageSummary)> {
        let mut consultant = ConsultantSession::new(
            self.config.agent.system_prompt(),
            self.backend.clone(),
            self.model,
            invoker,
            registry,
        )?
        .with_max_tool_rounds(self.config.agent.max_tool_rounds)
        .with_conversation_logger(self.conversation_logger)
        .with_progress(self.display.consult.clone());

        let spinner = self.display.spinner.as_deref();

        let outcome = match self.cli.single_query() {
            Some(query) => {
                println!("{}", ConsoleFormatter::single_shot_header(self.backend, &query));
                run_single_shot(&mut consultant, recorder, &self.cli.query, spinner).await
            }
            None => {
                println!(
                    "{}",
                    ConsoleFormatter::welcome(self.backend, &self.provider_names)
                );
                let history = self
                    .config
                    .repl
                    .history_file
                    .as_ref()
                    .map(PathBuf::from)
                    .or_else(default_history_path);
                let mut source =
                    RustylineSource::new(history).context("Failed to initialize line editor")?;
                run_interactive(&mut consultant, recorder, &mut source, spinner).await
            }
        };

        Ok((outcome, consultant.usage().clone()))
    }
}
