use anyhow::{Context, Result};
use ats_analyzer::core::{ConfigManager, ServiceClient, SubmissionController};
use ats_analyzer::report::{
    ActiveTab, CelebrationTrigger, ReportRenderer, TabViewController, TerminalConfetti,
};
use ats_analyzer::{AnalysisReport, JobDescription, SubmissionError, UploadedFile};
use clap::{Parser, ValueEnum};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "ats-analyzer")]
#[command(about = "Check a PDF resume for ATS compatibility against a job description")]
struct Cli {
    /// Resume to analyze (must be a PDF)
    resume: Option<PathBuf>,

    /// Job description text; leave empty to let the service use its default
    #[arg(short, long, conflicts_with = "job_file")]
    job_description: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    job_file: Option<PathBuf>,

    /// Declared media type of the resume, instead of guessing from the extension
    #[arg(long)]
    content_type: Option<String>,

    /// Analysis endpoint, overrides ATS_ANALYSIS_URL and config.yaml
    #[arg(long)]
    endpoint: Option<String>,

    /// Section of the report to show
    #[arg(long, value_enum, default_value_t = TabArg::Score)]
    tab: TabArg,

    /// Print the normalized report as JSON
    #[arg(long, conflicts_with = "interactive")]
    json: bool,

    /// Switch between report tabs by typing their names
    #[arg(short, long)]
    interactive: bool,

    /// Skip the confetti on a good score
    #[arg(long)]
    no_celebrate: bool,

    /// Write JSON logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TabArg {
    Score,
    Missing,
    Suggestions,
    All,
}

impl TabArg {
    fn tab(self) -> Option<ActiveTab> {
        match self {
            Self::Score => Some(ActiveTab::Score),
            Self::Missing => Some(ActiveTab::Missing),
            Self::Suggestions => Some(ActiveTab::Suggestions),
            Self::All => None,
        }
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_current_span(true)
                    .with_span_list(false),
            )
        }
        None => None,
    };
    let stderr_layer = if file_layer.is_none() {
        Some(fmt::layer().with_writer(std::io::stderr).with_target(false))
    } else {
        None
    };

    let default_level = if file_layer.is_some() { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

async fn read_job_description(cli: &Cli) -> Result<JobDescription> {
    if let Some(path) = &cli.job_file {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description: {}", path.display()))?;
        return Ok(JobDescription::new(text));
    }
    Ok(JobDescription::new(cli.job_description.clone().unwrap_or_default()))
}

async fn run_interactive(
    report: &AnalysisReport,
    tabs: &TabViewController,
    renderer: &ReportRenderer,
) -> Result<()> {
    println!("{}", renderer.render(report, tabs.active()));
    println!("Tabs: score, missing, suggestions. Type q to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "q" | "quit" | "exit") {
            break;
        }
        match input.parse::<ActiveTab>() {
            Ok(tab) => {
                if tabs.select(tab).is_some() {
                    println!("{}", renderer.render(report, tabs.active()));
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = ConfigManager::load()?.with_endpoint(cli.endpoint.clone());
    info!("Analysis service: {}", config.service.analysis_url);

    let job_description = read_job_description(&cli).await?;
    let file = match &cli.resume {
        Some(path) => Some(UploadedFile::from_path(path, cli.content_type.as_deref()).await?),
        None => None,
    };

    let service = ServiceClient::new(config.service.analysis_url.clone(), config.timeout())?;
    let tabs = Arc::new(TabViewController::new());
    let mut controller = SubmissionController::new(Arc::new(service)).with_observer(tabs.clone());
    if !cli.no_celebrate && !cli.json {
        controller =
            controller.with_observer(Arc::new(CelebrationTrigger::new(Arc::new(TerminalConfetti))));
    }

    if file.is_some() && !cli.json {
        eprintln!("Analyzing...");
    }

    let report = match controller.submit(file.as_ref(), &job_description).await {
        Ok(report) => report,
        Err(SubmissionError::Validation(e)) => {
            eprintln!("error[{}]: {}", e.code(), e);
            eprintln!("{}", e.suggestion());
            return Ok(ExitCode::from(2));
        }
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    let renderer = ReportRenderer::default();
    if cli.interactive {
        if let Some(tab) = cli.tab.tab() {
            tabs.select(tab);
        }
        run_interactive(&report, &tabs, &renderer).await?;
        return Ok(ExitCode::SUCCESS);
    }

    match cli.tab.tab() {
        Some(tab) => {
            tabs.select(tab);
            println!("{}", renderer.render(&report, tabs.active()));
        }
        None => {
            for tab in ActiveTab::ALL {
                println!("{}\n", renderer.render(&report, tab));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
