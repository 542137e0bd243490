use crate::render;
use crate::shutdown::install_interrupt_handler;
use clap::{Args, Parser, Subcommand};
use job_board::config::AppConfig;
use job_board::error::AppError;
use job_board::telemetry;
use job_board::workflows::listings::{
    ActivationOutcome, ApplicationForm, FilterDimension, HttpJobsGateway, JobBoard, JobId,
    ViewerProfile, ViewerRole,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "job-board",
    about = "Browse, apply to, and manage job postings from the command line",
    version
)]
struct Cli {
    #[command(flatten)]
    viewer: ViewerArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ViewerArgs {
    /// Email of the signed-in viewer
    #[arg(long)]
    email: String,
    /// Viewer role: candidate or recruiter
    #[arg(long, value_parser = parse_role, default_value = "candidate")]
    role: ViewerRole,
    /// Skill declared on the viewer's profile (repeatable)
    #[arg(long = "viewer-skill")]
    viewer_skills: Vec<String>,
}

impl ViewerArgs {
    fn into_profile(self) -> ViewerProfile {
        ViewerProfile::new(self.email, self.role, self.viewer_skills)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List jobs, matching the viewer's skills first
    List(ListArgs),
    /// Apply to a job as the viewer
    Apply(ApplyArgs),
    /// Delete one of the viewer's job postings
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Case-insensitive search on the job title
    #[arg(long)]
    search: Option<String>,
    /// Company filter; any selected company matches (repeatable)
    #[arg(long)]
    company: Vec<String>,
    /// Location filter; any selected location matches (repeatable)
    #[arg(long)]
    location: Vec<String>,
    /// Skill filter; every selected skill is required (repeatable)
    #[arg(long)]
    skill: Vec<String>,
    /// Also print the available filter options
    #[arg(long)]
    facets: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// Identifier of the job to apply to
    job_id: String,
    /// Additional application field as key=value (repeatable)
    #[arg(long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub(crate) struct DeleteArgs {
    /// Identifier of the job to delete
    job_id: String,
}

fn parse_role(raw: &str) -> Result<ViewerRole, String> {
    ViewerRole::parse(raw).ok_or_else(|| format!("unknown role '{raw}' (candidate|recruiter)"))
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("field '{raw}' must look like key=value"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("field '{raw}' has an empty key"));
    }
    Ok((key.to_string(), value.to_string()))
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let gateway = Arc::new(HttpJobsGateway::from_config(&config.api)?);
    let viewer = cli.viewer.into_profile();
    let board = JobBoard::with_lifetime(gateway, viewer, install_interrupt_handler());

    match board.activate().await? {
        ActivationOutcome::Loaded { jobs } => {
            info!(?config.environment, base_url = %config.api.base_url, jobs, "job board ready");
        }
        ActivationOutcome::Failed => {
            render::unavailable(&board);
            return Ok(());
        }
        ActivationOutcome::Abandoned => return Ok(()),
    }

    match cli.command {
        Command::List(args) => list(&board, args),
        Command::Apply(args) => apply(&board, args).await,
        Command::Delete(args) => delete(&board, args).await,
    }
}

fn list(board: &JobBoard, args: ListArgs) -> Result<(), AppError> {
    if let Some(search) = args.search {
        board.set_search_term(search)?;
    }
    let selections = [
        (FilterDimension::Company, args.company),
        (FilterDimension::Location, args.location),
        (FilterDimension::Skill, args.skill),
    ];
    for (dimension, values) in selections {
        for value in values {
            board.toggle_filter(dimension, value)?;
        }
    }

    if args.facets {
        if let Some(facets) = board.snapshot().facets() {
            render::facets(&facets);
        }
    }
    board.with_board(render::board);
    Ok(())
}

async fn apply(board: &JobBoard, args: ApplyArgs) -> Result<(), AppError> {
    board.open_application(&JobId(args.job_id))?;

    let form = args
        .fields
        .into_iter()
        .fold(ApplicationForm::default(), |form, (key, value)| {
            form.with_field(key, Value::String(value))
        });
    board.submit_application(form).await?;

    render::confirmation(&board.snapshot());
    Ok(())
}

async fn delete(board: &JobBoard, args: DeleteArgs) -> Result<(), AppError> {
    board.delete_job(&JobId(args.job_id)).await?;
    render::confirmation(&board.snapshot());
    Ok(())
}
