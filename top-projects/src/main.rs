//! `top-projects` CLI.
//!
//! Runs named export tasks (`top-go`, `top-python`, ...) that fetch
//! top-starred repository lists into CSV files once, and view tasks that open
//! those files in a terminal CSV viewer.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::debug;

use top_projects::core::invariants::validate_ecosystems;
use top_projects::core::naming::{
    DEFAULT_MAX_STARS, DEFAULT_MIN_STARS, default_output_path, fetch_task_id,
};
use top_projects::core::types::{DatasetRequest, ExportOutcome, Task, ViewOutcome};
use top_projects::exit_codes;
use top_projects::export::{ensure_export, skip_notice};
use top_projects::io::config::{DEFAULT_CONFIG_FILE, ProjectConfig, init_config, load_config};
use top_projects::io::delegate::{ProcessFetchDelegate, ProcessViewDelegate};
use top_projects::logging;
use top_projects::tasks::{describe_tasks, resolve_task, task_ids};
use top_projects::view::view_export;

#[derive(Parser)]
#[command(
    name = "top-projects",
    version,
    about = "Fetch and view top-starred repositories per language"
)]
struct Cli {
    /// Config file (missing file means built-in go/python datasets).
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Raise diagnostic output on stderr (`-v` info, `-vv` debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a named task, e.g. `top-go` or `python-view`.
    Run {
        /// Task id (see `top-projects list`).
        task: String,
    },
    /// Fetch an ad-hoc dataset unless its output file already exists.
    Fetch {
        #[arg(long)]
        language: String,
        #[arg(long, default_value_t = DEFAULT_MIN_STARS)]
        min_stars: u64,
        #[arg(long, default_value_t = DEFAULT_MAX_STARS)]
        max_stars: u64,
        /// Defaults to `top-<language>-projects.csv`.
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        min_forks: Option<u64>,
    },
    /// Open a CSV file in the configured viewer.
    View { path: PathBuf },
    /// List task ids.
    List {
        /// Print full task descriptions as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Write the default config file.
    Init {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::for_error(&err));
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::List { json } => cmd_list(&load_config(&cli.config)?, json),
        Command::Run { task } => cmd_run(&load_config(&cli.config)?, &task),
        Command::Fetch {
            language,
            min_stars,
            max_stars,
            output,
            min_forks,
        } => {
            let config = load_config(&cli.config)?;
            let output = match output {
                Some(path) => path,
                None => {
                    let errors = validate_ecosystems([language.as_str()]);
                    if !errors.is_empty() {
                        bail!("invalid --language: {}", errors.join("; "));
                    }
                    default_output_path(&language)
                }
            };
            let request = DatasetRequest::new(language, min_stars, max_stars, output)
                .with_min_forks(min_forks);
            cmd_fetch(&config, &request)
        }
        Command::View { path } => cmd_view(&load_config(&cli.config)?, &path, None),
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<i32> {
    init_config(path, force)?;
    println!("wrote {}", path.display());
    Ok(exit_codes::OK)
}

fn cmd_list(config: &ProjectConfig, json: bool) -> Result<i32> {
    if json {
        let payload =
            serde_json::to_string_pretty(&describe_tasks(config)).context("serialize tasks")?;
        println!("{payload}");
    } else {
        for id in task_ids(config) {
            println!("{id}");
        }
    }
    Ok(exit_codes::OK)
}

fn cmd_run(config: &ProjectConfig, id: &str) -> Result<i32> {
    let task = resolve_task(config, id)?;
    debug!(?task, "resolved task");
    match task {
        Task::Fetch(request) => cmd_fetch(config, &request),
        Task::View { ecosystem, path } => cmd_view(config, &path, Some(&ecosystem)),
    }
}

fn cmd_fetch(config: &ProjectConfig, request: &DatasetRequest) -> Result<i32> {
    let delegate = ProcessFetchDelegate::from_config(&config.fetch);
    match ensure_export(request, &delegate)? {
        ExportOutcome::Skipped { reason } => println!("{}", skip_notice(&request.output, reason)),
        ExportOutcome::Delegated => debug!(output = %request.output.display(), "export delegated"),
    }
    Ok(exit_codes::OK)
}

fn cmd_view(config: &ProjectConfig, path: &Path, ecosystem: Option<&str>) -> Result<i32> {
    let viewer = ProcessViewDelegate::from_config(&config.viewer);
    match view_export(path, &viewer)? {
        ViewOutcome::Viewed => Ok(exit_codes::OK),
        ViewOutcome::Missing => {
            match ecosystem {
                Some(ecosystem) => eprintln!(
                    "{} does not exist; run {} first.",
                    path.display(),
                    fetch_task_id(ecosystem)
                ),
                None => eprintln!("{} does not exist.", path.display()),
            }
            Ok(exit_codes::INVALID)
        }
    }
}
