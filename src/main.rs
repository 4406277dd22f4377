use crate::algos::{Algo, Backtracking};
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::loader::Loader;
use clap::Parser;
use eyre::{bail, ensure, Result, WrapErr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, Level};

mod algos;
mod checks;
mod config;
mod display;
mod loader;
mod model;
mod stats;

#[derive(Parser, Debug)]
#[command(version, author, about)]
struct Args {
    /// Use FILE instead of psolver.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stop searching after SECONDS and report the sets found so far
    #[arg(short, long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Set verbosity level
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// CSV export of the students' selections
    selections: PathBuf,
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => Config::load(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            Config::load(Path::new(DEFAULT_CONFIG_FILE))
        }
        None => Ok(Config::default()),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let config = load_config(&args)?;
    let timeout = args
        .timeout
        .map_or_else(|| config.solver.timeout(), Duration::from_secs);
    let mut selections = Loader::new(&config.csv)
        .load(&args.selections)
        .wrap_err("cannot load selections")?;
    for code in &config.solver.single_student_projects {
        let Some(project) = selections.project_by_code(code).map(|p| p.id) else {
            bail!("unknown single student project {code}");
        };
        selections.set_allow_multiple(project, false);
    }
    info!(
        projects = selections.single_student_projects().len(),
        "restricted projects to a single student"
    );
    let students = selections.students().len();
    let (outcome, stats) = {
        let mut algo = Backtracking::new(&mut selections, &config.solver).with_timeout(timeout);
        let outcome = algo.assign();
        (outcome, algo.stats())
    };
    let limits = config.solver.limits();
    for solution in outcome.solutions.iter() {
        checks::ensure_valid(solution, students, &limits)
            .wrap_err("inconsistent allocation set")?;
    }
    display::display_outcome(&outcome, &stats);
    ensure!(
        !outcome.is_infeasible(),
        "no complete allocation exists for these {students} students"
    );
    ensure!(
        !outcome.solutions.is_empty(),
        "no allocation set found before the {timeout:?} timeout"
    );
    Ok(())
}
