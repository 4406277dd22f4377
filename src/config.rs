use crate::model::Limits;
use eyre::{ensure, Result, WrapErr};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "psolver.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub solver: SolverConfig,
    pub csv: CsvConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Search timeout in seconds.
    pub timeout: u64,
    pub max_supervisor_projects: usize,
    pub max_project_students: usize,
    /// Highest serial taken into account when ranking projects by popularity.
    pub max_popular_serial: u32,
    /// Codes of projects which can only host one student.
    pub single_student_projects: Vec<String>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            timeout: 10,
            max_supervisor_projects: limits.max_supervisor_projects,
            max_project_students: limits.max_project_students,
            max_popular_serial: 100,
            single_student_projects: Vec::new(),
        }
    }
}

impl SolverConfig {
    pub fn limits(&self) -> Limits {
        Limits {
            max_supervisor_projects: self.max_supervisor_projects,
            max_project_students: self.max_project_students,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsvConfig {
    /// Column holding the student login.
    pub student_column: usize,
    /// Columns holding the choices, first choice first.
    pub choice_columns: Vec<usize>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            student_column: 0,
            choice_columns: vec![5, 6, 7, 8, 9],
        }
    }
}

impl Config {
    pub fn load(file_name: &Path) -> Result<Config> {
        let content = fs::read_to_string(file_name)
            .wrap_err_with(|| format!("cannot read configuration file {}", file_name.display()))?;
        Self::parse(&content).wrap_err("cannot load configuration file")
    }

    pub fn parse(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        ensure!(
            config.solver.max_project_students >= 1,
            "solver.max_project_students must be at least 1"
        );
        ensure!(
            !config.csv.choice_columns.is_empty(),
            "csv.choice_columns cannot be empty"
        );
        Ok(config)
    }
}
