use crate::config::CsvConfig;
use crate::model::{Selections, SelectionsBuilder};
use eyre::{ensure, eyre, Result, WrapErr};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// Reads the per-student export of selections: one row per student after a
/// header row, choices in the configured columns.
pub struct Loader<'a> {
    config: &'a CsvConfig,
}

impl<'a> Loader<'a> {
    pub fn new(config: &'a CsvConfig) -> Self {
        Self { config }
    }

    pub fn load(&self, path: &Path) -> Result<Selections> {
        let file =
            File::open(path).wrap_err_with(|| format!("cannot open {}", path.display()))?;
        self.load_from_reader(file)
            .wrap_err_with(|| format!("cannot load selections from {}", path.display()))
    }

    pub fn load_from_reader<R: io::Read>(&self, reader: R) -> Result<Selections> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut builder = SelectionsBuilder::new();
        for (n, record) in reader.records().enumerate() {
            // The header is the first row.
            let row = n + 2;
            let record = record.wrap_err_with(|| format!("malformed row {row}"))?;
            let login = record
                .get(self.config.student_column)
                .filter(|login| !login.is_empty())
                .ok_or_else(|| eyre!("row {row}: missing student"))?;
            ensure!(
                !builder.has_student(login),
                "row {row}: student {login} appears several times"
            );
            let student = builder.student(login);
            let mut choices = 0;
            for (serial, &column) in (1..).zip(&self.config.choice_columns) {
                let Some(code) = record.get(column).filter(|code| !code.is_empty()) else {
                    continue;
                };
                let project = builder.project(code, supervisor_of(code));
                if builder.has_choice(student, project) {
                    warn!(row, student = login, project = code, "ignoring repeated choice");
                    continue;
                }
                builder.choice(student, project, serial);
                choices += 1;
            }
            if choices == 0 {
                warn!(row, student = login, "student has not chosen any project");
            }
        }
        let selections = builder.build();
        info!(
            students = selections.students().len(),
            projects = selections.projects().len(),
            selections = selections.len(),
            "loaded selections"
        );
        Ok(selections)
    }
}

/// Supervisor part of a project code shaped like `A-abc12-3`, or an empty
/// string for codes which do not follow this pattern.
pub fn supervisor_of(code: &str) -> &str {
    let mut parts = code.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(prefix), Some(supervisor), Some(_))
            if prefix.len() == 1 && prefix.bytes().all(|b| b.is_ascii_uppercase()) =>
        {
            supervisor
        }
        _ => "",
    }
}
