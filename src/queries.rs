use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::{DriverQuirks, Error};

const QUERY_SUFFIX: &str = ".sql";
const SETUP_SUFFIX: &str = ".setup.sql";

/// A SQL fixture of the validation suite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    /// Path of the fixture relative to its queries directory, using `.` as separator and without
    /// the `.sql` suffix. E.g. `type/select/int32.sql` is named `type.select.int32`.
    pub name: String,
    pub path: PathBuf,
    /// Script run before the query, from the sibling `<name>.setup.sql` file.
    pub setup: Option<PathBuf>,
}

impl Query {
    pub fn sql(&self) -> Result<String, Error> {
        read_to_string(&self.path)
    }

    /// Statements of the setup script, split according to the dialect of the driver. Empty if
    /// there is no setup script.
    pub fn setup_statements(&self, quirks: &dyn DriverQuirks) -> Result<Vec<String>, Error> {
        match &self.setup {
            Some(path) => quirks.split_statement(&read_to_string(path)?),
            None => Ok(Vec::new()),
        }
    }
}

fn read_to_string(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })
}

/// All queries found in the queries directories of `quirks`, sorted by name.
pub fn load_queries(quirks: &dyn DriverQuirks) -> Result<Vec<Query>, Error> {
    let mut queries = Vec::new();
    for root in quirks.queries_paths() {
        if !root.is_dir() {
            warn!(
                "Queries directory '{}' of driver '{}' does not exist. Skipping it.",
                root.display(),
                quirks.name()
            );
            continue;
        }
        queries.extend(queries_in(&root)?);
    }
    queries.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Found {} queries for driver '{}'.", queries.len(), quirks.name());
    Ok(queries)
}

/// Queries within a single directory, including its subdirectories.
pub fn queries_in(root: &Path) -> Result<Vec<Query>, Error> {
    let mut queries = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|error| {
            let path = error.path().unwrap_or(root).to_owned();
            Error::Io {
                path,
                source: error.into(),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if file_name.ends_with(SETUP_SUFFIX) || !file_name.ends_with(QUERY_SUFFIX) {
            continue;
        }
        let stem = &file_name[..file_name.len() - QUERY_SUFFIX.len()];
        let setup = path.with_file_name(format!("{stem}{SETUP_SUFFIX}"));
        queries.push(Query {
            name: query_name(root, path),
            path: path.to_owned(),
            setup: setup.is_file().then_some(setup),
        });
    }
    Ok(queries)
}

fn query_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join(".")
}
