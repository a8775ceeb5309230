use std::collections::BTreeMap;

use log::info;

use crate::{ConfigValue, DriverQuirks, Error, value::env_lookup};

/// Options passed to the driver under test while opening database, connection and statement
/// handles. Keys are driver specific option names, e.g. `adbc.snowflake.sql.account`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriverSetup {
    pub database: BTreeMap<String, ConfigValue>,
    pub connection: BTreeMap<String, ConfigValue>,
    pub statement: BTreeMap<String, ConfigValue>,
}

impl DriverSetup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database_option(mut self, key: impl Into<String>, value: ConfigValue) -> Self {
        self.database.insert(key.into(), value);
        self
    }

    pub fn with_connection_option(mut self, key: impl Into<String>, value: ConfigValue) -> Self {
        self.connection.insert(key.into(), value);
        self
    }

    pub fn with_statement_option(mut self, key: impl Into<String>, value: ConfigValue) -> Self {
        self.statement.insert(key.into(), value);
        self
    }

    /// Names of all environment variables the setup depends on.
    pub fn required_env_vars(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .database
            .values()
            .chain(self.connection.values())
            .chain(self.statement.values())
            .filter_map(|value| match value {
                ConfigValue::FromEnv(name) => Some(name.as_str()),
                ConfigValue::Literal(_) => None,
            })
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Resolve every option. Fails on the first environment variable which is not set.
    pub fn resolve(&self, lookup: &impl Fn(&str) -> Option<String>) -> Result<ResolvedSetup, Error> {
        Ok(ResolvedSetup {
            database: resolve_options(&self.database, lookup)?,
            connection: resolve_options(&self.connection, lookup)?,
            statement: resolve_options(&self.statement, lookup)?,
        })
    }
}

fn resolve_options(
    options: &BTreeMap<String, ConfigValue>,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<BTreeMap<String, String>, Error> {
    options
        .iter()
        .map(|(key, value)| Ok((key.clone(), value.resolve(lookup)?)))
        .collect()
}

/// [`DriverSetup`] with all values known.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedSetup {
    pub database: BTreeMap<String, String>,
    pub connection: BTreeMap<String, String>,
    pub statement: BTreeMap<String, String>,
}

/// Everything the validation suite needs to know about one driver for the duration of a test run.
/// Environment dependent values are resolved exactly once, while constructing the context, so all
/// tests of a run observe the same configuration.
pub struct DriverContext<'q> {
    pub quirks: &'q dyn DriverQuirks,
    pub setup: ResolvedSetup,
    pub current_catalog: Option<String>,
    pub current_schema: Option<String>,
    pub secondary_catalog: Option<String>,
    pub secondary_schema: Option<String>,
}

impl<'q> DriverContext<'q> {
    /// Resolve the quirks against the environment of the current process.
    pub fn from_env(quirks: &'q dyn DriverQuirks) -> Result<Self, Error> {
        Self::resolve(quirks, &env_lookup)
    }

    /// Resolve the quirks using `lookup` to fetch environment variables.
    pub fn resolve(
        quirks: &'q dyn DriverQuirks,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Error> {
        let features = quirks.features();
        let resolve_optional = |value: &Option<ConfigValue>| -> Result<Option<String>, Error> {
            value.as_ref().map(|value| value.resolve(lookup)).transpose()
        };
        let context = DriverContext {
            quirks,
            setup: quirks.setup().resolve(lookup)?,
            current_catalog: resolve_optional(&features.current_catalog)?,
            current_schema: resolve_optional(&features.current_schema)?,
            secondary_catalog: resolve_optional(&features.secondary_catalog)?,
            secondary_schema: resolve_optional(&features.secondary_schema)?,
        };
        info!(
            "Resolved setup for driver '{}' ({}). Database options: {:?}",
            quirks.name(),
            quirks.driver_name(),
            context.setup.database.keys().collect::<Vec<_>>()
        );
        Ok(context)
    }
}
