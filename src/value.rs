use std::fmt;

use log::debug;

use crate::Error;

/// A configuration value of a driver under test. Either spelled out in the quirks, or deferred
/// to the environment of the test run. Credentials and account names are never part of the
/// quirks, they are always taken from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigValue {
    /// Value is known at the time the quirks are declared.
    Literal(String),
    /// Name of an environment variable holding the value. It is resolved once at setup of the
    /// test run.
    FromEnv(String),
}

impl ConfigValue {
    pub fn literal(value: impl Into<String>) -> Self {
        ConfigValue::Literal(value.into())
    }

    pub fn from_env(name: impl Into<String>) -> Self {
        ConfigValue::FromEnv(name.into())
    }

    /// Resolve the value. `lookup` maps the name of an environment variable to its value. Usually
    /// this is [`env_lookup`], but tests may want to inject their own environment.
    pub fn resolve(&self, lookup: &impl Fn(&str) -> Option<String>) -> Result<String, Error> {
        match self {
            ConfigValue::Literal(value) => Ok(value.clone()),
            ConfigValue::FromEnv(name) => {
                debug!("Resolving configuration value from environment variable '{name}'.");
                lookup(name).ok_or_else(|| Error::MissingEnvironmentVariable { name: name.clone() })
            }
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Literal(value) => write!(f, "{value}"),
            ConfigValue::FromEnv(name) => write!(f, "${{{name}}}"),
        }
    }
}

/// Looks up variables in the environment of the current process. Variables which are not valid
/// unicode are treated as unset.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
