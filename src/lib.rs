//! Quirks of ADBC drivers, used to run a shared conformance suite against drivers of different
//! vendors.
//!
//! Each driver is described by an implementation of [`DriverQuirks`]: which features it supports,
//! which options it needs to connect, and how its SQL dialect and error messages deviate from the
//! baseline the suite is written against. The suite selects the quirks of the driver under test
//! from [`QUIRKS`], resolves them once using [`DriverContext`] and consults them to decide which
//! tests to skip or adapt.
//!
//! ```no_run
//! use adbc_validation_quirks::{find_quirks, load_queries, DriverContext, DropTable};
//!
//! let quirks = find_quirks("snowflake").expect("Snowflake quirks must be registered");
//! let context = DriverContext::from_env(quirks)?;
//! for query in load_queries(quirks)? {
//!     for statement in query.setup_statements(quirks)? {
//!         // ... execute statement with a connection configured by `context.setup` ...
//!     }
//! }
//! let cleanup = quirks.drop_table(&DropTable::new("constraint_primary"))?;
//! # Ok::<(), adbc_validation_quirks::Error>(())
//! ```

mod error;
mod features;
mod queries;
mod quirks;
mod setup;
mod snowflake;
mod split;
mod value;
mod xdbc;

use lazy_static::lazy_static;

pub use self::{
    error::Error,
    features::{DriverFeatures, Feature},
    queries::{Query, load_queries, queries_in},
    quirks::{DriverQuirks, DropTable, quote_with_double_quotes, shared_queries_path},
    setup::{DriverContext, DriverSetup, ResolvedSetup},
    snowflake::{SnowflakeFoundryQuirks, SnowflakeQuirks},
    split::split_statement,
    value::{ConfigValue, env_lookup},
    xdbc::{XdbcField, xdbc_schema},
};

// Rexport arrow to make it easier for downstream crates to depend on the same version used in the
// xdbc schema.
pub use arrow;

lazy_static! {
    /// Quirks of every driver known to the validation suite. Created once and never modified.
    pub static ref QUIRKS: Vec<Box<dyn DriverQuirks>> = vec![
        Box::new(SnowflakeQuirks::new()),
        Box::new(SnowflakeFoundryQuirks::new()),
    ];
}

/// Quirks of the driver identified by `key`. Names take precedence over driver packages, so a
/// driver can always be selected unambiguously by its name.
pub fn find_quirks(key: &str) -> Option<&'static dyn DriverQuirks> {
    QUIRKS
        .iter()
        .find(|quirks| quirks.name() == key)
        .or_else(|| QUIRKS.iter().find(|quirks| quirks.driver() == key))
        .map(|quirks| &**quirks)
}
