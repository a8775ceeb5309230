use std::{fmt, str::FromStr};

use crate::{ConfigValue, Error, XdbcField};

/// Capabilities a driver may or may not support. The validation suite skips or adapts tests
/// depending on these. The vocabulary is fixed, so a typo in a feature key is an error rather than
/// a silently unsupported feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    ConnectionGetTableSchema,
    ConnectionSetCurrentCatalog,
    ConnectionSetCurrentSchema,
    ConnectionTransactions,
    GetObjectsConstraintsCheck,
    GetObjectsConstraintsForeign,
    GetObjectsConstraintsPrimary,
    GetObjectsConstraintsUnique,
    StatementBind,
    StatementBulkIngest,
    StatementBulkIngestCatalog,
    StatementBulkIngestSchema,
    StatementBulkIngestTemporary,
    StatementExecuteSchema,
    StatementGetParameterSchema,
    StatementPrepare,
    StatementRowsAffected,
}

impl Feature {
    pub const ALL: [Feature; 17] = [
        Feature::ConnectionGetTableSchema,
        Feature::ConnectionSetCurrentCatalog,
        Feature::ConnectionSetCurrentSchema,
        Feature::ConnectionTransactions,
        Feature::GetObjectsConstraintsCheck,
        Feature::GetObjectsConstraintsForeign,
        Feature::GetObjectsConstraintsPrimary,
        Feature::GetObjectsConstraintsUnique,
        Feature::StatementBind,
        Feature::StatementBulkIngest,
        Feature::StatementBulkIngestCatalog,
        Feature::StatementBulkIngestSchema,
        Feature::StatementBulkIngestTemporary,
        Feature::StatementExecuteSchema,
        Feature::StatementGetParameterSchema,
        Feature::StatementPrepare,
        Feature::StatementRowsAffected,
    ];

    /// Key of the feature as used by the validation suite, e.g. `statement_bulk_ingest`.
    pub const fn key(self) -> &'static str {
        match self {
            Feature::ConnectionGetTableSchema => "connection_get_table_schema",
            Feature::ConnectionSetCurrentCatalog => "connection_set_current_catalog",
            Feature::ConnectionSetCurrentSchema => "connection_set_current_schema",
            Feature::ConnectionTransactions => "connection_transactions",
            Feature::GetObjectsConstraintsCheck => "get_objects_constraints_check",
            Feature::GetObjectsConstraintsForeign => "get_objects_constraints_foreign",
            Feature::GetObjectsConstraintsPrimary => "get_objects_constraints_primary",
            Feature::GetObjectsConstraintsUnique => "get_objects_constraints_unique",
            Feature::StatementBind => "statement_bind",
            Feature::StatementBulkIngest => "statement_bulk_ingest",
            Feature::StatementBulkIngestCatalog => "statement_bulk_ingest_catalog",
            Feature::StatementBulkIngestSchema => "statement_bulk_ingest_schema",
            Feature::StatementBulkIngestTemporary => "statement_bulk_ingest_temporary",
            Feature::StatementExecuteSchema => "statement_execute_schema",
            Feature::StatementGetParameterSchema => "statement_get_parameter_schema",
            Feature::StatementPrepare => "statement_prepare",
            Feature::StatementRowsAffected => "statement_rows_affected",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Feature {
    type Err = Error;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.key() == key)
            .ok_or_else(|| Error::UnknownFeature {
                key: key.to_owned(),
            })
    }
}

/// Capability flags of a driver. Anything not explicitly set is unsupported.
///
/// ```
/// use adbc_validation_quirks::{DriverFeatures, Feature};
///
/// let features = DriverFeatures {
///     statement_bulk_ingest: true,
///     ..DriverFeatures::default()
/// };
/// assert!(features.supports(Feature::StatementBulkIngest));
/// assert!(!features.supports(Feature::StatementBulkIngestTemporary));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriverFeatures {
    pub connection_get_table_schema: bool,
    pub connection_set_current_catalog: bool,
    pub connection_set_current_schema: bool,
    pub connection_transactions: bool,
    pub get_objects_constraints_check: bool,
    pub get_objects_constraints_foreign: bool,
    pub get_objects_constraints_primary: bool,
    pub get_objects_constraints_unique: bool,
    pub statement_bind: bool,
    pub statement_bulk_ingest: bool,
    pub statement_bulk_ingest_catalog: bool,
    pub statement_bulk_ingest_schema: bool,
    /// Bulk ingest into temporary tables.
    pub statement_bulk_ingest_temporary: bool,
    pub statement_execute_schema: bool,
    pub statement_get_parameter_schema: bool,
    pub statement_prepare: bool,
    pub statement_rows_affected: bool,
    /// Catalog the connection starts out in.
    pub current_catalog: Option<ConfigValue>,
    /// Schema the connection starts out in.
    pub current_schema: Option<ConfigValue>,
    /// An additional schema the test user may create tables in, used to test cross schema
    /// metadata queries.
    pub secondary_schema: Option<ConfigValue>,
    pub secondary_catalog: Option<ConfigValue>,
    /// Xdbc fields reported by `GetObjects` with meaningful values. Other xdbc fields are expected
    /// to be null.
    pub supported_xdbc_fields: Vec<XdbcField>,
}

impl DriverFeatures {
    pub fn supports(&self, feature: Feature) -> bool {
        match feature {
            Feature::ConnectionGetTableSchema => self.connection_get_table_schema,
            Feature::ConnectionSetCurrentCatalog => self.connection_set_current_catalog,
            Feature::ConnectionSetCurrentSchema => self.connection_set_current_schema,
            Feature::ConnectionTransactions => self.connection_transactions,
            Feature::GetObjectsConstraintsCheck => self.get_objects_constraints_check,
            Feature::GetObjectsConstraintsForeign => self.get_objects_constraints_foreign,
            Feature::GetObjectsConstraintsPrimary => self.get_objects_constraints_primary,
            Feature::GetObjectsConstraintsUnique => self.get_objects_constraints_unique,
            Feature::StatementBind => self.statement_bind,
            Feature::StatementBulkIngest => self.statement_bulk_ingest,
            Feature::StatementBulkIngestCatalog => self.statement_bulk_ingest_catalog,
            Feature::StatementBulkIngestSchema => self.statement_bulk_ingest_schema,
            Feature::StatementBulkIngestTemporary => self.statement_bulk_ingest_temporary,
            Feature::StatementExecuteSchema => self.statement_execute_schema,
            Feature::StatementGetParameterSchema => self.statement_get_parameter_schema,
            Feature::StatementPrepare => self.statement_prepare,
            Feature::StatementRowsAffected => self.statement_rows_affected,
        }
    }

    /// Same as [`Self::supports`], but takes the key used by the validation suite.
    pub fn supports_key(&self, key: &str) -> Result<bool, Error> {
        Ok(self.supports(key.parse()?))
    }

    /// All features this driver supports, in vocabulary order.
    pub fn supported(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL
            .into_iter()
            .filter(|&feature| self.supports(feature))
    }

    pub fn supports_xdbc_field(&self, field: XdbcField) -> bool {
        self.supported_xdbc_fields.contains(&field)
    }
}
