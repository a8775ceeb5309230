//! Quirks of the Snowflake drivers.
//!
//! There are two drivers for Snowflake with notably different behaviour: The Go based driver
//! shipped with ADBC itself, and the driver from the ADBC Driver Foundry. They differ in the way
//! they report errors and in how identifiers are treated.

use std::fmt::Display;

use crate::{
    ConfigValue, DriverFeatures, DriverQuirks, DriverSetup, DropTable, Error, XdbcField,
    quote_with_double_quotes, split_statement,
};

/// Capabilities shared by both Snowflake drivers.
fn snowflake_features() -> DriverFeatures {
    DriverFeatures {
        connection_get_table_schema: true,
        connection_set_current_catalog: true,
        connection_set_current_schema: true,
        connection_transactions: true,
        get_objects_constraints_foreign: true,
        get_objects_constraints_primary: true,
        statement_bulk_ingest: true,
        statement_bulk_ingest_schema: true,
        statement_bulk_ingest_temporary: false,
        statement_execute_schema: true,
        current_catalog: Some(ConfigValue::from_env("SNOWFLAKE_DATABASE")),
        current_schema: Some(ConfigValue::from_env("SNOWFLAKE_SCHEMA")),
        secondary_schema: Some(ConfigValue::from_env("SNOWFLAKE_SECONDARY_SCHEMA")),
        supported_xdbc_fields: vec![
            XdbcField::DataType,
            XdbcField::TypeName,
            XdbcField::Nullable,
            XdbcField::SqlDataType,
            XdbcField::DecimalDigits,
            XdbcField::ColumnSize,
            XdbcField::CharOctetLength,
            XdbcField::IsNullable,
            XdbcField::NumPrecRadix,
            XdbcField::DatetimeSub,
        ],
        ..DriverFeatures::default()
    }
}

/// Quirks of the Go based Snowflake driver.
///
/// Identifiers are used unquoted, so Snowflake normalizes them to uppercase. This matches the way
/// the setup scripts of the shared fixtures create their tables.
pub struct SnowflakeQuirks {
    features: DriverFeatures,
    setup: DriverSetup,
}

impl SnowflakeQuirks {
    pub fn new() -> Self {
        let setup = DriverSetup::new()
            .with_database_option("username", ConfigValue::from_env("SNOWFLAKE_USERNAME"))
            .with_database_option("password", ConfigValue::from_env("SNOWFLAKE_PASSWORD"))
            .with_database_option(
                "adbc.snowflake.sql.auth_type",
                ConfigValue::from_env("SNOWFLAKE_AUTH_TYPE"),
            )
            .with_database_option(
                "adbc.snowflake.sql.account",
                ConfigValue::from_env("SNOWFLAKE_ACCOUNT"),
            )
            .with_database_option(
                "adbc.snowflake.sql.db",
                ConfigValue::from_env("SNOWFLAKE_DATABASE"),
            )
            .with_database_option(
                "adbc.snowflake.sql.schema",
                ConfigValue::from_env("SNOWFLAKE_SCHEMA"),
            )
            .with_database_option(
                "adbc.snowflake.sql.warehouse",
                ConfigValue::from_env("SNOWFLAKE_WAREHOUSE"),
            )
            .with_database_option(
                "adbc.snowflake.sql.role",
                ConfigValue::from_env("SNOWFLAKE_ROLE"),
            );
        Self {
            features: snowflake_features(),
            setup,
        }
    }
}

impl Default for SnowflakeQuirks {
    fn default() -> Self {
        Self::new()
    }
}

impl DriverQuirks for SnowflakeQuirks {
    fn name(&self) -> &str {
        "snowflake"
    }

    fn driver(&self) -> &str {
        "adbc_driver_snowflake"
    }

    fn driver_name(&self) -> &str {
        "ADBC Snowflake Driver - Go"
    }

    fn vendor_name(&self) -> &str {
        "Snowflake"
    }

    fn vendor_version(&self) -> &str {
        "unknown"
    }

    fn short_version(&self) -> &str {
        "snowflake"
    }

    fn features(&self) -> &DriverFeatures {
        &self.features
    }

    fn setup(&self) -> &DriverSetup {
        &self.setup
    }

    fn is_table_not_found(&self, table_name: Option<&str>, error: &dyn Display) -> bool {
        let message = error.to_string().to_lowercase();
        message.contains("does not exist")
            && table_name.is_none_or(|table_name| message.contains(&table_name.to_lowercase()))
    }

    fn quote_one_identifier(&self, identifier: &str) -> String {
        identifier.to_owned()
    }

    fn split_statement(&self, statement: &str) -> Result<Vec<String>, Error> {
        split_statement(statement, None)
    }

    fn drop_table(&self, request: &DropTable<'_>) -> Result<String, Error> {
        if request.temporary {
            return Err(Error::NotImplemented {
                operation: "drop temporary table",
            });
        }
        // Unquoted, so the name is normalized the same way as in the setup scripts creating it.
        Ok(request.render(&request.qualified_parts().join(".")))
    }

    fn sample_ddl_constraints(&self) -> Vec<String> {
        // Column `z` is dropped again once all tables exist.
        [
            "CREATE TABLE constraint_primary (z INT, a INT, b STRING, PRIMARY KEY (a))",
            "CREATE TABLE constraint_primary_multi (z INT, a INT, b STRING, PRIMARY KEY (b, a))",
            "CREATE TABLE constraint_primary_multi2 (z INT, a STRING, b INT, PRIMARY KEY (a, b))",
            "CREATE TABLE constraint_foreign (z INT, a INT, b INT, FOREIGN KEY (b) REFERENCES \
            constraint_primary(a))",
            "CREATE TABLE constraint_foreign_multi (z INT, a INT, b INT, c STRING, FOREIGN KEY \
            (c, b) REFERENCES constraint_primary_multi2(a, b))",
            "ALTER TABLE constraint_primary DROP COLUMN z",
            "ALTER TABLE constraint_primary_multi DROP COLUMN z",
            "ALTER TABLE constraint_primary_multi2 DROP COLUMN z",
            "ALTER TABLE constraint_foreign DROP COLUMN z",
            "ALTER TABLE constraint_foreign_multi DROP COLUMN z",
        ]
        .into_iter()
        .map(str::to_owned)
        .collect()
    }
}

/// Snowflake error codes signaling a missing or inaccessible object.
const OBJECT_NOT_FOUND_CODES: [&str; 2] = ["002043", "002003"];

const OBJECT_NOT_FOUND_PHRASES: [&str; 2] =
    ["object does not exist", "does not exist or not authorized"];

/// Quirks of the Snowflake driver from the ADBC Driver Foundry.
///
/// Identifiers are quoted, so they keep their case. Error messages carry the Snowflake error code,
/// but usually not the name of the missing table.
pub struct SnowflakeFoundryQuirks {
    features: DriverFeatures,
    setup: DriverSetup,
}

impl SnowflakeFoundryQuirks {
    pub fn new() -> Self {
        Self {
            features: snowflake_features(),
            setup: DriverSetup::new()
                .with_database_option("uri", ConfigValue::from_env("SNOWFLAKE_URI")),
        }
    }
}

impl Default for SnowflakeFoundryQuirks {
    fn default() -> Self {
        Self::new()
    }
}

impl DriverQuirks for SnowflakeFoundryQuirks {
    fn name(&self) -> &str {
        "snowflake_foundry"
    }

    fn driver(&self) -> &str {
        "snowflake"
    }

    fn driver_name(&self) -> &str {
        "ADBC Driver Foundry Driver for Snowflake"
    }

    fn vendor_name(&self) -> &str {
        "Snowflake"
    }

    fn vendor_version(&self) -> &str {
        "unknown"
    }

    fn short_version(&self) -> &str {
        "snowflake"
    }

    fn features(&self) -> &DriverFeatures {
        &self.features
    }

    fn setup(&self) -> &DriverSetup {
        &self.setup
    }

    fn is_table_not_found(&self, _table_name: Option<&str>, error: &dyn Display) -> bool {
        let message = error.to_string().to_lowercase();
        OBJECT_NOT_FOUND_CODES
            .iter()
            .chain(OBJECT_NOT_FOUND_PHRASES.iter())
            .any(|needle| message.contains(needle))
    }

    fn quote_one_identifier(&self, identifier: &str) -> String {
        quote_with_double_quotes(identifier)
    }

    fn split_statement(&self, statement: &str) -> Result<Vec<String>, Error> {
        split_statement(statement, Some("snowflake"))
    }
}
