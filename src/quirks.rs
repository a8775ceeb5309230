use std::{fmt::Display, path::PathBuf};

use crate::{DriverFeatures, DriverSetup, Error, split_statement};

/// Location of the SQL fixtures shared by all drivers.
pub fn shared_queries_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("queries")
}

/// Quirks of a database and its ADBC driver the validation suite takes into account.
///
/// Implementations describe in which way a driver deviates from the baseline the suite is written
/// against, so the tests themselves never need to ask "is this Snowflake?". Identity and
/// capabilities are plain data, the provided methods encode the SQL dialect of a baseline driver
/// and are overridden where the vendor differs.
pub trait DriverQuirks: Send + Sync {
    /// Short name used to select the driver, e.g. `snowflake`.
    fn name(&self) -> &str;

    /// Name of the driver package or shared library which is loaded.
    fn driver(&self) -> &str;

    /// Driver name as reported by the driver itself in its info metadata.
    fn driver_name(&self) -> &str;

    fn vendor_name(&self) -> &str;

    /// Vendor version as reported by the driver, or `unknown` if it can not be predicted.
    fn vendor_version(&self) -> &str;

    /// Used to group results of different versions of the same vendor.
    fn short_version(&self) -> &str;

    fn features(&self) -> &DriverFeatures;

    fn setup(&self) -> &DriverSetup;

    /// Directories containing the SQL fixtures run against this driver.
    fn queries_paths(&self) -> Vec<PathBuf> {
        vec![shared_queries_path()]
    }

    /// `true` if `error` signals that a table does not exist. Used to tell an expected missing
    /// table (e.g. while cleaning up before a test) apart from a genuine failure. `table_name` is
    /// `None` if the caller does not know which table is missing.
    fn is_table_not_found(&self, table_name: Option<&str>, error: &dyn Display) -> bool;

    /// Quote a single identifier so it can be embedded into SQL text.
    fn quote_one_identifier(&self, identifier: &str) -> String {
        quote_with_double_quotes(identifier)
    }

    /// Quote each non empty part of a qualified name and join them with `.`.
    fn quote_identifier(&self, parts: &[&str]) -> String {
        parts
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| self.quote_one_identifier(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Split a SQL script into individual statements, which are executed one at a time.
    fn split_statement(&self, statement: &str) -> Result<Vec<String>, Error> {
        split_statement(statement, None)
    }

    /// SQL text dropping a table.
    fn drop_table(&self, request: &DropTable<'_>) -> Result<String, Error> {
        // Temporary tables live in a session specific schema, they can not be qualified.
        let name = if request.temporary {
            self.quote_one_identifier(request.table_name)
        } else {
            self.quote_identifier(&request.qualified_parts())
        };
        Ok(request.render(&name))
    }

    /// Statements creating tables with primary and foreign key constraints. Used to test whether
    /// the constraints are reported by metadata queries.
    fn sample_ddl_constraints(&self) -> Vec<String> {
        let q = |identifier: &str| self.quote_one_identifier(identifier);
        vec![
            format!(
                "CREATE TABLE {} ({} INT, {} VARCHAR(255), PRIMARY KEY ({}))",
                q("constraint_primary"),
                q("a"),
                q("b"),
                q("a")
            ),
            format!(
                "CREATE TABLE {} ({} INT, {} VARCHAR(255), PRIMARY KEY ({}, {}))",
                q("constraint_primary_multi"),
                q("a"),
                q("b"),
                q("b"),
                q("a")
            ),
            format!(
                "CREATE TABLE {} ({} VARCHAR(255), {} INT, PRIMARY KEY ({}, {}))",
                q("constraint_primary_multi2"),
                q("a"),
                q("b"),
                q("a"),
                q("b")
            ),
            format!(
                "CREATE TABLE {} ({} INT, {} INT, FOREIGN KEY ({}) REFERENCES {}({}))",
                q("constraint_foreign"),
                q("a"),
                q("b"),
                q("b"),
                q("constraint_primary"),
                q("a")
            ),
            format!(
                "CREATE TABLE {} ({} INT, {} INT, {} VARCHAR(255), FOREIGN KEY ({}, {}) \
                REFERENCES {}({}, {}))",
                q("constraint_foreign_multi"),
                q("a"),
                q("b"),
                q("c"),
                q("c"),
                q("b"),
                q("constraint_primary_multi2"),
                q("a"),
                q("b")
            ),
        ]
    }
}

/// Quote `identifier` with double quotes, escaping embedded double quotes by doubling them.
///
/// ```
/// use adbc_validation_quirks::quote_with_double_quotes;
///
/// assert_eq!(r#""my ""table""""#, quote_with_double_quotes(r#"my "table""#));
/// ```
pub fn quote_with_double_quotes(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Request for the SQL text of a `DROP TABLE` statement. See [`DriverQuirks::drop_table`].
///
/// ```
/// use adbc_validation_quirks::DropTable;
///
/// let request = DropTable::new("orders").schema("sales").if_exists(false);
/// assert_eq!(vec!["sales", "orders"], request.qualified_parts());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropTable<'a> {
    pub table_name: &'a str,
    pub schema_name: Option<&'a str>,
    pub catalog_name: Option<&'a str>,
    /// Emit `IF EXISTS`. Default is `true`.
    pub if_exists: bool,
    pub temporary: bool,
}

impl<'a> DropTable<'a> {
    pub fn new(table_name: &'a str) -> Self {
        Self {
            table_name,
            schema_name: None,
            catalog_name: None,
            if_exists: true,
            temporary: false,
        }
    }

    pub fn schema(mut self, schema_name: &'a str) -> Self {
        self.schema_name = Some(schema_name);
        self
    }

    pub fn catalog(mut self, catalog_name: &'a str) -> Self {
        self.catalog_name = Some(catalog_name);
        self
    }

    pub fn if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    pub fn temporary(mut self, temporary: bool) -> Self {
        self.temporary = temporary;
        self
    }

    /// Catalog, schema and table name, skipping parts which are missing or empty.
    pub fn qualified_parts(&self) -> Vec<&'a str> {
        [self.catalog_name, self.schema_name, Some(self.table_name)]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect()
    }

    /// `DROP TABLE` statement for an already quoted and qualified `name`.
    pub fn render(&self, name: &str) -> String {
        if self.if_exists {
            format!("DROP TABLE IF EXISTS {name}")
        } else {
            format!("DROP TABLE {name}")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Display;

    use super::{DriverQuirks, DropTable, quote_with_double_quotes};
    use crate::{DriverFeatures, DriverSetup};

    /// Driver without any overrides, so we can observe the provided behaviour.
    struct Baseline {
        features: DriverFeatures,
        setup: DriverSetup,
    }

    impl Baseline {
        fn new() -> Self {
            Self {
                features: DriverFeatures::default(),
                setup: DriverSetup::new(),
            }
        }
    }

    impl DriverQuirks for Baseline {
        fn name(&self) -> &str {
            "baseline"
        }

        fn driver(&self) -> &str {
            "adbc_driver_baseline"
        }

        fn driver_name(&self) -> &str {
            "Baseline"
        }

        fn vendor_name(&self) -> &str {
            "Baseline"
        }

        fn vendor_version(&self) -> &str {
            "unknown"
        }

        fn short_version(&self) -> &str {
            "baseline"
        }

        fn features(&self) -> &DriverFeatures {
            &self.features
        }

        fn setup(&self) -> &DriverSetup {
            &self.setup
        }

        fn is_table_not_found(&self, _table_name: Option<&str>, error: &dyn Display) -> bool {
            error.to_string().contains("no such table")
        }
    }

    #[test]
    fn quote_doubles_embedded_quotes() {
        assert_eq!("\"a\"\"b\"", quote_with_double_quotes("a\"b"));
        assert_eq!("\"\"", quote_with_double_quotes(""));
    }

    #[test]
    fn quote_qualified_name_skips_empty_parts() {
        let quirks = Baseline::new();

        assert_eq!("\"c\".\"t\"", quirks.quote_identifier(&["c", "", "t"]));
    }

    #[test]
    fn default_drop_table_quotes_every_part() {
        let quirks = Baseline::new();
        let request = DropTable::new("t").schema("s").catalog("c");

        let sql = quirks.drop_table(&request).unwrap();

        assert_eq!("DROP TABLE IF EXISTS \"c\".\"s\".\"t\"", sql);
    }

    #[test]
    fn default_drop_temporary_table_is_unqualified() {
        let quirks = Baseline::new();
        let request = DropTable::new("t")
            .schema("s")
            .if_exists(false)
            .temporary(true);

        let sql = quirks.drop_table(&request).unwrap();

        assert_eq!("DROP TABLE \"t\"", sql);
    }

    #[test]
    fn default_sample_ddl_constraints_are_quoted() {
        let quirks = Baseline::new();

        let ddl = quirks.sample_ddl_constraints();

        assert_eq!(5, ddl.len());
        assert_eq!(
            "CREATE TABLE \"constraint_primary\" (\"a\" INT, \"b\" VARCHAR(255), \
            PRIMARY KEY (\"a\"))",
            ddl[0]
        );
        assert!(ddl[4].contains("REFERENCES \"constraint_primary_multi2\"(\"a\", \"b\")"));
    }

    #[test]
    fn default_split_uses_generic_dialect() {
        let quirks = Baseline::new();

        let statements = quirks.split_statement("SELECT 1; SELECT 2;").unwrap();

        assert_eq!(vec!["SELECT 1", "SELECT 2"], statements);
    }

    #[test]
    fn qualified_parts_skip_empty_names() {
        let request = DropTable::new("t").schema("").catalog("c");

        assert_eq!(vec!["c", "t"], request.qualified_parts());
    }
}
