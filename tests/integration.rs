use std::collections::HashMap;

use adbc_validation_quirks::{
    DriverContext, DriverQuirks, DropTable, Error, Feature, QUIRKS, SnowflakeFoundryQuirks,
    SnowflakeQuirks, XdbcField, arrow::datatypes::DataType, find_quirks, load_queries,
    shared_queries_path, xdbc_schema,
};
use lazy_static::lazy_static;
use stdext::function_name;

// Quirks are shared between tests, the same way the validation suite shares the registered ones.
lazy_static! {
    static ref GO: SnowflakeQuirks = SnowflakeQuirks::new();
    static ref FOUNDRY: SnowflakeFoundryQuirks = SnowflakeFoundryQuirks::new();
}

/// Environment of a fully configured Snowflake test run.
fn snowflake_env() -> HashMap<&'static str, &'static str> {
    [
        ("SNOWFLAKE_DATABASE", "VALIDATION"),
        ("SNOWFLAKE_SCHEMA", "PUBLIC"),
        ("SNOWFLAKE_SECONDARY_SCHEMA", "SECONDARY"),
        ("SNOWFLAKE_USERNAME", "tester"),
        ("SNOWFLAKE_PASSWORD", "My@Test@Password1"),
        ("SNOWFLAKE_AUTH_TYPE", "auth_snowflake"),
        ("SNOWFLAKE_ACCOUNT", "xy12345"),
        ("SNOWFLAKE_WAREHOUSE", "COMPUTE_WH"),
        ("SNOWFLAKE_ROLE", "SYSADMIN"),
        ("SNOWFLAKE_URI", "snowflake://tester@xy12345/VALIDATION"),
    ]
    .into_iter()
    .collect()
}

/// Name of the test without its module path. Used as a unique table name.
macro_rules! table_name {
    () => {
        function_name!().rsplit_once(':').unwrap().1
    };
}

#[test]
fn go_quote_one_identifier_is_identity() {
    for identifier in ["t", "MyTable", "with space", "a\"b", ""] {
        assert_eq!(identifier, GO.quote_one_identifier(identifier));
    }
}

#[test]
fn foundry_quote_one_identifier_round_trips() {
    for identifier in ["t", "MyTable", "a\"b", "\"\"", ""] {
        let quoted = FOUNDRY.quote_one_identifier(identifier);

        assert!(quoted.starts_with('"') && quoted.ends_with('"') && quoted.len() >= 2);
        let inner = &quoted[1..quoted.len() - 1];
        assert_eq!(
            identifier.matches('"').count() * 2,
            inner.matches('"').count()
        );
        assert_eq!(identifier, inner.replace("\"\"", "\""));
    }
}

#[test]
fn go_drop_table() -> Result<(), Error> {
    assert_eq!("DROP TABLE IF EXISTS t", GO.drop_table(&DropTable::new("t"))?);
    assert_eq!(
        "DROP TABLE IF EXISTS c.s.t",
        GO.drop_table(&DropTable::new("t").schema("s").catalog("c"))?
    );
    assert_eq!(
        "DROP TABLE t",
        GO.drop_table(&DropTable::new("t").if_exists(false))?
    );
    Ok(())
}

#[test]
fn go_drop_table_uses_name_as_is() -> Result<(), Error> {
    let table_name = table_name!();

    let sql = GO.drop_table(&DropTable::new(table_name).schema("PUBLIC"))?;

    assert_eq!(format!("DROP TABLE IF EXISTS PUBLIC.{table_name}"), sql);
    Ok(())
}

#[test]
fn go_drop_temporary_table_is_not_implemented() {
    let result = GO.drop_table(&DropTable::new("t").temporary(true));

    assert!(matches!(result, Err(Error::NotImplemented { .. })));
}

#[test]
fn go_is_table_not_found() {
    assert!(GO.is_table_not_found(Some("T1"), &"Table T1 does not exist"));
    assert!(!GO.is_table_not_found(Some("T2"), &"Table T1 does not exist"));
}

#[test]
fn go_is_table_not_found_with_driver_error() {
    let table_name = table_name!();
    let error = anyhow::anyhow!(
        "002003 (42S02): SQL compilation error:\nTable '{}' does not exist or not authorized.",
        table_name.to_uppercase()
    );

    assert!(GO.is_table_not_found(Some(table_name), &error));
}

#[test]
fn foundry_is_table_not_found() {
    assert!(FOUNDRY.is_table_not_found(
        None,
        &"SQL execution error: 002043: object does not exist"
    ));
    assert!(!FOUNDRY.is_table_not_found(None, &"SQL execution error: permission denied"));
}

#[test]
fn go_sample_ddl_constraints() -> Result<(), Error> {
    let ddl = GO.sample_ddl_constraints();

    assert_eq!(10, ddl.len());
    assert_eq!(
        "CREATE TABLE constraint_primary (z INT, a INT, b STRING, PRIMARY KEY (a))",
        ddl[0]
    );
    assert_eq!(
        "CREATE TABLE constraint_foreign_multi (z INT, a INT, b INT, c STRING, FOREIGN KEY (c, b) \
        REFERENCES constraint_primary_multi2(a, b))",
        ddl[4]
    );
    assert!(ddl[..5].iter().all(|sql| sql.starts_with("CREATE TABLE ")));
    assert!(ddl[5..].iter().all(|sql| sql.starts_with("ALTER TABLE ") && sql.ends_with(" DROP COLUMN z")));
    // Each statement is well formed and stands on its own
    for sql in &ddl {
        assert_eq!(vec![sql.clone()], GO.split_statement(sql)?);
    }
    Ok(())
}

#[test]
fn registry_selects_by_name_or_driver() {
    assert_eq!(2, QUIRKS.len());
    assert_eq!(
        "ADBC Snowflake Driver - Go",
        find_quirks("snowflake").unwrap().driver_name()
    );
    assert_eq!(
        "snowflake_foundry",
        find_quirks("snowflake_foundry").unwrap().name()
    );
    assert_eq!(
        "snowflake",
        find_quirks("adbc_driver_snowflake").unwrap().name()
    );
    assert!(find_quirks("postgresql").is_none());
}

#[test]
fn resolve_context_once() -> Result<(), Error> {
    let env = snowflake_env();
    let lookup = |name: &str| env.get(name).map(|value| value.to_string());

    let context = DriverContext::resolve(&*GO, &lookup)?;

    assert_eq!(Some("VALIDATION"), context.current_catalog.as_deref());
    assert_eq!(Some("SECONDARY"), context.secondary_schema.as_deref());
    assert_eq!(None, context.secondary_catalog);
    assert_eq!("xy12345", context.setup.database["adbc.snowflake.sql.account"]);
    assert_eq!(8, context.setup.database.len());
    assert!(context.setup.connection.is_empty());
    assert!(context.setup.statement.is_empty());
    Ok(())
}

#[test]
fn resolve_context_without_credentials() {
    let mut env = snowflake_env();
    env.remove("SNOWFLAKE_URI");
    let lookup = |name: &str| env.get(name).map(|value| value.to_string());

    let result = DriverContext::resolve(&*FOUNDRY, &lookup);

    assert!(
        matches!(result, Err(Error::MissingEnvironmentVariable { name }) if name == "SNOWFLAKE_URI")
    );
}

#[test]
fn features_decide_which_tests_run() {
    for quirks in QUIRKS.iter() {
        let features = quirks.features();
        assert!(features.supports(Feature::StatementBulkIngest));
        assert!(!features.supports(Feature::StatementBulkIngestTemporary));
        assert!(!features.supports(Feature::StatementPrepare));
        assert!(features.supports_key("get_objects_constraints_primary").unwrap());
    }
}

#[test]
fn xdbc_schema_of_snowflake() {
    let schema = xdbc_schema(&GO.features().supported_xdbc_fields);

    assert_eq!(10, schema.fields().len());
    assert_eq!(
        &DataType::Int16,
        schema.field_with_name("xdbc_data_type").unwrap().data_type()
    );
    assert_eq!(
        &DataType::Utf8,
        schema.field_with_name("xdbc_is_nullable").unwrap().data_type()
    );
    assert!(schema.field_with_name(XdbcField::ScopeTable.name()).is_err());
}

#[test]
fn shared_queries_are_found() -> anyhow::Result<()> {
    assert_eq!(vec![shared_queries_path()], GO.queries_paths());

    let queries = load_queries(&*GO)?;

    let names: Vec<&str> = queries.iter().map(|query| query.name.as_str()).collect();
    assert_eq!(
        vec!["ingest.string", "type.select.int32", "type.select.string"],
        names
    );
    let string = &queries[2];
    assert_eq!(
        "SELECT res FROM test_string ORDER BY idx ASC",
        string.sql()?.trim()
    );
    let setup = string.setup_statements(&*GO)?;
    assert_eq!(3, setup.len());
    assert!(setup[2].contains("'foo;bar'"));
    assert!(queries[0].setup_statements(&*GO)?.is_empty());
    Ok(())
}
