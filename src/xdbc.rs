use std::{fmt, str::FromStr};

use arrow::datatypes::{DataType as ArrowDataType, Field, Schema};

use crate::Error;

/// Columns of the ADBC `GetObjects` column schema mirroring the column descriptors of ODBC
/// `SQLColumns`. Drivers are free to leave any of them null, so the validation suite only checks
/// those a driver claims to support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum XdbcField {
    DataType,
    TypeName,
    ColumnSize,
    DecimalDigits,
    NumPrecRadix,
    Nullable,
    ColumnDef,
    SqlDataType,
    DatetimeSub,
    CharOctetLength,
    IsNullable,
    ScopeCatalog,
    ScopeSchema,
    ScopeTable,
    IsAutoincrement,
    IsGeneratedcolumn,
}

impl XdbcField {
    /// All fields in the order they appear in the `GetObjects` column schema.
    pub const ALL: [XdbcField; 16] = [
        XdbcField::DataType,
        XdbcField::TypeName,
        XdbcField::ColumnSize,
        XdbcField::DecimalDigits,
        XdbcField::NumPrecRadix,
        XdbcField::Nullable,
        XdbcField::ColumnDef,
        XdbcField::SqlDataType,
        XdbcField::DatetimeSub,
        XdbcField::CharOctetLength,
        XdbcField::IsNullable,
        XdbcField::ScopeCatalog,
        XdbcField::ScopeSchema,
        XdbcField::ScopeTable,
        XdbcField::IsAutoincrement,
        XdbcField::IsGeneratedcolumn,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            XdbcField::DataType => "xdbc_data_type",
            XdbcField::TypeName => "xdbc_type_name",
            XdbcField::ColumnSize => "xdbc_column_size",
            XdbcField::DecimalDigits => "xdbc_decimal_digits",
            XdbcField::NumPrecRadix => "xdbc_num_prec_radix",
            XdbcField::Nullable => "xdbc_nullable",
            XdbcField::ColumnDef => "xdbc_column_def",
            XdbcField::SqlDataType => "xdbc_sql_data_type",
            XdbcField::DatetimeSub => "xdbc_datetime_sub",
            XdbcField::CharOctetLength => "xdbc_char_octet_length",
            XdbcField::IsNullable => "xdbc_is_nullable",
            XdbcField::ScopeCatalog => "xdbc_scope_catalog",
            XdbcField::ScopeSchema => "xdbc_scope_schema",
            XdbcField::ScopeTable => "xdbc_scope_table",
            XdbcField::IsAutoincrement => "xdbc_is_autoincrement",
            XdbcField::IsGeneratedcolumn => "xdbc_is_generatedcolumn",
        }
    }

    /// Arrow type of the column, as laid out in the ADBC column schema.
    pub fn data_type(self) -> ArrowDataType {
        match self {
            XdbcField::DataType
            | XdbcField::DecimalDigits
            | XdbcField::NumPrecRadix
            | XdbcField::Nullable
            | XdbcField::SqlDataType
            | XdbcField::DatetimeSub => ArrowDataType::Int16,
            XdbcField::ColumnSize | XdbcField::CharOctetLength => ArrowDataType::Int32,
            XdbcField::TypeName
            | XdbcField::ColumnDef
            | XdbcField::IsNullable
            | XdbcField::ScopeCatalog
            | XdbcField::ScopeSchema
            | XdbcField::ScopeTable => ArrowDataType::Utf8,
            XdbcField::IsAutoincrement | XdbcField::IsGeneratedcolumn => ArrowDataType::Boolean,
        }
    }

    /// Every xdbc column is nullable.
    pub fn field(self) -> Field {
        Field::new(self.name(), self.data_type(), true)
    }
}

impl fmt::Display for XdbcField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for XdbcField {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        XdbcField::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| Error::UnknownXdbcField {
                name: name.to_owned(),
            })
    }
}

/// Arrow schema of the xdbc columns the validation suite compares for a driver. Fields appear in
/// column schema order, independent of the order in `supported`, duplicates are ignored.
///
/// ```
/// use adbc_validation_quirks::{xdbc_schema, XdbcField, arrow::datatypes::DataType};
///
/// let schema = xdbc_schema(&[XdbcField::TypeName, XdbcField::DataType]);
/// assert_eq!("xdbc_data_type", schema.field(0).name());
/// assert_eq!(&DataType::Utf8, schema.field(1).data_type());
/// ```
pub fn xdbc_schema(supported: &[XdbcField]) -> Schema {
    let fields: Vec<Field> = XdbcField::ALL
        .into_iter()
        .filter(|field| supported.contains(field))
        .map(XdbcField::field)
        .collect();
    Schema::new(fields)
}
