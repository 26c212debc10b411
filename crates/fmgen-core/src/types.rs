//! Java type mappings for remote type tags.
//!
//! # Type Mappings
//!
//! | Tag | Java attribute | Constructor parameter |
//! |-----|----------------|-----------------------|
//! | `CHAR`, `STRING` | `String` | `String` |
//! | `DATE`, `TIME` | `Date` | `Date` |
//! | `NUM` | `Long` | `Long` |
//! | `BCD` | `BigDecimal` | `BigDecimal` |
//! | `INT` | `Integer` | `Integer` |
//! | `STRUCTURE` | generated class | `JCoStructure` |
//! | `TABLE` | `List<generated class>` | `JCoTable` |
//!
//! Every tag the schema layer accepts has a mapping; unknown tags are
//! rejected as [`SchemaError`](crate::SchemaError) before they get here.

use crate::schema::TypeTag;

/// Record type the remote library exposes for structure values
pub const STRUCTURE_RECORD: &str = "JCoStructure";

/// Record type the remote library exposes for table values
pub const TABLE_RECORD: &str = "JCoTable";

/// Simple type names a generated parameter class refers to. A nested class
/// with one of these names would shadow the import.
pub const RESERVED_TYPE_NAMES: [&str; 10] = [
    "String",
    "Date",
    "Long",
    "Integer",
    "BigDecimal",
    "List",
    "ArrayList",
    "Serializable",
    STRUCTURE_RECORD,
    TABLE_RECORD,
];

/// Java scalar types a leaf field can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Date,
    /// 64-bit integer
    Long,
    /// Arbitrary-precision decimal
    BigDecimal,
    /// 32-bit integer
    Integer,
}

impl ScalarType {
    pub fn java_name(&self) -> &'static str {
        match self {
            ScalarType::String => "String",
            ScalarType::Date => "Date",
            ScalarType::Long => "Long",
            ScalarType::BigDecimal => "BigDecimal",
            ScalarType::Integer => "Integer",
        }
    }

    fn import(&self) -> Option<&'static str> {
        match self {
            ScalarType::Date => Some("java.util.Date"),
            ScalarType::BigDecimal => Some("java.math.BigDecimal"),
            _ => None,
        }
    }
}

/// Java type of a generated attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetType {
    Scalar(ScalarType),
    /// Generated class for a structure field
    Class(String),
    /// Ordered collection of a generated class, for a table field
    List(String),
}

impl TargetType {
    /// Attribute and getter type (`String`, `Header`, `List<Item>`)
    pub fn java_type(&self) -> String {
        match self {
            TargetType::Scalar(scalar) => scalar.java_name().to_string(),
            TargetType::Class(name) => name.clone(),
            TargetType::List(name) => format!("List<{name}>"),
        }
    }

    /// Constructor parameter type: the record shape the remote library hands
    /// over, converted to the generated class inside the constructor
    pub fn parameter_type(&self) -> &str {
        match self {
            TargetType::Scalar(scalar) => scalar.java_name(),
            TargetType::Class(_) => STRUCTURE_RECORD,
            TargetType::List(_) => TABLE_RECORD,
        }
    }

    /// Fully qualified imports a class declaring this attribute needs
    pub fn imports(&self) -> Vec<&'static str> {
        match self {
            TargetType::Scalar(scalar) => scalar.import().into_iter().collect(),
            TargetType::Class(_) => vec!["com.sap.conn.jco.JCoStructure"],
            TargetType::List(_) => vec![
                "com.sap.conn.jco.JCoTable",
                "java.util.ArrayList",
                "java.util.List",
            ],
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, TargetType::List(_))
    }
}

/// Scalar mapping for a leaf tag; `None` for structure and table
pub fn scalar_type(tag: TypeTag) -> Option<ScalarType> {
    match tag {
        TypeTag::Char | TypeTag::String => Some(ScalarType::String),
        TypeTag::Date | TypeTag::Time => Some(ScalarType::Date),
        TypeTag::Num => Some(ScalarType::Long),
        TypeTag::Bcd => Some(ScalarType::BigDecimal),
        TypeTag::Int => Some(ScalarType::Integer),
        TypeTag::Structure | TypeTag::Table => None,
    }
}

/// Map a tag to its Java type.
///
/// `class_name` supplies the generated class for structure and table tags
/// and is not called for leaves.
pub fn map_type(tag: TypeTag, class_name: impl FnOnce() -> String) -> TargetType {
    match (tag, scalar_type(tag)) {
        (_, Some(scalar)) => TargetType::Scalar(scalar),
        (TypeTag::Table, None) => TargetType::List(class_name()),
        (_, None) => TargetType::Class(class_name()),
    }
}
