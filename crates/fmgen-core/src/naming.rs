//! Naming convention utilities for code generation.
//!
//! Remote function modules name their parameters in upper case with `-`, `_`
//! or `.` between words. This module turns those raw names into Java
//! identifiers.
//!
//! # Conversions
//!
//! | Raw name | Tag | Function | Output |
//! |----------|-----|----------|--------|
//! | `MATERIAL-ID` | `CHAR` | [`to_attribute_name`] | `materialId` |
//! | `ORDER_ITEM` | `TABLE` | [`to_attribute_name`] | `orderItems` |
//! | `ORDER_ITEM` | any | [`to_class_name`] | `OrderItem` |
//! | - | `INT` | [`to_accessor_suffix`] | `Int` |
//!
//! A word that is entirely upper or lower case is title-cased; a word that
//! already mixes cases keeps its interior casing. Re-applying a conversion to
//! its own output therefore only ever changes the first character.

use crate::error::NameError;
use crate::schema::TypeTag;
use crate::types;

const SEPARATORS: [char; 3] = ['-', '_', '.'];

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

/// Derive the Java attribute name for a field.
///
/// `Table` fields get a trailing `s` unless the name already ends in one.
/// Java keywords get a trailing `_`, placed before the plural marker of a
/// table (`CLASS` gives `class_s`, `CLAS` gives `clas_s`).
///
/// # Examples
///
/// ```
/// use fmgen_core::naming::to_attribute_name;
/// use fmgen_core::TypeTag;
///
/// assert_eq!(to_attribute_name("MATERIAL-ID", TypeTag::Char).unwrap(), "materialId");
/// assert_eq!(to_attribute_name("ITEM", TypeTag::Table).unwrap(), "items");
/// assert_eq!(to_attribute_name("CLASS", TypeTag::Char).unwrap(), "class_");
/// ```
pub fn to_attribute_name(raw_name: &str, tag: TypeTag) -> Result<String, NameError> {
    let mut name = decapitalize(&join_words(raw_name)?);

    if is_keyword(&name) {
        name.push('_');
    }
    if tag == TypeTag::Table && !name.ends_with(['s', 'S']) {
        if is_keyword(&format!("{name}s")) {
            name.push('_');
        }
        name.push('s');
    }

    validate(raw_name, name)
}

/// Derive the Java class name for a raw name.
///
/// # Examples
///
/// ```
/// use fmgen_core::naming::to_class_name;
///
/// assert_eq!(to_class_name("ORDER_HEADER").unwrap(), "OrderHeader");
/// assert_eq!(to_class_name("orderHeader").unwrap(), "OrderHeader");
/// ```
pub fn to_class_name(raw_name: &str) -> Result<String, NameError> {
    let name = capitalize(&join_words(raw_name)?);
    validate(raw_name, name)
}

/// Token used to read a value of this type from a record accessor
/// (`record.get<Suffix>("NAME")`).
pub fn to_accessor_suffix(tag: TypeTag) -> &'static str {
    match tag {
        TypeTag::Int => "Int",
        TypeTag::Time => "Time",
        TypeTag::Structure => "Structure",
        TypeTag::Table => "Table",
        scalar => types::scalar_type(scalar).map_or("Object", |ty| ty.java_name()),
    }
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use fmgen_core::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lower-case the first letter of a string.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

fn is_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

fn join_words(raw_name: &str) -> Result<String, NameError> {
    if raw_name.trim().is_empty() {
        return Err(NameError::Empty);
    }

    let joined: String = raw_name
        .trim()
        .split(SEPARATORS)
        .filter(|word| !word.is_empty())
        .map(normalize_word)
        .collect();

    if joined.is_empty() {
        return Err(NameError::NoWords(raw_name.to_string()));
    }
    Ok(joined)
}

fn normalize_word(word: &str) -> String {
    let has_upper = word.chars().any(char::is_uppercase);
    let has_lower = word.chars().any(char::is_lowercase);

    if has_upper && has_lower {
        capitalize(word)
    } else {
        capitalize(&word.to_lowercase())
    }
}

fn validate(raw_name: &str, derived: String) -> Result<String, NameError> {
    let mut chars = derived.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest {
        Ok(derived)
    } else {
        Err(NameError::InvalidIdentifier {
            raw: raw_name.to_string(),
            derived,
        })
    }
}
