//! Schema model for a remote function module signature.
//!
//! # Structure
//!
//! - [`FieldSchema`]: one node of a parameter tree (scalar, structure or table)
//! - [`ParameterGroup`]: the top-level fields of one of the four [`GroupKind`]s
//! - [`GenerationRequest`]: everything one run needs, validated on construction
//! - [`SchemaDocument`]: the JSON form a schema collaborator hands over
//!
//! # Document format
//!
//! ```json
//! {
//!   "function": "BAPI_MATERIAL_GET",
//!   "import": [
//!     { "name": "MATERIAL", "type": "CHAR", "length": 18, "description": "Material number" },
//!     { "name": "HEADER", "type": "STRUCTURE", "fields": [
//!         { "name": "PLANT", "type": "CHAR", "length": 4 }
//!     ] }
//!   ],
//!   "tables": [
//!     { "name": "ITEMS", "type": "TABLE", "fields": [
//!         { "name": "POSNR", "type": "NUM", "length": 6 }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Nodes are validated with an explicit work stack, so a hostile document
//! cannot exhaust the native stack; depth is capped by `max_depth`.

use crate::error::SchemaError;
use crate::naming;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Remote type tag of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Char,
    Date,
    String,
    Num,
    Bcd,
    Int,
    Time,
    Structure,
    Table,
}

impl TypeTag {
    /// Parse the remote system's tag name (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CHAR" => Some(TypeTag::Char),
            "DATE" => Some(TypeTag::Date),
            "STRING" => Some(TypeTag::String),
            "NUM" => Some(TypeTag::Num),
            "BCD" => Some(TypeTag::Bcd),
            "INT" => Some(TypeTag::Int),
            "TIME" => Some(TypeTag::Time),
            "STRUCTURE" => Some(TypeTag::Structure),
            "TABLE" => Some(TypeTag::Table),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Char => "CHAR",
            TypeTag::Date => "DATE",
            TypeTag::String => "STRING",
            TypeTag::Num => "NUM",
            TypeTag::Bcd => "BCD",
            TypeTag::Int => "INT",
            TypeTag::Time => "TIME",
            TypeTag::Structure => "STRUCTURE",
            TypeTag::Table => "TABLE",
        }
    }

    /// Structure and table nodes carry child fields; every other tag is a leaf
    pub fn is_nested(&self) -> bool {
        matches!(self, TypeTag::Structure | TypeTag::Table)
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a parameter tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    /// Name in the remote system (`MATERIAL-ID`)
    pub raw_name: String,
    pub description: Option<String>,
    pub type_tag: TypeTag,
    pub length: u32,
    pub decimals: u32,
    /// Ordered child fields; only structure and table nodes have any
    pub children: Vec<FieldSchema>,
}

impl FieldSchema {
    /// A leaf field
    pub fn scalar(raw_name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            raw_name: raw_name.into(),
            description: None,
            type_tag,
            length: 0,
            decimals: 0,
            children: Vec::new(),
        }
    }

    pub fn structure(raw_name: impl Into<String>, children: Vec<FieldSchema>) -> Self {
        Self {
            children,
            ..Self::scalar(raw_name, TypeTag::Structure)
        }
    }

    pub fn table(raw_name: impl Into<String>, children: Vec<FieldSchema>) -> Self {
        Self {
            children,
            ..Self::scalar(raw_name, TypeTag::Table)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_length(mut self, length: u32, decimals: u32) -> Self {
        self.length = length;
        self.decimals = decimals;
        self
    }

    pub fn is_leaf(&self) -> bool {
        !self.type_tag.is_nested()
    }
}

/// The four fixed parameter buckets of a call signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Import,
    Export,
    Changing,
    Table,
}

impl GroupKind {
    /// Fixed processing and parameter-list order
    pub const ALL: [GroupKind; 4] = [
        GroupKind::Import,
        GroupKind::Export,
        GroupKind::Changing,
        GroupKind::Table,
    ];

    /// Suffix appended to the base name to form the group's class name
    pub fn class_suffix(&self) -> &'static str {
        match self {
            GroupKind::Import => "Import",
            GroupKind::Export => "Export",
            GroupKind::Changing => "Changing",
            GroupKind::Table => "Table",
        }
    }

    /// Key of the group in a schema document and root of its schema paths
    pub fn key(&self) -> &'static str {
        match self {
            GroupKind::Import => "import",
            GroupKind::Export => "export",
            GroupKind::Changing => "changing",
            GroupKind::Table => "tables",
        }
    }

    fn index(&self) -> usize {
        match self {
            GroupKind::Import => 0,
            GroupKind::Export => 1,
            GroupKind::Changing => 2,
            GroupKind::Table => 3,
        }
    }
}

/// Top-level fields of one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterGroup {
    pub kind: GroupKind,
    pub fields: Vec<FieldSchema>,
}

impl ParameterGroup {
    pub fn new(kind: GroupKind, fields: Vec<FieldSchema>) -> Self {
        Self { kind, fields }
    }

    pub fn empty(kind: GroupKind) -> Self {
        Self::new(kind, Vec::new())
    }

    /// A group produces output only when it has at least one field
    pub fn is_present(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// Validated input for one generation run.
///
/// Constructed once; nothing in it changes afterwards.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    base_name: String,
    function_name: String,
    output_dir: PathBuf,
    groups: [ParameterGroup; 4],
}

impl GenerationRequest {
    /// Validate `groups` and build a request.
    ///
    /// Groups missing from `groups` are treated as empty; when a kind appears
    /// more than once the last one wins.
    pub fn new(
        base_name: impl Into<String>,
        function_name: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        groups: Vec<ParameterGroup>,
        max_depth: usize,
    ) -> Result<Self, SchemaError> {
        let mut slots = GroupKind::ALL.map(ParameterGroup::empty);
        for group in groups {
            validate_fields(group.kind.key(), &group.fields, max_depth)?;
            let index = group.kind.index();
            slots[index] = group;
        }

        Ok(Self {
            base_name: base_name.into(),
            function_name: function_name.into().trim().to_uppercase(),
            output_dir: output_dir.into(),
            groups: slots,
        })
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Remote function name, trimmed and upper-cased
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn group(&self, kind: GroupKind) -> &ParameterGroup {
        &self.groups[kind.index()]
    }

    /// All four groups in fixed order
    pub fn groups(&self) -> impl Iterator<Item = &ParameterGroup> {
        self.groups.iter()
    }

    /// Generated class name for a group (`<Base><Suffix>`)
    pub fn class_name(&self, kind: GroupKind) -> String {
        format!("{}{}", self.base_name, kind.class_suffix())
    }
}

/// JSON form of a schema handed over by the collaborator that queries the
/// remote system
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub import: Vec<RawField>,
    #[serde(default)]
    pub export: Vec<RawField>,
    #[serde(default)]
    pub changing: Vec<RawField>,
    #[serde(default, alias = "table")]
    pub tables: Vec<RawField>,
}

/// Unvalidated field as it appears in a [`SchemaDocument`]
#[derive(Debug, Clone, Deserialize)]
pub struct RawField {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub length: u32,
    #[serde(default)]
    pub decimals: u32,
    #[serde(default)]
    pub fields: Vec<RawField>,
}

impl SchemaDocument {
    pub fn from_json(source: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(source)?)
    }

    fn raw_group(&self, kind: GroupKind) -> &[RawField] {
        match kind {
            GroupKind::Import => &self.import,
            GroupKind::Export => &self.export,
            GroupKind::Changing => &self.changing,
            GroupKind::Table => &self.tables,
        }
    }

    /// Convert every group to [`FieldSchema`] trees without validating names
    pub fn to_groups(&self) -> Result<Vec<ParameterGroup>, SchemaError> {
        GroupKind::ALL
            .iter()
            .map(|&kind| {
                let fields = convert_fields(kind.key(), self.raw_group(kind))?;
                Ok(ParameterGroup::new(kind, fields))
            })
            .collect()
    }

    /// Convert and validate into a [`GenerationRequest`].
    ///
    /// `function_name` overrides the document's own `function` entry.
    pub fn into_request(
        self,
        base_name: impl Into<String>,
        function_name: Option<String>,
        output_dir: impl Into<PathBuf>,
        max_depth: usize,
    ) -> Result<GenerationRequest, SchemaError> {
        let groups = self.to_groups()?;
        let function = function_name.or(self.function).unwrap_or_default();
        GenerationRequest::new(base_name, function, output_dir, groups, max_depth)
    }
}

/// Schema path of a child node: `parent.NAME`, or `parent[index]` when the
/// name is blank
pub fn child_path(parent: &str, raw_name: &str, index: usize) -> String {
    if raw_name.trim().is_empty() {
        format!("{parent}[{index}]")
    } else {
        format!("{parent}.{}", raw_name.trim())
    }
}

struct ConvertFrame<'a> {
    raw: &'a RawField,
    path: String,
    tag: TypeTag,
    next_child: usize,
    built: Vec<FieldSchema>,
}

/// Post-order conversion of raw trees with an explicit stack
fn convert_fields(root: &str, raws: &[RawField]) -> Result<Vec<FieldSchema>, SchemaError> {
    let mut converted = Vec::with_capacity(raws.len());

    for (index, raw) in raws.iter().enumerate() {
        let mut stack = vec![open_frame(raw, child_path(root, &raw.name, index))?];

        while let Some(top) = stack.last_mut() {
            let raw = top.raw;
            if let Some(child) = raw.fields.get(top.next_child) {
                let path = child_path(&top.path, &child.name, top.next_child);
                top.next_child += 1;
                let frame = open_frame(child, path)?;
                stack.push(frame);
                continue;
            }

            let Some(done) = stack.pop() else { break };
            let node = FieldSchema {
                raw_name: done.raw.name.trim().to_string(),
                description: done.raw.description.clone().filter(|d| !d.trim().is_empty()),
                type_tag: done.tag,
                length: done.raw.length,
                decimals: done.raw.decimals,
                children: done.built,
            };
            match stack.last_mut() {
                Some(parent) => parent.built.push(node),
                None => converted.push(node),
            }
        }
    }

    Ok(converted)
}

fn open_frame(raw: &RawField, path: String) -> Result<ConvertFrame<'_>, SchemaError> {
    let tag = TypeTag::parse(&raw.type_tag).ok_or_else(|| SchemaError::UnknownTypeTag {
        path: path.clone(),
        tag: raw.type_tag.clone(),
    })?;
    Ok(ConvertFrame {
        raw,
        path,
        tag,
        next_child: 0,
        built: Vec::with_capacity(raw.fields.len()),
    })
}

/// Check names, leaf-ness and depth of every node under `root`
fn validate_fields(root: &str, fields: &[FieldSchema], max_depth: usize) -> Result<(), SchemaError> {
    let mut stack: Vec<(&FieldSchema, String, usize)> = fields
        .iter()
        .enumerate()
        .rev()
        .map(|(i, f)| (f, child_path(root, &f.raw_name, i), 1))
        .collect();

    while let Some((field, path, depth)) = stack.pop() {
        if depth > max_depth {
            return Err(SchemaError::TooDeep { path, max_depth });
        }

        naming::to_attribute_name(&field.raw_name, field.type_tag)
            .and_then(|_| naming::to_class_name(&field.raw_name))
            .map_err(|source| SchemaError::InvalidName {
                path: path.clone(),
                source,
            })?;

        if field.is_leaf() && !field.children.is_empty() {
            return Err(SchemaError::UnexpectedChildren {
                path,
                tag: field.type_tag.to_string(),
            });
        }

        for (i, child) in field.children.iter().enumerate().rev() {
            stack.push((child, child_path(&path, &child.raw_name, i), depth + 1));
        }
    }

    Ok(())
}
