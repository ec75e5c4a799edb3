//! Schema representation types.
//!
//! These types describe the logical data model (models with typed
//! attributes) as upstream tooling hands it over in a schema document.
//! Both the diff engine and the dialects read them; nothing in this crate
//! mutates a [`Schema`] once it has been loaded.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::Result;

/// Name of the attribute that acts as a model's primary key.
pub const PRIMARY_KEY_ATTRIBUTE: &str = "id";

/// Opaque identifier for models and attributes.
///
/// Identifiers are stable across schema versions, unlike names, which is
/// what makes rename detection possible. Documents use either JSON numbers
/// or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectId {
    /// Numeric identifier.
    Int(i64),
    /// String identifier.
    Str(String),
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ObjectId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ObjectId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Logical attribute types.
///
/// Kept string-backed: a type name no dialect knows still loads, and is
/// rejected when a dialect tries to map it, so the error can name the
/// attribute and model it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttributeType {
    /// Generated by the data store (e.g. ids).
    AutoGenerated,
    /// Boolean flag.
    Boolean,
    /// Value computed by the application.
    Computed,
    /// Monetary amount.
    Currency,
    /// Calendar date.
    Date,
    /// Date and time without zone.
    Datetime,
    /// Nested document.
    Document,
    /// Whole number.
    Integer,
    /// List of values.
    List,
    /// Geographic location.
    Location,
    /// Decimal number.
    Number,
    /// Bounded string, `max` is the length.
    String,
    /// Unbounded text.
    Text,
    /// Point in time.
    Timestamp,
    /// Reference to another model.
    Reference,
    /// A type name this crate does not know.
    Other(String),
}

impl AttributeType {
    /// Returns the document spelling of this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AutoGenerated => "auto-generated",
            Self::Boolean => "boolean",
            Self::Computed => "computed",
            Self::Currency => "currency",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Document => "document",
            Self::Integer => "integer",
            Self::List => "list",
            Self::Location => "location",
            Self::Number => "number",
            Self::String => "string",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Reference => "reference",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for AttributeType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "auto-generated" => Self::AutoGenerated,
            "boolean" => Self::Boolean,
            "computed" => Self::Computed,
            "currency" => Self::Currency,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            "document" => Self::Document,
            "integer" => Self::Integer,
            "list" => Self::List,
            "location" => Self::Location,
            "number" => Self::Number,
            "string" => Self::String,
            "text" => Self::Text,
            "timestamp" => Self::Timestamp,
            "reference" => Self::Reference,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for AttributeType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<AttributeType> for String {
    fn from(value: AttributeType) -> Self {
        match value {
            AttributeType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logical field on a model; maps to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Stable identifier.
    pub id: ObjectId,
    /// Column name.
    pub name: String,
    /// Logical type.
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    /// Whether the column is NOT NULL.
    #[serde(default)]
    pub is_required: bool,
    /// Whether the column takes part in the model's unique constraint.
    #[serde(default)]
    pub is_unique: bool,
    /// Lower bound (informational, diffed but not rendered).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    /// Upper bound; the length of `string` columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
    /// Default value, rendered as a `DEFAULT` literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl Attribute {
    /// Creates a new optional, non-unique attribute.
    #[must_use]
    pub fn new(
        id: impl Into<ObjectId>,
        name: impl Into<String>,
        attribute_type: impl Into<AttributeType>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attribute_type: attribute_type.into(),
            is_required: false,
            is_unique: false,
            min: None,
            max: None,
            default_value: None,
        }
    }

    /// Marks the attribute as required (NOT NULL).
    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Marks the attribute as unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Sets the lower bound.
    #[must_use]
    pub fn min(mut self, min: impl Into<Number>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Sets the upper bound.
    #[must_use]
    pub fn max(mut self, max: impl Into<Number>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Returns true if this attribute is the model's primary key.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.name == PRIMARY_KEY_ATTRIBUTE
    }

    /// Returns the `{id, name}` handle used by diff operations.
    #[must_use]
    pub fn to_ref(&self) -> AttributeRef {
        AttributeRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// A logical entity; maps to one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Stable identifier.
    pub id: ObjectId,
    /// Table name.
    pub name: String,
    /// Attributes in declaration order.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Model {
    /// Creates a model without attributes.
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute.
    #[must_use]
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Finds an attribute by its stable identifier.
    #[must_use]
    pub fn find_attribute_by_id(&self, id: &ObjectId) -> Option<&Attribute> {
        self.attributes.iter().find(|a| &a.id == id)
    }

    /// Finds an attribute by name.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Returns the primary key attribute, if the model declares one.
    #[must_use]
    pub fn primary_key(&self) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.is_primary_key())
    }

    /// Names of the attributes covered by the unique constraint, in
    /// declaration order. The primary key is never included.
    #[must_use]
    pub fn unique_attribute_names(&self) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|a| !a.is_primary_key() && a.is_unique)
            .map(|a| a.name.as_str())
            .collect()
    }

    /// Returns the `{id, name}` handle used by diff operations.
    #[must_use]
    pub fn to_ref(&self) -> ModelRef {
        ModelRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// The complete logical data model at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Models in declaration order.
    #[serde(default)]
    pub models: Vec<Model>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a model.
    #[must_use]
    pub fn model(mut self, model: Model) -> Self {
        self.models.push(model);
        self
    }

    /// Parses a schema document.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::Serialization`](crate::error::DdlError) when the
    /// document does not have the expected shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a schema document from disk.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read, or a serialization
    /// error if it is not a valid schema document.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Finds a model by its stable identifier.
    #[must_use]
    pub fn find_model_by_id(&self, id: &ObjectId) -> Option<&Model> {
        self.models.iter().find(|m| &m.id == id)
    }

    /// Finds a model by name.
    #[must_use]
    pub fn get_model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Returns model names.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }
}

/// Minimal handle on a model: enough to address its table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRef {
    /// Stable identifier.
    pub id: ObjectId,
    /// Current table name.
    pub name: String,
}

/// Minimal handle on an attribute: enough to address its column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRef {
    /// Stable identifier.
    pub id: ObjectId,
    /// Column name.
    pub name: String,
}

/// Returns true if the set of unique attribute names differs between two
/// versions of a model. Declaration order does not matter.
#[must_use]
pub fn has_unique_columns_changed(previous: &Model, current: &Model) -> bool {
    let previous: BTreeSet<&str> = previous.unique_attribute_names().into_iter().collect();
    let current: BTreeSet<&str> = current.unique_attribute_names().into_iter().collect();
    previous != current
}

/// Returns true if two optional bounds hold the same numeric value, so
/// `100` and `100.0` compare equal.
#[must_use]
pub fn same_bound(previous: Option<&Number>, current: Option<&Number>) -> bool {
    match (previous, current) {
        (None, None) => true,
        (Some(previous), Some(current)) => {
            previous == current || previous.as_f64() == current.as_f64()
        }
        _ => false,
    }
}
