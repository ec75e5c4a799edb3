//! Schema change operations.
//!
//! This module defines every structural change the autodetector can infer
//! between two schema versions. Dialects render each variant to SQL; the
//! enum is closed so that rendering stays exhaustive.

use serde::{Deserialize, Serialize};

use crate::schema::{Attribute, AttributeRef, Model, ModelRef};

/// A single schema change.
///
/// Serializes as `{ "type": "<kind>", "params": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
pub enum SchemaOperation {
    /// A model disappeared; its table is dropped.
    ModelDropped {
        /// Table name in the previous schema.
        name: String,
    },
    /// A new model; its table is created.
    ModelAdded {
        /// The full model.
        model: Model,
    },
    /// A model kept its id but changed its name.
    #[serde(rename_all = "camelCase")]
    ModelNameChanged {
        /// Table name in the previous schema.
        previous_name: String,
        /// Table name in the current schema.
        current_name: String,
    },
    /// A new attribute on an existing model.
    AttributeAdded {
        /// Model the column is added to.
        model: ModelRef,
        /// The full attribute.
        attribute: Attribute,
    },
    /// An attribute disappeared from an existing model.
    AttributeDropped {
        /// Model the column is dropped from.
        model: ModelRef,
        /// The dropped attribute.
        attribute: AttributeRef,
    },
    /// An attribute kept its id but changed its name.
    #[serde(rename_all = "camelCase")]
    AttributeNameChanged {
        /// Model owning the column.
        model: ModelRef,
        /// Column name in the previous schema.
        previous_name: String,
        /// Column name in the current schema.
        current_name: String,
    },
    /// `isRequired` flipped.
    AttributeIsNullChanged {
        /// Model owning the column.
        model: ModelRef,
        /// Current attribute.
        attribute: Attribute,
    },
    /// `type`, `min` or `max` changed.
    AttributeModified {
        /// Model owning the column.
        model: ModelRef,
        /// Current attribute.
        attribute: Attribute,
    },
    /// The set of unique attributes changed.
    UniqueConstraintsChanged {
        /// Current model.
        model: Model,
    },
}

impl SchemaOperation {
    /// Creates a drop model operation.
    #[must_use]
    pub fn model_dropped(name: impl Into<String>) -> Self {
        Self::ModelDropped { name: name.into() }
    }

    /// Creates an add model operation.
    #[must_use]
    pub fn model_added(model: Model) -> Self {
        Self::ModelAdded { model }
    }

    /// Creates a model rename operation.
    #[must_use]
    pub fn model_name_changed(
        previous_name: impl Into<String>,
        current_name: impl Into<String>,
    ) -> Self {
        Self::ModelNameChanged {
            previous_name: previous_name.into(),
            current_name: current_name.into(),
        }
    }

    /// Creates an add attribute operation.
    #[must_use]
    pub fn attribute_added(model: ModelRef, attribute: Attribute) -> Self {
        Self::AttributeAdded { model, attribute }
    }

    /// Creates a drop attribute operation.
    #[must_use]
    pub fn attribute_dropped(model: ModelRef, attribute: AttributeRef) -> Self {
        Self::AttributeDropped { model, attribute }
    }

    /// Creates an attribute rename operation.
    #[must_use]
    pub fn attribute_name_changed(
        model: ModelRef,
        previous_name: impl Into<String>,
        current_name: impl Into<String>,
    ) -> Self {
        Self::AttributeNameChanged {
            model,
            previous_name: previous_name.into(),
            current_name: current_name.into(),
        }
    }

    /// Returns the serialized tag of this operation.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelDropped { .. } => "model-dropped",
            Self::ModelAdded { .. } => "model-added",
            Self::ModelNameChanged { .. } => "model-name-changed",
            Self::AttributeAdded { .. } => "attribute-added",
            Self::AttributeDropped { .. } => "attribute-dropped",
            Self::AttributeNameChanged { .. } => "attribute-name-changed",
            Self::AttributeIsNullChanged { .. } => "attribute-is-null-changed",
            Self::AttributeModified { .. } => "attribute-modified",
            Self::UniqueConstraintsChanged { .. } => "unique-constraints-changed",
        }
    }

    /// Returns the name of the table this operation touches, as it is
    /// called once the operation has been applied.
    #[must_use]
    pub fn table_name(&self) -> &str {
        match self {
            Self::ModelDropped { name } => name,
            Self::ModelAdded { model } | Self::UniqueConstraintsChanged { model } => &model.name,
            Self::ModelNameChanged { current_name, .. } => current_name,
            Self::AttributeAdded { model, .. }
            | Self::AttributeDropped { model, .. }
            | Self::AttributeNameChanged { model, .. }
            | Self::AttributeIsNullChanged { model, .. }
            | Self::AttributeModified { model, .. } => &model.name,
        }
    }

    /// Returns whether applying this operation can lose data.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            Self::ModelDropped { .. } | Self::AttributeDropped { .. } | Self::AttributeModified { .. }
        )
    }
}
