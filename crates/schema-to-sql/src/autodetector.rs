//! Autodetector for schema changes.
//!
//! This module compares a previous and a current schema and produces the
//! ordered list of operations that migrates one into the other. Models and
//! attributes are matched by their stable `id`, so a changed name is a
//! rename rather than a drop followed by an add.
//!
//! Emission order:
//!
//! 1. dropped models, in previous order;
//! 2. for each current model, in current order: the model itself if it is
//!    new, otherwise its rename, its dropped attributes (previous order),
//!    then per current attribute an add, or a rename / nullability change /
//!    type change, and finally a unique constraint change.

use tracing::{debug, info};

use crate::operations::SchemaOperation;
use crate::schema::{has_unique_columns_changed, same_bound, Attribute, Model, ModelRef, Schema};

/// Detects schema changes and generates schema operations.
#[derive(Debug, Default)]
pub struct Autodetector;

impl Autodetector {
    /// Creates a new autodetector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compares two schemas and returns the operations needed to transform
    /// `previous` into `current`.
    #[must_use]
    pub fn diff(&self, previous: &Schema, current: &Schema) -> Vec<SchemaOperation> {
        let mut operations = Vec::new();

        for model in &previous.models {
            if current.find_model_by_id(&model.id).is_none() {
                debug!(model = %model.name, "Model dropped");
                operations.push(SchemaOperation::model_dropped(&model.name));
            }
        }

        for model in &current.models {
            match previous.find_model_by_id(&model.id) {
                None => {
                    debug!(model = %model.name, "Model added");
                    operations.push(SchemaOperation::model_added(model.clone()));
                }
                Some(previous_model) => {
                    operations.extend(self.diff_model(previous_model, model));
                }
            }
        }

        info!(
            previous_models = previous.models.len(),
            current_models = current.models.len(),
            operations = operations.len(),
            "Schema diff complete"
        );
        operations
    }

    /// Compares two versions of the same model.
    fn diff_model(&self, previous: &Model, current: &Model) -> Vec<SchemaOperation> {
        let mut operations = Vec::new();
        let model_ref = current.to_ref();

        if previous.name != current.name {
            debug!(from = %previous.name, to = %current.name, "Model renamed");
            operations.push(SchemaOperation::model_name_changed(
                &previous.name,
                &current.name,
            ));
        }

        for attribute in &previous.attributes {
            if current.find_attribute_by_id(&attribute.id).is_none() {
                debug!(model = %current.name, attribute = %attribute.name, "Attribute dropped");
                operations.push(SchemaOperation::attribute_dropped(
                    model_ref.clone(),
                    attribute.to_ref(),
                ));
            }
        }

        for attribute in &current.attributes {
            match previous.find_attribute_by_id(&attribute.id) {
                None => {
                    debug!(model = %current.name, attribute = %attribute.name, "Attribute added");
                    operations.push(SchemaOperation::attribute_added(
                        model_ref.clone(),
                        attribute.clone(),
                    ));
                }
                Some(previous_attribute) => {
                    operations.extend(self.diff_attribute(&model_ref, previous_attribute, attribute));
                }
            }
        }

        if has_unique_columns_changed(previous, current) {
            debug!(model = %current.name, "Unique constraints changed");
            operations.push(SchemaOperation::UniqueConstraintsChanged {
                model: current.clone(),
            });
        }

        operations
    }

    /// Compares two versions of the same attribute. Each check fires
    /// independently; the rename always comes first so that later
    /// statements address the column by its current name.
    fn diff_attribute(
        &self,
        model: &ModelRef,
        previous: &Attribute,
        current: &Attribute,
    ) -> Vec<SchemaOperation> {
        let mut operations = Vec::new();

        if previous.name != current.name {
            operations.push(SchemaOperation::attribute_name_changed(
                model.clone(),
                &previous.name,
                &current.name,
            ));
        }

        if previous.is_required != current.is_required {
            operations.push(SchemaOperation::AttributeIsNullChanged {
                model: model.clone(),
                attribute: current.clone(),
            });
        }

        if previous.attribute_type != current.attribute_type
            || !same_bound(previous.min.as_ref(), current.min.as_ref())
            || !same_bound(previous.max.as_ref(), current.max.as_ref())
        {
            operations.push(SchemaOperation::AttributeModified {
                model: model.clone(),
                attribute: current.clone(),
            });
        }

        if !operations.is_empty() {
            debug!(
                model = %model.name,
                attribute = %current.name,
                changes = operations.len(),
                "Attribute changed"
            );
        }
        operations
    }
}

/// Compares two schemas with a default [`Autodetector`].
#[must_use]
pub fn diff(previous: &Schema, current: &Schema) -> Vec<SchemaOperation> {
    Autodetector::new().diff(previous, current)
}
