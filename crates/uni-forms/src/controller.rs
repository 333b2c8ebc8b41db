use serde_json::{Map, Value};

use crate::draft::Draft;
use crate::error::ValidationErrors;

/// A form for one kind of record.
///
/// Implementors supply the draft, the validation pass, and the full create
/// body; updates are derived from the create body by keeping only changed
/// fields.
pub trait FormController {
    /// Resource name, used in log fields.
    const ENTITY: &'static str;

    fn draft(&self) -> &Draft;

    fn draft_mut(&mut self) -> &mut Draft;

    /// # Errors
    ///
    /// Returns every invalid field with a user-facing message.
    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Request body for creating the record, with values coerced to the
    /// types the backend expects. Meaningful only after [`validate`](Self::validate)
    /// succeeds.
    fn payload(&self) -> Map<String, Value>;

    /// Payload fields that may not change once the record exists.
    fn fixed_on_update(&self) -> &'static [&'static str] {
        &[]
    }

    /// Payload fields that are sent whenever `field` changes.
    fn linked_fields(&self, _field: &str) -> &'static [&'static str] {
        &[]
    }

    fn set(&mut self, field: &str, value: impl Into<String>) {
        self.draft_mut().set(field, value);
    }

    /// Partial body holding only the fields the user changed.
    fn changes(&self) -> Map<String, Value> {
        let draft = self.draft();
        let fixed = self.fixed_on_update();
        let mut wanted: Vec<&str> = Vec::new();
        for field in draft.changed_fields() {
            wanted.push(field);
            wanted.extend_from_slice(self.linked_fields(field));
        }

        self.payload()
            .into_iter()
            .filter(|(key, _)| wanted.contains(&key.as_str()) && !fixed.contains(&key.as_str()))
            .collect()
    }

    /// Validate, then build the create body.
    ///
    /// # Errors
    ///
    /// Returns the validation errors when the draft is invalid.
    fn submit(&self) -> Result<Value, ValidationErrors> {
        self.validate().inspect_err(|errors| {
            tracing::debug!(entity = Self::ENTITY, %errors, "form rejected");
        })?;
        Ok(Value::Object(self.payload()))
    }

    /// Validate, then build the update body.
    ///
    /// # Errors
    ///
    /// Returns the validation errors when the draft is invalid.
    fn submit_changes(&self) -> Result<Value, ValidationErrors> {
        self.validate().inspect_err(|errors| {
            tracing::debug!(entity = Self::ENTITY, %errors, "form rejected");
        })?;
        Ok(Value::Object(self.changes()))
    }
}
