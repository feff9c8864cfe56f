//! Output schemas derived from Rust types and enforced locally.

use std::fmt;

use schemars::JsonSchema;
use serde_json::Value;

use crate::error::{ForgeError, GenerationFailure};

/// A JSON Schema bound to a name, with a compiled validator.
///
/// The same schema is sent to the provider and checked against the reply, so
/// a provider that ignores the constraint is caught here rather than trusted.
pub struct OutputSchema {
    name: String,
    schema: Value,
    validator: jsonschema::Validator,
}

impl fmt::Debug for OutputSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputSchema")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl OutputSchema {
    /// Derive the schema of `T` with `schemars`.
    pub fn for_type<T: JsonSchema>() -> Result<Self, ForgeError> {
        let schema = serde_json::to_value(schemars::schema_for!(T))?;
        Self::new(T::schema_name(), schema)
    }

    /// Wrap a hand-written schema.
    pub fn new(name: impl Into<String>, schema: Value) -> Result<Self, ForgeError> {
        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| ForgeError::InvalidArgument(format!("invalid output schema: {e}")))?;
        Ok(Self {
            name: name.into(),
            schema,
            validator,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Check `instance` against the schema, collecting every violation.
    pub fn validate(&self, instance: &Value) -> Result<(), Vec<String>> {
        let errors: Vec<String> = self
            .validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate `instance` and turn a failure into a [`GenerationFailure`].
    pub fn check(&self, instance: &Value, raw: &str) -> Result<(), GenerationFailure> {
        self.validate(instance)
            .map_err(|errors| GenerationFailure::SchemaViolation {
                errors,
                raw: raw.to_string(),
            })
    }
}
