/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of every long-running operation name.
pub const OPERATION_PREFIX: &str = "operations/";

/// Error an operation finished with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// A long-running operation, as returned by an async trigger.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    /// `operations/{id}`
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub response: Option<Value>,
    #[serde(default)]
    pub error: Option<OperationError>,
}

impl Operation {
    /// The id part of the name, as used in `GET operations/{id}`.
    pub fn id(&self) -> &str {
        self.name
            .strip_prefix(OPERATION_PREFIX)
            .unwrap_or(&self.name)
    }

    /// Outputs of a finished trigger, if the operation carries them.
    pub fn outputs(&self) -> Option<&Vec<Value>> {
        self.response
            .as_ref()
            .and_then(|r| r.get("outputs"))
            .and_then(Value::as_array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    /// Verifies a finished operation exposes its id and trigger outputs.
    fn test_finished_operation() {
        let op: Operation = serde_json::from_value(json!({
            "name": "operations/8f1c",
            "done": true,
            "response": {
                "@type": "type.googleapis.com/vdp.pipeline.v1beta.TriggerUserPipelineResponse",
                "outputs": [{"answer": "hello"}]
            }
        }))
        .unwrap();

        assert_eq!(op.id(), "8f1c");
        assert_eq!(op.outputs().map(Vec::len), Some(1));
        assert!(op.error.is_none());

        let pending = Operation {
            name: "operations/8f1c".to_string(),
            ..Default::default()
        };
        assert!(!pending.done);
        assert!(pending.outputs().is_none());
    }
}
