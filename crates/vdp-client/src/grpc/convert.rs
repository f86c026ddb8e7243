/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Conversions between the wire messages and the shared models.
//!
//! `google.protobuf.Struct` payloads map onto `serde_json::Value`. Request
//! messages are built from the same JSON bodies the REST client sends, so
//! both transports accept identical check inputs.

use super::proto;
use chrono::{DateTime, Utc};
use prost::Message;
use prost_types::value::Kind;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use vdp_models as models;

pub fn struct_to_json(s: &prost_types::Struct) -> Value {
    Value::Object(
        s.fields
            .iter()
            .map(|(k, v)| (k.clone(), value_to_json(v)))
            .collect::<Map<String, Value>>(),
    )
}

pub fn value_to_json(v: &prost_types::Value) -> Value {
    match &v.kind {
        None | Some(Kind::NullValue(_)) => Value::Null,
        Some(Kind::BoolValue(b)) => Value::Bool(*b),
        Some(Kind::StringValue(s)) => Value::String(s.clone()),
        Some(Kind::NumberValue(n)) => number_to_json(*n),
        Some(Kind::StructValue(s)) => struct_to_json(s),
        Some(Kind::ListValue(l)) => Value::Array(l.values.iter().map(value_to_json).collect()),
    }
}

/// Protobuf numbers are doubles; integral values come back as integers.
fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Converts a JSON object; anything else yields `None`.
pub fn json_to_struct(v: &Value) -> Option<prost_types::Struct> {
    match v {
        Value::Object(map) => Some(prost_types::Struct {
            fields: map
                .iter()
                .map(|(k, v)| (k.clone(), json_to_value(v)))
                .collect::<BTreeMap<_, _>>(),
        }),
        _ => None,
    }
}

pub fn json_to_value(v: &Value) -> prost_types::Value {
    let kind = match v {
        Value::Null => Kind::NullValue(0),
        Value::Bool(b) => Kind::BoolValue(*b),
        Value::Number(n) => Kind::NumberValue(n.as_f64().unwrap_or_default()),
        Value::String(s) => Kind::StringValue(s.clone()),
        Value::Array(items) => Kind::ListValue(prost_types::ListValue {
            values: items.iter().map(json_to_value).collect(),
        }),
        Value::Object(_) => match json_to_struct(v) {
            Some(s) => Kind::StructValue(s),
            None => Kind::NullValue(0),
        },
    };
    prost_types::Value { kind: Some(kind) }
}

fn timestamp(ts: Option<prost_types::Timestamp>) -> Option<DateTime<Utc>> {
    ts.and_then(|t| DateTime::from_timestamp(t.seconds, u32::try_from(t.nanos).unwrap_or(0)))
}

/// Reads a string field under either spelling.
fn str_field(body: &Value, snake: &str, camel: &str) -> Option<String> {
    body.get(snake)
        .or_else(|| body.get(camel))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn struct_field(body: &Value, key: &str) -> Option<prost_types::Struct> {
    body.get(key).and_then(json_to_struct)
}

/// Field mask paths for an update; falls back to the body's top-level keys.
pub fn field_mask(mask: &[&str], body: &Value) -> prost_types::FieldMask {
    let paths = if mask.is_empty() {
        body.as_object()
            .map(|m| m.keys().map(|k| snake_case(k)).collect())
            .unwrap_or_default()
    } else {
        mask.iter().map(|p| snake_case(p)).collect()
    };
    prost_types::FieldMask { paths }
}

pub fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

///////////////////////////////////////////////////////////////////////////////
// Requests ///////////////////////////////////////////////////////////////////

pub fn connector_from_json(body: &Value, name: Option<String>) -> proto::Connector {
    let id = str_field(body, "id", "id").unwrap_or_default();
    proto::Connector {
        name: name.unwrap_or_default(),
        id,
        connector_definition_name: str_field(
            body,
            "connector_definition_name",
            "connectorDefinitionName",
        )
        .unwrap_or_default(),
        description: str_field(body, "description", "description").unwrap_or_default(),
        configuration: struct_field(body, "configuration"),
        tombstone: body.get("tombstone").and_then(Value::as_bool).unwrap_or(false),
        ..Default::default()
    }
}

pub fn pipeline_from_json(body: &Value, name: Option<String>) -> proto::Pipeline {
    proto::Pipeline {
        name: name.unwrap_or_default(),
        id: str_field(body, "id", "id").unwrap_or_default(),
        description: str_field(body, "description", "description"),
        recipe: struct_field(body, "recipe"),
        raw_recipe: str_field(body, "raw_recipe", "rawRecipe").unwrap_or_default(),
        display_name: str_field(body, "display_name", "displayName"),
        ..Default::default()
    }
}

pub fn release_from_json(body: &Value) -> proto::PipelineRelease {
    proto::PipelineRelease {
        id: str_field(body, "id", "id").unwrap_or_default(),
        description: str_field(body, "description", "description"),
        ..Default::default()
    }
}

///////////////////////////////////////////////////////////////////////////////
// Responses //////////////////////////////////////////////////////////////////

fn profile_to_json(p: proto::UserProfile) -> Value {
    let links: Map<String, Value> = p
        .social_profile_links
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
    serde_json::json!({
        "display_name": p.display_name,
        "bio": p.bio,
        "avatar": p.avatar,
        "public_email": p.public_email,
        "company_name": p.company_name,
        "social_profile_links": Value::Object(links),
    })
}

pub fn owner(o: proto::Owner) -> models::Owner {
    models::Owner {
        user: o.user.map(|u| models::User {
            name: Some(u.name).filter(|n| !n.is_empty()),
            uid: Some(u.uid).filter(|n| !n.is_empty()),
            id: u.id,
            profile: u.profile.map(profile_to_json),
        }),
        organization: o.organization.as_ref().map(struct_to_json),
    }
}

fn connector_type(value: i32) -> Option<String> {
    let name = match value {
        1 => "CONNECTOR_TYPE_OPERATOR",
        2 => "CONNECTOR_TYPE_DATA",
        3 => "CONNECTOR_TYPE_AI",
        4 => "CONNECTOR_TYPE_APPLICATION",
        _ => return None,
    };
    Some(name.to_string())
}

pub fn connector_definition(d: proto::ConnectorDefinition) -> models::ConnectorDefinition {
    models::ConnectorDefinition {
        name: d.name,
        uid: d.uid,
        id: d.id,
        title: d.title,
        documentation_url: d.documentation_url,
        icon: d.icon,
        connector_type: connector_type(d.r#type),
        spec: d.spec.as_ref().map(struct_to_json),
        tombstone: d.tombstone,
        public: d.public,
        custom: d.custom,
        vendor: d.vendor,
    }
}

pub fn connector(c: proto::Connector) -> models::Connector {
    models::Connector {
        name: c.name,
        uid: c.uid,
        id: c.id,
        connector_definition_name: c.connector_definition_name,
        connector_definition_detail: c
            .connector_definition
            .map(connector_definition)
            .and_then(|d| serde_json::to_value(d).ok()),
        description: c.description,
        configuration: c.configuration.as_ref().map(struct_to_json),
        state: models::ConnectorState::from_i32(c.state),
        tombstone: c.tombstone,
        owner: c.owner.map(owner),
        create_time: timestamp(c.create_time),
        update_time: timestamp(c.update_time),
    }
}

pub fn pipeline(p: proto::Pipeline) -> models::Pipeline {
    models::Pipeline {
        name: p.name,
        uid: p.uid,
        id: p.id,
        description: p.description.unwrap_or_default(),
        display_name: p.display_name,
        slug: p.slug,
        recipe: p.recipe.as_ref().map(struct_to_json),
        raw_recipe: Some(p.raw_recipe).filter(|r| !r.is_empty()),
        owner: p.owner.map(owner),
        creator_name: p.creator_name,
        state: None,
        create_time: timestamp(p.create_time),
        update_time: timestamp(p.update_time),
    }
}

pub fn release(r: proto::PipelineRelease) -> models::PipelineRelease {
    models::PipelineRelease {
        name: r.name,
        uid: r.uid,
        id: r.id,
        description: r.description.unwrap_or_default(),
        recipe: r.recipe.as_ref().map(struct_to_json),
        raw_recipe: Some(r.raw_recipe).filter(|s| !s.is_empty()),
        create_time: timestamp(r.create_time),
        update_time: timestamp(r.update_time),
    }
}

fn component_type(value: i32) -> &'static str {
    match value {
        1 => "COMPONENT_TYPE_CONNECTOR_AI",
        2 => "COMPONENT_TYPE_CONNECTOR_DATA",
        3 => "COMPONENT_TYPE_OPERATOR",
        4 => "COMPONENT_TYPE_CONNECTOR_APPLICATION",
        5 => "COMPONENT_TYPE_ITERATOR",
        6 => "COMPONENT_TYPE_GENERIC",
        _ => "COMPONENT_TYPE_UNSPECIFIED",
    }
}

fn release_stage(value: i32) -> &'static str {
    match value {
        1 => "RELEASE_STAGE_OPEN_FOR_CONTRIBUTION",
        2 => "RELEASE_STAGE_COMING_SOON",
        3 => "RELEASE_STAGE_ALPHA",
        4 => "RELEASE_STAGE_BETA",
        5 => "RELEASE_STAGE_GA",
        _ => "RELEASE_STAGE_UNSPECIFIED",
    }
}

pub fn component_definition(d: proto::ComponentDefinition) -> models::ComponentDefinition {
    models::ComponentDefinition {
        name: d.name,
        uid: d.uid,
        id: d.id,
        title: d.title,
        description: d.description,
        component_type: component_type(d.r#type).to_string(),
        release_stage: release_stage(d.release_stage).to_string(),
        spec: d.spec.as_ref().map(struct_to_json),
        tombstone: d.tombstone,
        public: d.public,
        vendor: d.vendor,
    }
}

pub fn operator_definition(d: proto::OperatorDefinition) -> models::OperatorDefinition {
    models::OperatorDefinition {
        name: d.name,
        uid: d.uid,
        id: d.id,
        title: d.title,
        documentation_url: d.documentation_url,
        icon: d.icon,
        spec: d.spec.as_ref().map(struct_to_json),
        tombstone: d.tombstone,
        public: d.public,
        custom: d.custom,
    }
}

/// Converts an operation, unpacking a trigger response into
/// `{"outputs": [...], "metadata": {...}}`.
pub fn operation(op: proto::Operation) -> Result<models::Operation, prost::DecodeError> {
    let response = match op.response {
        Some(any) => {
            let r = proto::OutputsResponse::decode(any.value.as_slice())?;
            let mut body = Map::new();
            body.insert(
                "outputs".to_string(),
                Value::Array(r.outputs.iter().map(struct_to_json).collect()),
            );
            if let Some(metadata) = r.metadata.as_ref() {
                body.insert("metadata".to_string(), struct_to_json(metadata));
            }
            Some(Value::Object(body))
        }
        None => None,
    };
    Ok(models::Operation {
        name: op.name,
        done: op.done,
        response,
        error: op.error.map(|e| models::OperationError {
            code: e.code,
            message: e.message,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    /// Verifies nested JSON survives a trip through `google.protobuf.Struct`.
    ///
    /// This test:
    /// 1. Converts an object holding every JSON kind into a Struct
    /// 2. Converts it back and compares with the input
    fn test_struct_conversion_preserves_shape() {
        let input = json!({
            "destination": "airbyte-destination-csv",
            "count": 3,
            "ratio": 0.5,
            "flag": true,
            "nothing": null,
            "boxes": [{"x": 1, "y": 2}],
        });
        let s = json_to_struct(&input).unwrap();
        assert_eq!(struct_to_json(&s), input);
        assert!(json_to_struct(&json!([1, 2])).is_none());
    }

    #[test]
    /// Verifies request bodies accept both spellings and the mask falls back to body keys.
    fn test_request_building() {
        let body = json!({"rawRecipe": "version: v1beta", "description": ""});
        let pipeline = pipeline_from_json(&body, Some("users/admin/pipelines/p".into()));
        assert_eq!(pipeline.raw_recipe, "version: v1beta");
        assert_eq!(pipeline.description.as_deref(), Some(""));
        assert_eq!(pipeline.name, "users/admin/pipelines/p");

        let mask = field_mask(&[], &json!({"description": "", "rawRecipe": "x"}));
        assert_eq!(mask.paths, vec!["description".to_string(), "raw_recipe".to_string()]);
        assert_eq!(field_mask(&["description"], &body).paths, vec!["description".to_string()]);
    }

    #[test]
    /// Verifies the owner profile is rendered with snake_case keys.
    fn test_owner_profile_keys() {
        let converted = owner(proto::Owner {
            user: Some(proto::User {
                id: "admin".into(),
                profile: Some(proto::UserProfile {
                    display_name: "Instill".into(),
                    company_name: "Instill AI".into(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            organization: None,
        });
        let user = converted.user.unwrap();
        let profile = user.profile.unwrap();
        assert_eq!(profile["display_name"], "Instill");
        assert_eq!(profile["social_profile_links"], json!({}));
        assert!(user.name.is_none());
    }

    #[test]
    /// Verifies a finished trigger operation carries its outputs as JSON.
    ///
    /// This test:
    /// 1. Packs a trigger response with one output into an operation
    /// 2. Converts it and checks the name, done flag and outputs
    /// 3. Checks a pending operation converts without a response
    fn test_operation_unpacks_trigger_outputs() {
        let outputs = proto::OutputsResponse {
            outputs: vec![json_to_struct(&json!({"answer": "hello"})).unwrap()],
            metadata: None,
        };
        let op = operation(proto::Operation {
            name: "operations/abc".into(),
            done: true,
            response: Some(prost_types::Any {
                type_url: "type.googleapis.com/vdp.pipeline.v1beta.TriggerUserPipelineResponse"
                    .into(),
                value: outputs.encode_to_vec(),
            }),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(op.id(), "abc");
        assert!(op.done);
        assert_eq!(op.outputs().unwrap()[0], json!({"answer": "hello"}));

        let pending = operation(proto::Operation {
            name: "operations/abc".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(pending.response.is_none());
    }

    #[test]
    fn test_timestamp_and_enums() {
        let c = connector(proto::Connector {
            state: 2,
            create_time: Some(prost_types::Timestamp { seconds: 1_700_000_000, nanos: 0 }),
            ..Default::default()
        });
        assert_eq!(c.state, models::ConnectorState::Connected);
        assert_eq!(c.create_time.unwrap().timestamp(), 1_700_000_000);
        assert_eq!(release_stage(3), "RELEASE_STAGE_ALPHA");
        assert_eq!(component_type(3), "COMPONENT_TYPE_OPERATOR");
    }
}
