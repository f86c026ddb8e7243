/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Assertions Module
//!
//! Side-effect free predicates used by every check module.
//!
//! ## Predicates
//!
//! - [`deep_equal`]: structural equality of two decoded JSON values
//! - [`is_uuid`]: canonical UUID v1 to v5
//! - [`is_valid_owner`]: owner identity plus the fixed test profile
//! - [`validate_recipe`]: shape of a rendered recipe
//! - [`is_pipeline_name`], [`is_release_name`]: canonical resource names

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};
use vdp_models::Owner;

static UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("static regex")
});

static PIPELINE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^users/[^/]+/pipelines/[^/]+$").expect("static regex"));

static RELEASE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^users/[^/]+/pipelines/[^/]+/releases/[^/]+$").expect("static regex")
});

/// Profile every resource owned by the test user must carry.
pub fn expected_profile() -> Value {
    json!({
        "display_name": "Instill",
        "bio": "",
        "avatar": "",
        "public_email": "",
        "company_name": "Instill AI",
        "social_profile_links": {}
    })
}

/// Structural equality of two JSON values.
///
/// Objects are equal when they have the same number of keys and every key of
/// `x` maps to an equal value in `y`; arrays compare element-wise; scalars
/// compare by value.
pub fn deep_equal(x: &Value, y: &Value) -> bool {
    match (x, y) {
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(k, v)| b.get(k).map_or(false, |w| deep_equal(v, w)))
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(v, w)| deep_equal(v, w))
        }
        _ => x == y,
    }
}

pub fn is_uuid(value: &str) -> bool {
    UUID.is_match(value)
}

/// True when `owner` is the expected user carrying the fixed profile.
pub fn is_valid_owner(owner: Option<&Owner>, expected_user_id: &str) -> bool {
    let Some(user) = owner.and_then(|o| o.user.as_ref()) else {
        return false;
    };
    if user.id != expected_user_id {
        return false;
    }
    user.profile
        .as_ref()
        .map_or(false, |profile| deep_equal(profile, &expected_profile()))
}

/// Checks a rendered recipe has a usable component graph.
///
/// Component ids must never be UUIDs. Public views reference connectors by
/// name and private views by permalink, so the second segment of each
/// `resource_name` must be a UUID exactly when `private` is set. Recipes
/// without a `components` list (variable/output recipes) only need to be
/// objects.
pub fn validate_recipe(recipe: Option<&Value>, private: bool) -> bool {
    let Some(recipe) = recipe.and_then(Value::as_object) else {
        return false;
    };
    let Some(components) = recipe.get("components") else {
        return true;
    };
    let Some(components) = components.as_array() else {
        // Keyed by component id
        return components.is_object();
    };

    components.iter().all(|component| {
        let id = component.get("id").and_then(Value::as_str).unwrap_or_default();
        if is_uuid(id) {
            return false;
        }
        let resource = component
            .get("resource_name")
            .or_else(|| component.get("resourceName"))
            .and_then(Value::as_str);
        match resource.and_then(|r| r.split('/').nth(1)) {
            Some(segment) => is_uuid(segment) == private,
            None => true,
        }
    })
}

/// Last path segment of a resource name.
pub fn id_from_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

pub fn is_pipeline_name(name: &str) -> bool {
    PIPELINE_NAME.is_match(name)
}

pub fn is_release_name(name: &str) -> bool {
    RELEASE_NAME.is_match(name)
}

/// True for timestamps strictly after the Unix epoch.
pub fn after_epoch(time: Option<DateTime<Utc>>) -> bool {
    time.map_or(false, |t| t.timestamp_millis() > 0)
}

/// Lowercase, hyphen-separated form of a display name.
pub fn slugify(display_name: &str) -> String {
    display_name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
