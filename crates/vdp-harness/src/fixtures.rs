/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Request bodies and payloads shared by the check modules.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::distributions::Uniform;
use rand::Rng;
use serde_json::{json, Value};
use std::path::Path;
use vdp_models::{NewConnector, NewPipeline};

use crate::error::Result;

/// Definition every test connector is created from.
pub const CSV_DESTINATION_DEFINITION: &str = "connector-definitions/airbyte-destination";

/// Display name of test pipelines.
pub const PIPELINE_DISPLAY_NAME: &str = "Integration Test Pipeline";

/// A sync recipe echoing its `input` variable to the `answer` output.
pub const SIMPLE_RECIPE_YAML: &str = "version: v1beta
variable:
  input:
    title: Input
    type: string

output:
  answer:
    title: Answer
    value: ${variable.input}
";

/// Random lowercase string, used for ids and descriptions.
pub fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(Uniform::new_inclusive(b'a', b'z'))
        .take(len)
        .map(char::from)
        .collect()
}

pub fn csv_destination_config() -> Value {
    json!({
        "destination": "airbyte-destination-csv",
        "destination_path": "/local/test"
    })
}

/// Create body for a CSV destination connector with a random id.
pub fn new_connector_body() -> Value {
    connector_body(random_string(10), csv_destination_config())
}

pub fn connector_body(id: impl Into<String>, configuration: Value) -> Value {
    let connector = NewConnector::new(id, CSV_DESTINATION_DEFINITION, configuration)
        .with_description(random_string(50));
    serde_json::to_value(connector).unwrap_or(Value::Null)
}

/// Create body for a pipeline built from [`SIMPLE_RECIPE_YAML`].
pub fn new_pipeline_body() -> Value {
    let pipeline = NewPipeline {
        display_name: Some(PIPELINE_DISPLAY_NAME.to_string()),
        ..NewPipeline::from_recipe(SIMPLE_RECIPE_YAML)
    }
    .with_description(random_string(50));
    serde_json::to_value(pipeline).unwrap_or(Value::Null)
}

/// Task outputs written to a destination connector, one batch per task.
pub fn model_outputs() -> Vec<(&'static str, Vec<Value>)> {
    let bounding_box = |height: f64, left: f64, top: f64, width: f64| {
        json!({"height": height, "left": left, "top": top, "width": width})
    };
    let classification = json!({"category": "person", "score": 0.99});
    let detection = |first: Value| {
        json!({"data": {
            "detection": {"objects": [
                {"bounding_box": first, "category": "dog", "score": 0.980409},
                {
                    "bounding_box": bounding_box(242.36627, 133.76924, 195.17859, 207.40651),
                    "category": "dog",
                    "score": 0.9009272
                }
            ]},
            "classification": classification.clone()
        }})
    };
    let structured = |data: Value| {
        json!({"data": {
            "data_mapping_index": "01GB5T5ZK9W9C2VXMWWRYM8WPU",
            "structured_data": data
        }})
    };

    vec![
        (
            "classification",
            vec![json!({"data": {"classification": classification.clone()}})],
        ),
        (
            "detection",
            vec![
                detection(bounding_box(0.0, 0.0, 99.084984, 204.18988)),
                detection(bounding_box(402.58002, 0.0, 99.084984, 204.18988)),
                detection(bounding_box(0.0, 325.7926, 99.084984, 204.18988)),
            ],
        ),
        (
            "detection with no objects",
            vec![json!({"data": {"detection": {"objects": []}}})],
        ),
        (
            "keypoint",
            vec![json!({"data": {"keypoint": {"objects": [
                {"keypoints": [{"x": 10, "y": 100, "v": 0.6}, {"x": 11, "y": 101, "v": 0.2}], "score": 0.99},
                {"keypoints": [{"x": 20, "y": 10, "v": 0.6}, {"x": 12, "y": 120, "v": 0.7}], "score": 0.99}
            ]}}})],
        ),
        (
            "ocr",
            vec![json!({"data": {"ocr": {"objects": [
                {"bounding_box": bounding_box(402.58002, 0.0, 99.084984, 204.18988), "text": "some text", "score": 0.99},
                {"bounding_box": bounding_box(242.36627, 133.76924, 195.17859, 207.40651), "text": "some text", "score": 0.99}
            ]}}})],
        ),
        (
            "semantic segmentation",
            vec![json!({"data": {"semantic_segmentation": {"stuffs": [
                {"rle": "2918,12,382,33,...", "category": "person"},
                {"rle": "34,18,230,18,...", "category": "sky"},
                {"rle": "34,18,230,18,...", "category": "dog"}
            ]}}})],
        ),
        (
            "instance segmentation",
            vec![structured(json!({"instance_segmentation": {"objects": [
                {
                    "rle": "11,6,35,8,59,10,83,12,107,14,131,16,156,16,180,18,205,18,229,...",
                    "score": 0.9996394,
                    "bounding_box": {"top": 375, "left": 166, "width": 25, "height": 70},
                    "category": "dog"
                },
                {
                    "rle": "11,6,35,8,59,10,83,12,107,14,131,16,156,16,180,18,205,18,229,...",
                    "score": 0.9990727,
                    "bounding_box": {"top": 107, "left": 240, "width": 27, "height": 27},
                    "category": "car"
                }
            ]}}))],
        ),
        (
            "text to image",
            vec![structured(json!({"text_to_image": {"images": [
                "/9j/4AAQSkZJRgABAQAAAQABAAD/...oADAMBAAIRAxEAPwD2p76rBDHU2KHMpuE",
                "/9j/4AAQSkZJRgABAQAAAQABAAD/...oADAMBAAIRAxEAPwD2p76rBDHU2KHMpuE"
            ]}}))],
        ),
        (
            "text generation",
            vec![structured(json!({"text_generation": {
                "text": "The winds of change are blowing strong, bring new beginnings, righting wrongs."
            }}))],
        ),
        (
            "unspecified",
            vec![structured(json!({"unspecified": {"raw_outputs": [{
                "name": "some unspecified model output",
                "data_type": "INT8",
                "shape": [3, 3, 3],
                "data": [1, 2, 3, 4, 5, 6, 7]
            }]}}))],
        ),
    ]
}

/// Base64 encoded sample images read from the fixture directory.
#[derive(Debug, Clone)]
pub struct SampleImages {
    pub dog_jpg: String,
    pub cat_jpg: String,
    pub bear_jpg: String,
    pub dog_rgba_png: String,
}

impl SampleImages {
    pub fn load(dir: &Path) -> Result<Self> {
        let read = |name: &str| -> Result<String> {
            let bytes = std::fs::read(dir.join(name))?;
            Ok(STANDARD.encode(bytes))
        };
        Ok(Self {
            dog_jpg: read("dog.jpg")?,
            cat_jpg: read("cat.jpg")?,
            bear_jpg: read("bear.jpg")?,
            dog_rgba_png: read("dog-rgba.png")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarnessError;

    #[test]
    fn test_random_string() {
        let id = random_string(10);
        assert_eq!(id.len(), 10);
        assert!(id.chars().all(|c| c.is_ascii_lowercase()));
        assert_ne!(random_string(50), random_string(50));
    }

    #[test]
    /// Verifies the connector create body carries the literal definition and configuration.
    fn test_connector_body() {
        let body = new_connector_body();
        assert_eq!(body["connector_definition_name"], CSV_DESTINATION_DEFINITION);
        assert_eq!(body["configuration"]["destination"], "airbyte-destination-csv");
        assert_eq!(body["configuration"]["destination_path"], "/local/test");
        assert_eq!(body["id"].as_str().map(str::len), Some(10));
        assert_eq!(body["description"].as_str().map(str::len), Some(50));
    }

    #[test]
    /// Verifies the pipeline body is camelCase and its recipe parses.
    fn test_pipeline_body() {
        let body = new_pipeline_body();
        assert_eq!(body["displayName"], PIPELINE_DISPLAY_NAME);
        let recipe: Value = serde_yaml::from_str(body["rawRecipe"].as_str().unwrap()).unwrap();
        assert_eq!(recipe["output"]["answer"]["value"], "${variable.input}");
        assert_eq!(
            crate::assertions::slugify(PIPELINE_DISPLAY_NAME),
            "integration-test-pipeline"
        );
    }

    #[test]
    fn test_model_outputs_cover_every_task() {
        let outputs = model_outputs();
        assert_eq!(outputs.len(), 10);
        assert!(outputs.iter().all(|(_, batch)| !batch.is_empty()));
        let (_, detection) = &outputs[1];
        assert_eq!(detection.len(), 3);
    }

    #[test]
    /// Verifies sample images are read and base64 encoded, and a missing file is an io error.
    ///
    /// This test:
    /// 1. Writes four small files into a temporary directory
    /// 2. Loads them and checks the encoding of one
    /// 3. Removes one and checks loading fails with an io error
    fn test_sample_images() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["dog.jpg", "cat.jpg", "bear.jpg", "dog-rgba.png"] {
            std::fs::write(dir.path().join(name), b"img").unwrap();
        }

        let images = SampleImages::load(dir.path()).unwrap();
        assert_eq!(images.dog_jpg, "aW1n");

        std::fs::remove_file(dir.path().join("cat.jpg")).unwrap();
        assert!(matches!(
            SampleImages::load(dir.path()),
            Err(HarnessError::Io(_))
        ));
    }
}
