//! Plain shape mapping consumed by label-file writers.
//!
//! This is the labelme `shapes[]` entry layout. Rows only ever produce
//! rectangles, but the type carries the full mapping so shapes coming from
//! other tools (polygons, masks, extra keys) pass through unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label given to every shape derived from a trajectory row.
pub const BALL_LABEL: &str = "ball";

/// One annotation shape in label-record form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub label: String,

    pub points: Vec<[f64; 2]>,

    /// Always serialized; `null` when the shape is not grouped.
    pub group_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub shape_type: String,

    #[serde(default)]
    pub flags: BTreeMap<String, bool>,

    /// Base64-encoded PNG mask, if the shape carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,

    /// Keys the writer does not know about.
    #[serde(flatten)]
    pub other_data: serde_json::Map<String, serde_json::Value>,
}

impl Shape {
    /// Creates an ungrouped rectangle from two corner points.
    pub fn rectangle(label: impl Into<String>, min: [f64; 2], max: [f64; 2]) -> Self {
        Self {
            label: label.into(),
            points: vec![min, max],
            group_id: None,
            description: None,
            shape_type: "rectangle".to_string(),
            flags: BTreeMap::new(),
            mask: None,
            other_data: serde_json::Map::new(),
        }
    }
}
