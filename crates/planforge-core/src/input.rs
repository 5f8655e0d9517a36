//! Input model and construction-time validation.
//!
//! The public contract names rooms by string id; everything after
//! construction carries indices. Validation happens once, here; after a
//! solver is built there is no fallible path left.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How much corridor footprint a room claims around itself on the discrete
/// grid when stamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorridorRule {
    /// No footprint; the room needs no corridor access.
    None,
    /// One row of cells along the bottom edge.
    #[default]
    OneSide,
    /// L-shape: bottom row plus right column.
    TwoSides,
    /// Full one-cell halo around the rectangle.
    AllSides,
}

/// One requested room: a target floor area and the allowed aspect-ratio
/// band `[1/target_ratio, target_ratio]` for width/height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRequest {
    pub id: String,
    pub target_area: f64,
    pub target_ratio: f64,
    #[serde(default)]
    pub corridor_rule: CorridorRule,
}

impl RoomRequest {
    pub fn new(id: impl Into<String>, target_area: f64, target_ratio: f64) -> Self {
        Self {
            id: id.into(),
            target_area,
            target_ratio,
            corridor_rule: CorridorRule::default(),
        }
    }

    pub fn with_rule(mut self, rule: CorridorRule) -> Self {
        self.corridor_rule = rule;
        self
    }
}

fn default_weight() -> f64 {
    1.0
}

/// Soft requirement that two rooms end up sharing a wall or lying close
/// together. Unordered; duplicate pairs are allowed and their weights add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjacency {
    pub a: String,
    pub b: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl Adjacency {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            weight: default_weight(),
        }
    }

    pub fn weighted(a: impl Into<String>, b: impl Into<String>, weight: f64) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            weight,
        }
    }
}

/// Construction-time input failure. No solver state exists once one of
/// these is returned.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("boundary polygon needs at least 3 vertices, got {vertices}")]
    DegenerateBoundary { vertices: usize },
    #[error("room id must be non-empty")]
    EmptyRoomId,
    #[error("room '{id}' has non-positive target area {area}")]
    NonPositiveArea { id: String, area: f64 },
    #[error("room '{id}' has target ratio {ratio}, must be >= 1")]
    RatioBelowOne { id: String, ratio: f64 },
    #[error("duplicate room id '{id}'")]
    DuplicateRoomId { id: String },
    #[error("adjacency references unknown room id '{id}'")]
    UnknownRoomId { id: String },
    #[error("population size {size} is too small, need at least 2")]
    PopulationTooSmall { size: usize },
}

/// Adjacency with endpoints resolved to room indices, duplicates merged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAdjacency {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

/// Validate the shared inputs and build the id -> index table.
pub fn validate_inputs(
    boundary_len: usize,
    rooms: &[RoomRequest],
) -> Result<HashMap<String, usize>, PlanError> {
    if boundary_len < 3 {
        return Err(PlanError::DegenerateBoundary {
            vertices: boundary_len,
        });
    }
    let mut index = HashMap::with_capacity(rooms.len());
    for (i, room) in rooms.iter().enumerate() {
        if room.id.is_empty() {
            return Err(PlanError::EmptyRoomId);
        }
        if room.target_area <= 0.0 {
            return Err(PlanError::NonPositiveArea {
                id: room.id.clone(),
                area: room.target_area,
            });
        }
        if room.target_ratio < 1.0 {
            return Err(PlanError::RatioBelowOne {
                id: room.id.clone(),
                ratio: room.target_ratio,
            });
        }
        if index.insert(room.id.clone(), i).is_some() {
            return Err(PlanError::DuplicateRoomId {
                id: room.id.clone(),
            });
        }
    }
    Ok(index)
}

/// Resolve adjacency ids to indices and merge duplicate pairs by adding
/// their weights. Output order is first-seen order, so iteration over the
/// result is deterministic.
pub fn resolve_adjacencies(
    adjacencies: &[Adjacency],
    index: &HashMap<String, usize>,
) -> Result<Vec<ResolvedAdjacency>, PlanError> {
    let mut resolved: Vec<ResolvedAdjacency> = Vec::new();
    let mut seen: HashMap<(usize, usize), usize> = HashMap::new();
    for adj in adjacencies {
        let a = *index
            .get(&adj.a)
            .ok_or_else(|| PlanError::UnknownRoomId { id: adj.a.clone() })?;
        let b = *index
            .get(&adj.b)
            .ok_or_else(|| PlanError::UnknownRoomId { id: adj.b.clone() })?;
        let key = if a <= b { (a, b) } else { (b, a) };
        match seen.get(&key) {
            Some(&slot) => resolved[slot].weight += adj.weight,
            None => {
                seen.insert(key, resolved.len());
                resolved.push(ResolvedAdjacency {
                    a: key.0,
                    b: key.1,
                    weight: adj.weight,
                });
            }
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms() -> Vec<RoomRequest> {
        vec![
            RoomRequest::new("living", 200.0, 1.5),
            RoomRequest::new("kitchen", 120.0, 1.2),
        ]
    }

    #[test]
    fn test_valid_inputs_build_index() {
        let index = validate_inputs(4, &rooms()).expect("valid inputs");
        assert_eq!(index["living"], 0);
        assert_eq!(index["kitchen"], 1);
    }

    #[test]
    fn test_degenerate_boundary_rejected() {
        assert!(matches!(
            validate_inputs(2, &rooms()),
            Err(PlanError::DegenerateBoundary { vertices: 2 })
        ));
    }

    #[test]
    fn test_bad_rooms_rejected() {
        let bad_area = vec![RoomRequest::new("x", 0.0, 1.0)];
        assert!(matches!(
            validate_inputs(4, &bad_area),
            Err(PlanError::NonPositiveArea { .. })
        ));

        let bad_ratio = vec![RoomRequest::new("x", 10.0, 0.5)];
        assert!(matches!(
            validate_inputs(4, &bad_ratio),
            Err(PlanError::RatioBelowOne { .. })
        ));

        let dup = vec![
            RoomRequest::new("x", 10.0, 1.0),
            RoomRequest::new("x", 12.0, 1.0),
        ];
        assert!(matches!(
            validate_inputs(4, &dup),
            Err(PlanError::DuplicateRoomId { .. })
        ));

        let empty = vec![RoomRequest::new("", 10.0, 1.0)];
        assert!(matches!(validate_inputs(4, &empty), Err(PlanError::EmptyRoomId)));
    }

    #[test]
    fn test_unknown_adjacency_id_rejected() {
        let index = validate_inputs(4, &rooms()).unwrap();
        let adj = vec![Adjacency::new("living", "garage")];
        assert!(matches!(
            resolve_adjacencies(&adj, &index),
            Err(PlanError::UnknownRoomId { .. })
        ));
    }

    #[test]
    fn test_duplicate_adjacency_weights_add() {
        let index = validate_inputs(4, &rooms()).unwrap();
        let adj = vec![
            Adjacency::weighted("living", "kitchen", 2.0),
            Adjacency::weighted("kitchen", "living", 1.5),
        ];
        let resolved = resolve_adjacencies(&adj, &index).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].weight, 3.5);
        assert_eq!((resolved[0].a, resolved[0].b), (0, 1));
    }

    #[test]
    fn test_adjacency_default_weight_from_json() {
        let adj: Adjacency = serde_json::from_str(r#"{"a":"living","b":"kitchen"}"#).unwrap();
        assert_eq!(adj.weight, 1.0);
    }
}
