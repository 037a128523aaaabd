//! Declarative map description, as authored by level designers.
//!
//! The document is JSON with camelCase keys. Parsing only checks the
//! document shape. Entries are read leniently: a primitive with no type or
//! a non-numeric size still parses, and [`MapPrimitive::resolve_dims`]
//! reports the problem so the loader can skip that entry and keep going.
//! Malformed optional fields read as absent.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::components::PrimitiveDims;
use crate::enums::{PrimitiveKind, PylonVariant};
use crate::types::Point3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub primitives: Vec<MapPrimitive>,
    #[serde(default)]
    pub pylons: Vec<PylonDef>,
    #[serde(default)]
    pub checkpoints: Vec<ObjectiveDef>,
    #[serde(default)]
    pub secret_crate: Option<ObjectiveDef>,
    /// Countdown in seconds. `None` means no limit.
    #[serde(default)]
    pub time_limit: Option<f64>,
    #[serde(default)]
    pub spawn_position: Option<Point3>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapPrimitive {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    /// Raw size values; non-numbers surface as [`PrimitiveError::BadSize`].
    #[serde(default, deserialize_with = "lenient")]
    pub size: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub position: Option<Point3>,
    #[serde(default, deserialize_with = "lenient")]
    pub rotation: Option<Point3>,
    #[serde(default, deserialize_with = "lenient")]
    pub material: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub physics: Option<PhysicsDef>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PhysicsDef {
    #[serde(default)]
    pub mass: Option<f64>,
    #[serde(default)]
    pub collision: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PylonDef {
    /// `None` when missing or malformed; the loader skips such pylons.
    #[serde(default, deserialize_with = "lenient")]
    pub position: Option<Point3>,
    /// Mean strike interval (ms).
    #[serde(default, deserialize_with = "lenient")]
    pub interval: Option<u64>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub variant: PylonVariant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub position: Point3,
}

#[derive(Debug)]
pub enum MapError {
    Parse(serde_json::Error),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Parse(e) => write!(f, "invalid map document: {e}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Parse(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        MapError::Parse(e)
    }
}

/// Read any JSON value, keeping it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Why a single primitive could not be instantiated.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveError {
    MissingType,
    UnknownType(String),
    MissingSize { field: &'static str },
    BadSize { field: &'static str },
}

impl fmt::Display for PrimitiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveError::MissingType => write!(f, "primitive has no type"),
            PrimitiveError::UnknownType(t) => write!(f, "unknown primitive type: {t}"),
            PrimitiveError::MissingSize { field } => write!(f, "missing size field: {field}"),
            PrimitiveError::BadSize { field } => write!(f, "size field {field} is not a number"),
        }
    }
}

impl std::error::Error for PrimitiveError {}

impl MapData {
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl MapPrimitive {
    fn size_field(&self, field: &'static str) -> Result<f64, PrimitiveError> {
        self.optional_size_field(field)?
            .ok_or(PrimitiveError::MissingSize { field })
    }

    fn optional_size_field(&self, field: &'static str) -> Result<Option<f64>, PrimitiveError> {
        match self.size.as_ref().and_then(|s| s.get(field)) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or(PrimitiveError::BadSize { field }),
        }
    }

    /// Resolve the primitive's type and dimensions.
    pub fn resolve_dims(&self) -> Result<PrimitiveDims, PrimitiveError> {
        if self.kind.is_empty() {
            return Err(PrimitiveError::MissingType);
        }
        let kind = PrimitiveKind::parse(&self.kind)
            .ok_or_else(|| PrimitiveError::UnknownType(self.kind.clone()))?;

        let dims = match kind {
            PrimitiveKind::Box => PrimitiveDims::Box {
                width: self.size_field("width")?,
                height: self.size_field("height")?,
                depth: self.size_field("depth")?,
            },
            PrimitiveKind::Cylinder => {
                let height = self.size_field("height")?;
                let uniform = self.optional_size_field("diameter")?;
                let top = self
                    .optional_size_field("diameterTop")?
                    .or(uniform)
                    .ok_or(PrimitiveError::MissingSize {
                        field: "diameterTop",
                    })?;
                let bottom = self
                    .optional_size_field("diameterBottom")?
                    .or(uniform)
                    .ok_or(PrimitiveError::MissingSize {
                        field: "diameterBottom",
                    })?;
                PrimitiveDims::Cylinder {
                    diameter_top: top,
                    diameter_bottom: bottom,
                    height,
                }
            }
            PrimitiveKind::Sphere => PrimitiveDims::Sphere {
                diameter: self.size_field("diameter")?,
            },
            PrimitiveKind::Plane => PrimitiveDims::Plane {
                width: self.size_field("width")?,
                height: self.size_field("height")?,
            },
            PrimitiveKind::Ground => PrimitiveDims::Ground {
                width: self.size_field("width")?,
                height: self.size_field("height")?,
                subdivisions: self
                    .optional_size_field("subdivisions")?
                    .map_or(1, |s| s.max(1.0) as u32),
            },
        };
        Ok(dims)
    }

    /// Whether the loader should build a collider for this primitive.
    pub fn wants_collider(&self) -> bool {
        self.physics.and_then(|p| p.collision).unwrap_or(false)
    }

    pub fn mass(&self) -> f64 {
        self.physics.and_then(|p| p.mass).unwrap_or(0.0)
    }
}
