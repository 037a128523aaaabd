//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level race phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    /// Every checkpoint visited.
    Finished,
    /// The countdown reached zero.
    TimeUp,
    /// Player hitpoints reached zero.
    Wrecked,
}

impl RacePhase {
    /// Whether the race has ended and only a restart can resume play.
    pub fn is_over(self) -> bool {
        matches!(self, Self::Finished | Self::TimeUp | Self::Wrecked)
    }
}

/// Pylon lifecycle. `Destroyed` is absorbing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PylonPhase {
    /// Spawned, first strike not yet scheduled.
    #[default]
    Idle,
    /// A strike is pending in the scheduler.
    Scheduled,
    Destroyed,
}

/// Pylon variant, selects strength and durability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PylonVariant {
    #[default]
    Standard,
    Heavy,
    Overcharged,
}

/// Outcome of a strike attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikeResult {
    Hit,
    Miss,
}

/// Primitive geometry kinds understood by the map loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Box,
    Cylinder,
    Sphere,
    Plane,
    Ground,
}

impl PrimitiveKind {
    /// Parse a map `type` string. Unknown types yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "box" => Some(Self::Box),
            "cylinder" => Some(Self::Cylinder),
            "sphere" => Some(Self::Sphere),
            "plane" => Some(Self::Plane),
            "ground" => Some(Self::Ground),
            _ => None,
        }
    }

    /// Collider shape handed to the physics collaborator.
    pub fn collider_shape(self) -> ColliderShape {
        match self {
            Self::Box | Self::Ground | Self::Plane => ColliderShape::Box,
            Self::Cylinder | Self::Sphere => ColliderShape::Sphere,
        }
    }
}

/// Collider approximation for a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColliderShape {
    Box,
    Sphere,
}

/// Whether a collider moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Static,
    Dynamic,
}

/// Material palette shared by every map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialId {
    Concrete,
    Wall,
    Metal,
    Building,
}

impl MaterialId {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "concrete" => Some(Self::Concrete),
            "wall" => Some(Self::Wall),
            "metal" => Some(Self::Metal),
            "building" => Some(Self::Building),
            _ => None,
        }
    }

    /// Diffuse colour (RGB, 0..1).
    pub fn diffuse(self) -> [f32; 3] {
        match self {
            Self::Concrete => [0.5, 0.5, 0.5],
            Self::Wall => [0.8, 0.3, 0.3],
            Self::Metal => [0.6, 0.6, 0.7],
            Self::Building => [0.4, 0.4, 0.6],
        }
    }
}

/// Bundled race storylines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Storyline {
    #[default]
    TurboTechTakedown,
    StreetJustice,
    DeliveryDash,
}

impl Storyline {
    pub const ALL: [Storyline; 3] = [
        Storyline::TurboTechTakedown,
        Storyline::StreetJustice,
        Storyline::DeliveryDash,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::TurboTechTakedown => "turbo-tech-takedown",
            Self::StreetJustice => "street-justice",
            Self::DeliveryDash => "delivery-dash",
        }
    }

    /// Resolve a slug case-insensitively, falling back to the default race.
    pub fn from_slug(slug: &str) -> Self {
        let slug = slug.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|s| s.slug() == slug)
            .unwrap_or_default()
    }
}

/// Where a key event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputSource {
    Keyboard,
    Touch,
}

/// Canonical driving keys (`w`, `s`, `a`, `d`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriveKey {
    Forward,
    Backward,
    Left,
    Right,
}

impl DriveKey {
    pub const ALL: [DriveKey; 4] = [
        DriveKey::Forward,
        DriveKey::Backward,
        DriveKey::Left,
        DriveKey::Right,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Self::Forward),
            's' => Some(Self::Backward),
            'a' => Some(Self::Left),
            'd' => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Forward => 'w',
            Self::Backward => 's',
            Self::Left => 'a',
            Self::Right => 'd',
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}
