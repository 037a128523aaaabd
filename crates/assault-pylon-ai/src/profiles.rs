//! Variant-specific pylon parameters.

use assault_core::constants::*;
use assault_core::enums::PylonVariant;

/// Behavioral profile for a pylon variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PylonProfile {
    /// Damage per successful strike.
    pub strength: i32,
    /// Starting hitpoints.
    pub hitpoints: i32,
    /// Lock-on range.
    pub max_range: f64,
    /// Segments in the strike bolt.
    pub bolt_segments: usize,
    /// Per-axis jitter amplitude of the bolt.
    pub bolt_variance: f64,
}

/// Get the profile for a given variant.
pub fn get_profile(variant: PylonVariant) -> PylonProfile {
    match variant {
        PylonVariant::Standard => PylonProfile {
            strength: 5,
            hitpoints: PYLON_HITPOINTS,
            max_range: PYLON_MAX_RANGE,
            bolt_segments: BOLT_SEGMENTS,
            bolt_variance: BOLT_VARIANCE,
        },
        PylonVariant::Heavy => PylonProfile {
            strength: 15,
            hitpoints: PYLON_HITPOINTS,
            max_range: PYLON_MAX_RANGE,
            bolt_segments: 10,
            bolt_variance: 0.4,
        },
        PylonVariant::Overcharged => PylonProfile {
            strength: 25,
            hitpoints: PYLON_HITPOINTS,
            max_range: PYLON_MAX_RANGE,
            bolt_segments: 8,
            bolt_variance: 0.5,
        },
    }
}
