//! Maps bundled with the game, one per storyline.

use assault_core::enums::Storyline;
use assault_core::map::{MapData, MapError};

const TURBO_TECH_TAKEDOWN: &str = include_str!("../../../assets/maps/turbo-tech-takedown.json");
const STREET_JUSTICE: &str = include_str!("../../../assets/maps/street-justice.json");
const DELIVERY_DASH: &str = include_str!("../../../assets/maps/delivery-dash.json");

/// Raw JSON for a storyline's map.
pub fn map_source(storyline: Storyline) -> &'static str {
    match storyline {
        Storyline::TurboTechTakedown => TURBO_TECH_TAKEDOWN,
        Storyline::StreetJustice => STREET_JUSTICE,
        Storyline::DeliveryDash => DELIVERY_DASH,
    }
}

/// Parse a storyline's bundled map.
pub fn load_storyline(storyline: Storyline) -> Result<MapData, MapError> {
    MapData::from_json(map_source(storyline))
}
