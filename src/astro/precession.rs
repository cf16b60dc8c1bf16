use serde::Deserialize;

use super::elements::OrbitalElementSet;

/// Linear secular drift of a body's orbital elements, per Julian century.
/// The semi-major-axis rate is expressed against a/1000, matching the
/// published tables this data is transcribed from.
///
/// These rates ship in the catalog but nothing in the tick path applies
/// them; the live scene runs on the epoch elements. Kept as a public,
/// tested API so the wiring can be added without touching the data model.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PrecessionRates {
    pub semi_major_axis_millis: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub arg_periapsis_deg: f64,
    pub ascending_node_deg: f64,
}

impl PrecessionRates {
    /// Elements drifted by `centuries` Julian centuries from their epoch
    /// values. The input set is untouched; per-tick state stays derived
    /// from immutable elements.
    pub fn apply(&self, elements: &OrbitalElementSet, centuries: f64) -> OrbitalElementSet {
        let mut drifted = *elements;
        drifted.semi_major_axis += self.semi_major_axis_millis * 1000.0 * centuries;
        drifted.eccentricity += self.eccentricity * centuries;
        drifted.inclination_deg += self.inclination_deg * centuries;
        drifted.arg_periapsis_deg += self.arg_periapsis_deg * centuries;
        drifted.ascending_node_deg += self.ascending_node_deg * centuries;
        drifted
    }
}
