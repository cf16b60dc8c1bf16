use nalgebra::Vector3;

use crate::astro::elements::{MeanMotionPolicy, OrbitalElementSet};
use crate::astro::orbit;
use crate::consts::mean_motion;

/// A bulk scatter population: thousands of minor-planet markers propagated
/// with the precomputed-coefficient policy and the fixed-iteration solver.
/// Nothing here is accurate to better than a pixel, which is the point; the
/// rendered planets never go through this path.
#[derive(Debug, Clone)]
pub struct MinorBodyField {
    entries: Vec<FieldEntry>,
    positions: Vec<Vector3<f64>>,
}

#[derive(Debug, Clone, Copy)]
struct FieldEntry {
    elements: OrbitalElementSet,
    rad_per_sec: f64,
}

impl MinorBodyField {
    /// Builds the field around a central body with gravitational parameter
    /// `central_mu`, baking each entry's mean motion once. Rows with
    /// unusable elements are dropped with a warning; a handful of bad rows
    /// in a 10k-entry catalog is routine and must not block the rest.
    pub fn new(central_mu: f64, catalog: Vec<OrbitalElementSet>) -> Self {
        let mut entries = Vec::with_capacity(catalog.len());
        for elements in catalog {
            let usable = elements.eccentricity >= 0.0
                && elements.eccentricity < 1.0
                && elements.semi_major_axis > 0.0
                && elements.semi_major_axis.is_finite();
            if !usable {
                log::warn!(
                    "Dropping scatter entry with a = {}, e = {}",
                    elements.semi_major_axis,
                    elements.eccentricity
                );
                continue;
            }
            entries.push(FieldEntry {
                elements,
                rad_per_sec: mean_motion(elements.semi_major_axis, central_mu),
            });
        }

        let positions = vec![Vector3::zeros(); entries.len()];
        MinorBodyField { entries, positions }
    }

    /// Recomputes every marker's scene-space position for the given
    /// instant. `anchor` is the central body's already-resolved scene
    /// position for the same tick.
    pub fn update(&mut self, julian_seconds: f64, anchor: Vector3<f64>) {
        for (entry, position) in self.entries.iter().zip(self.positions.iter_mut()) {
            let policy = MeanMotionPolicy::Precomputed {
                rad_per_sec: entry.rad_per_sec,
            };
            let mean_anomaly = entry.elements.mean_anomaly_at(policy, julian_seconds);
            let relative = orbit::propagate_fast(&entry.elements, mean_anomaly);
            *position = orbit::remap_to_scene(relative) + anchor;
        }
    }

    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::consts::{ASTRONOMICAL_UNIT, LENGTH_SCALE, NEWTON_G};

    const SUN_MU: f64 = NEWTON_G * 1.989e30;

    fn belt_entry(a: f64, e: f64, mean_anomaly: f64) -> OrbitalElementSet {
        OrbitalElementSet {
            eccentricity: e,
            periapsis_distance: a * (1.0 - e),
            inclination_deg: 7.0,
            ascending_node_deg: 103.8,
            arg_periapsis_deg: 151.2,
            epoch_julian_seconds: 0.0,
            mean_motion_coefficient: 0.0,
            mean_anomaly_deg: mean_anomaly,
            true_anomaly_deg: 0.0,
            semi_major_axis: a,
            apoapsis_distance: a * (1.0 + e),
            orbital_period_seconds: 0.0,
        }
    }

    #[test]
    fn test_bad_rows_are_dropped_not_fatal() {
        let catalog = vec![
            belt_entry(2.2 * ASTRONOMICAL_UNIT, 0.15, 10.0),
            belt_entry(2.5 * ASTRONOMICAL_UNIT, 1.4, 20.0), // hyperbolic junk
            belt_entry(-1.0, 0.1, 30.0),                    // negative axis
            belt_entry(3.0 * ASTRONOMICAL_UNIT, 0.05, 40.0),
        ];
        let field = MinorBodyField::new(SUN_MU, catalog);
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_markers_follow_the_anchor() {
        let catalog = vec![belt_entry(2.7 * ASTRONOMICAL_UNIT, 0.1, 55.0)];
        let mut field = MinorBodyField::new(SUN_MU, catalog);

        field.update(0.0, Vector3::zeros());
        let centered = field.positions()[0];

        let anchor = Vector3::new(5.0, -2.0, 1.0);
        field.update(0.0, anchor);
        assert_relative_eq!(field.positions()[0], centered + anchor);
    }

    #[test]
    fn test_marker_radius_is_belt_sized() {
        let a = 2.7 * ASTRONOMICAL_UNIT;
        let catalog = vec![belt_entry(a, 0.0, 123.0)];
        let mut field = MinorBodyField::new(SUN_MU, catalog);

        field.update(1.0e7, Vector3::zeros());
        assert_relative_eq!(
            field.positions()[0].norm(),
            a / LENGTH_SCALE,
            max_relative = 1e-6,
        );
    }
}
