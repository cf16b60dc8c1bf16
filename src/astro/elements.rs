use serde::Deserialize;

use crate::consts::{mean_motion, NEWTON_G};

/// The static orbital elements of one body, as they come out of the catalog.
/// Angles are stored in degrees and converted at the solver boundary, since
/// that is how every upstream element table publishes them.
///
/// `periapsis_distance`, `true_anomaly_deg`, `apoapsis_distance` and
/// `orbital_period_seconds` are informational; the solver never reads them.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OrbitalElementSet {
    pub eccentricity: f64,
    #[serde(default)]
    pub periapsis_distance: f64,
    pub inclination_deg: f64,
    pub ascending_node_deg: f64,
    pub arg_periapsis_deg: f64,
    /// Reference time for `mean_anomaly_deg`, in Julian seconds.
    pub epoch_julian_seconds: f64,
    /// Angular rate in degrees per second. Only binary-pair members carry a
    /// meaningful value here; it is a fitted rate, not derived from masses.
    #[serde(default)]
    pub mean_motion_coefficient: f64,
    pub mean_anomaly_deg: f64,
    #[serde(default)]
    pub true_anomaly_deg: f64,
    /// Meters.
    pub semi_major_axis: f64,
    #[serde(default)]
    pub apoapsis_distance: f64,
    #[serde(default)]
    pub orbital_period_seconds: f64,
}

/// How a body's mean anomaly advances with simulated time. Picked once at
/// load, never re-inferred per call.
#[derive(Debug, Clone, Copy)]
pub enum MeanMotionPolicy {
    /// Recompute sqrt(mu/a^3) from the parent's gravitational parameter on
    /// every call. Correct for any body with a massive parent.
    Derived { parent_mu: f64 },
    /// The same rate, baked at load time. Skips the square root and division
    /// per frame; this is what bulk populations use.
    Precomputed { rad_per_sec: f64 },
    /// Binary-pair members: `mean_motion_coefficient` is already the fitted
    /// degrees-per-second rate, taken at face value.
    Fitted,
}

impl OrbitalElementSet {
    /// Mean anomaly in radians at the given instant. Not wrapped to
    /// [0, 2pi); sine and cosine downstream don't care.
    pub fn mean_anomaly_at(&self, policy: MeanMotionPolicy, julian_seconds: f64) -> f64 {
        let dt = julian_seconds - self.epoch_julian_seconds;
        let rate = match policy {
            MeanMotionPolicy::Derived { parent_mu } => {
                mean_motion(self.semi_major_axis, parent_mu)
            }
            MeanMotionPolicy::Precomputed { rad_per_sec } => rad_per_sec,
            MeanMotionPolicy::Fitted => self.mean_motion_coefficient.to_radians(),
        };
        self.mean_anomaly_deg.to_radians() + rate * dt
    }
}

/// Physical (non-orbital) parameters. Absent for barycenters and other
/// point anchors.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PhysicalProperties {
    pub equatorial_diameter: f64,
    pub polar_diameter: f64,
    pub rotation_period_seconds: f64,
    #[serde(default)]
    pub atmosphere_height: f64,
    pub pole_ra_deg: f64,
    pub pole_dec_deg: f64,
    /// Kilograms.
    pub mass: f64,
    #[serde(default)]
    pub bump_scale: Option<f64>,
}

impl PhysicalProperties {
    pub fn mu(&self) -> f64 {
        NEWTON_G * self.mass
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::consts::{ASTRONOMICAL_UNIT, SECONDS_PER_DAY};

    fn circular_elements(epoch: f64) -> OrbitalElementSet {
        OrbitalElementSet {
            eccentricity: 0.0,
            periapsis_distance: ASTRONOMICAL_UNIT,
            inclination_deg: 0.0,
            ascending_node_deg: 0.0,
            arg_periapsis_deg: 0.0,
            epoch_julian_seconds: epoch,
            mean_motion_coefficient: 0.0,
            mean_anomaly_deg: 90.0,
            true_anomaly_deg: 0.0,
            semi_major_axis: ASTRONOMICAL_UNIT,
            apoapsis_distance: ASTRONOMICAL_UNIT,
            orbital_period_seconds: 0.0,
        }
    }

    #[test]
    fn test_derived_and_precomputed_policies_agree() {
        let elements = circular_elements(0.0);
        let mu = 1.32712440018e20;
        let rate = mean_motion(elements.semi_major_axis, mu);

        let t = 1000.0 * SECONDS_PER_DAY;
        assert_relative_eq!(
            elements.mean_anomaly_at(MeanMotionPolicy::Derived { parent_mu: mu }, t),
            elements.mean_anomaly_at(MeanMotionPolicy::Precomputed { rad_per_sec: rate }, t),
        );
    }

    #[test]
    fn test_fitted_policy_reads_coefficient_directly() {
        let mut elements = circular_elements(0.0);
        elements.mean_anomaly_deg = 0.0;
        // One revolution per simulated day, as a fitted rate.
        elements.mean_motion_coefficient = 360.0 / SECONDS_PER_DAY;

        let after_one_day =
            elements.mean_anomaly_at(MeanMotionPolicy::Fitted, SECONDS_PER_DAY);
        assert_relative_eq!(after_one_day, std::f64::consts::TAU, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_anomaly_counts_from_epoch() {
        let epoch = 123_456.0;
        let elements = circular_elements(epoch);
        let at_epoch = elements.mean_anomaly_at(MeanMotionPolicy::Fitted, epoch);
        assert_relative_eq!(at_epoch, 90.0_f64.to_radians());
    }
}
