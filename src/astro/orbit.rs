use nalgebra::Vector3;

use super::elements::OrbitalElementSet;
use crate::consts::{mean_motion, LENGTH_SCALE};
use crate::math::kepler;

/// Parent-relative Cartesian state in the ecliptic frame, meters and meters
/// per second. `true_anomaly` rides along for orbit-marker shaders.
#[derive(Debug, Clone, Copy)]
pub struct OrbitalState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub true_anomaly: f64,
}

/// Perifocal basis: P points at periapsis, Q a quarter orbit ahead of it.
/// This is the standard three-rotation matrix (argument of periapsis,
/// inclination, ascending node) with only the two columns we need.
fn perifocal_basis(elements: &OrbitalElementSet) -> (Vector3<f64>, Vector3<f64>) {
    let (sin_w, cos_w) = elements.arg_periapsis_deg.to_radians().sin_cos();
    let (sin_o, cos_o) = elements.ascending_node_deg.to_radians().sin_cos();
    let (sin_i, cos_i) = elements.inclination_deg.to_radians().sin_cos();

    let p = Vector3::new(
        cos_w * cos_o - sin_w * sin_o * cos_i,
        cos_w * sin_o + sin_w * cos_o * cos_i,
        sin_w * sin_i,
    );
    let q = Vector3::new(
        -sin_w * cos_o - cos_w * sin_o * cos_i,
        -sin_w * sin_o + cos_w * cos_o * cos_i,
        cos_w * sin_i,
    );
    (p, q)
}

/// Both solver variants funnel through this one rotation path; precise and
/// bulk-rendered bodies must never diverge visually.
fn assemble(elements: &OrbitalElementSet, x_w: f64, y_w: f64) -> Vector3<f64> {
    let (p, q) = perifocal_basis(elements);
    x_w * p + y_w * q
}

fn in_plane_position(elements: &OrbitalElementSet, ecc_anomaly: f64) -> (f64, f64) {
    let a = elements.semi_major_axis;
    let e = elements.eccentricity;
    let b = a * (1.0 - e * e).sqrt();
    (a * (ecc_anomaly.cos() - e), b * ecc_anomaly.sin())
}

/// The accurate variant: converged eccentric anomaly, position and velocity.
/// Returns `None` when Kepler's equation fails to converge, i.e. the element
/// table was malformed; callers are expected to fall back to
/// [`propagate_fast`] for that body rather than take the scene down.
pub fn propagate(
    elements: &OrbitalElementSet,
    parent_mu: f64,
    mean_anomaly: f64,
) -> Option<OrbitalState> {
    let e = elements.eccentricity;
    let ecc_anomaly = kepler::mean_to_eccentric(mean_anomaly, e)?;

    let a = elements.semi_major_axis;
    let b = a * (1.0 - e * e).sqrt();
    let (sin_e, cos_e) = ecc_anomaly.sin_cos();
    let (x_w, y_w) = in_plane_position(elements, ecc_anomaly);

    // Differentiating Kepler's equation: E' = n / (1 - e cos E)
    let ecc_rate = mean_motion(a, parent_mu) / (1.0 - e * cos_e);

    Some(OrbitalState {
        position: assemble(elements, x_w, y_w),
        velocity: assemble(elements, -a * sin_e * ecc_rate, b * cos_e * ecc_rate),
        true_anomaly: y_w.atan2(x_w),
    })
}

/// The cheap variant for bulk populations: two fixed Newton steps, position
/// only.
pub fn propagate_fast(elements: &OrbitalElementSet, mean_anomaly: f64) -> Vector3<f64> {
    let ecc_anomaly = kepler::mean_to_eccentric_fast(mean_anomaly, elements.eccentricity);
    let (x_w, y_w) = in_plane_position(elements, ecc_anomaly);
    assemble(elements, x_w, y_w)
}

/// Remaps a solver-frame vector into scene space. The axis swap, negation
/// and scale are a hard contract with the renderer; changing any of them
/// silently rotates or mirrors the whole system against external RA/Dec
/// references.
pub fn remap_to_scene(v: Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x, v.z, -v.y) / LENGTH_SCALE
}
