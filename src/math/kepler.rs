/// Convergence threshold on the eccentric-anomaly update, in radians.
const CONVERGENCE_TOLERANCE: f64 = 1e-6;

/// For a closed ellipse Newton's method always converges, so this bound only
/// trips on malformed input (e at or above 1). Callers fall back to
/// [`mean_to_eccentric_fast`] when it does.
const MAX_ITERATIONS: usize = 60;

/// Solves Kepler's equation M = E - e sin E for the eccentric anomaly.
/// Returns `None` if the iteration fails to settle, which cannot happen for
/// well-formed elliptic input.
pub fn mean_to_eccentric(mean_anomaly: f64, e: f64) -> Option<f64> {
    let mut ecc_anomaly = mean_anomaly + e / 2.0;

    for _ in 0..MAX_ITERATIONS {
        let delta = (ecc_anomaly - e * ecc_anomaly.sin() - mean_anomaly)
            / (1.0 - e * ecc_anomaly.cos());
        ecc_anomaly -= delta;

        if delta.abs() < CONVERGENCE_TOLERANCE {
            return Some(ecc_anomaly);
        }
    }

    None
}

/// The cheap variant: exactly two Newton steps starting from E = M, no
/// convergence test. Good enough for bulk scatter populations where the
/// error stays below a pixel.
pub fn mean_to_eccentric_fast(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc_anomaly = mean_anomaly;
    for _ in 0..2 {
        ecc_anomaly -= (ecc_anomaly - e * ecc_anomaly.sin() - mean_anomaly)
            / (1.0 - e * ecc_anomaly.cos());
    }
    ecc_anomaly
}

pub fn eccentric_to_mean(eccentric_anomaly: f64, e: f64) -> f64 {
    assert!(e < 1.0);
    eccentric_anomaly - e * eccentric_anomaly.sin()
}

pub fn eccentric_to_true(eccentric_anomaly: f64, e: f64) -> f64 {
    // We have that tan(theta/2) = sqrt((1+e)/(1-e)) * tan(E/2)
    let tan_half_ecc = (eccentric_anomaly / 2.0).tan();
    let tan_half_theta = tan_half_ecc * ((1.0 + e) / (1.0 - e)).sqrt();
    2.0 * tan_half_theta.atan()
}
