use nalgebra::Vector3;
use serde::Deserialize;

use crate::astro::elements::{MeanMotionPolicy, OrbitalElementSet, PhysicalProperties};
use crate::astro::precession::PrecessionRates;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

/// Resolved once at load time; nothing downstream re-infers a body's role
/// from ad-hoc flag checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
    MinorBody,
    Barycenter,
}

/// Scene-space state, written exactly once per tick by the composer and
/// read by children and the renderer afterwards. Never serialized.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub true_anomaly: f64,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub name: String,
    pub kind: BodyKind,
    /// Binary-pair members orbit a shared barycenter on a fitted rate.
    pub binary_member: bool,
    pub elements: OrbitalElementSet,
    pub physical: Option<PhysicalProperties>,
    pub precession: Option<PrecessionRates>,
    /// Index-based; the root star points at itself.
    pub parent: BodyID,
    pub(crate) policy: MeanMotionPolicy,
    pub(crate) state: BodyState,
}

impl Body {
    pub fn is_root(&self) -> bool {
        self.parent == self.id
    }

    /// Gravitational parameter, zero for barycenters and other bodies with
    /// no physical record.
    pub fn mu(&self) -> f64 {
        self.physical.as_ref().map_or(0.0, PhysicalProperties::mu)
    }

    pub fn state(&self) -> &BodyState {
        &self.state
    }

    pub fn policy(&self) -> MeanMotionPolicy {
        self.policy
    }
}
