use std::collections::HashMap;

use serde::Deserialize;

use super::body::{Body, BodyID, BodyKind, BodyState};
use crate::astro::elements::{MeanMotionPolicy, OrbitalElementSet, PhysicalProperties};
use crate::astro::orbit;
use crate::astro::precession::PrecessionRates;
use crate::consts::mean_motion;
use crate::error::OrreryError;

/// One catalog entry, in whatever order the catalog lists it. The orrery
/// sorts out hierarchy and update order itself.
#[derive(Debug, Clone, Deserialize)]
pub struct BodyRecord {
    pub name: String,
    pub kind: BodyKind,
    #[serde(default)]
    pub binary_member: bool,
    #[serde(default)]
    pub selection_slot: bool,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub elements: Option<OrbitalElementSet>,
    #[serde(default)]
    pub physical: Option<PhysicalProperties>,
    #[serde(default)]
    pub precession: Option<PrecessionRates>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Pending,
    Resolved,
}

/// The body forest and its per-tick composer. Bodies live in an arena with
/// index-based parent references; the update order is a fixed topological
/// ordering computed once at load, since the hierarchy never changes shape
/// at runtime.
#[derive(Debug, Clone)]
pub struct Orrery {
    bodies: Vec<Body>,
    update_order: Vec<usize>,
    resolution: Vec<Resolution>,
    slot: Option<usize>,
}

impl Orrery {
    /// Builds and validates the whole forest. Any configuration problem is
    /// fatal here; refusing to start beats rendering NaN positions.
    pub fn from_records(records: Vec<BodyRecord>) -> Result<Self, OrreryError> {
        let mut name_to_index = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            if name_to_index.insert(record.name.clone(), index).is_some() {
                return Err(OrreryError::DuplicateName {
                    name: record.name.clone(),
                });
            }
        }

        // Identify the root: the one body with no parent (or itself as
        // parent). It anchors the scene, so it must be the star.
        let mut root: Option<usize> = None;
        for (index, record) in records.iter().enumerate() {
            let is_root = match &record.parent {
                None => true,
                Some(parent) => parent == &record.name,
            };
            if !is_root {
                continue;
            }
            if record.kind != BodyKind::Star {
                return Err(OrreryError::MissingRoot);
            }
            if let Some(first) = root {
                return Err(OrreryError::MultipleRoots {
                    first: records[first].name.clone(),
                    second: record.name.clone(),
                });
            }
            root = Some(index);
        }
        let root = root.ok_or(OrreryError::MissingRoot)?;

        // Resolve parent names to arena indices.
        let mut parents = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let parent_index = match &record.parent {
                None => index,
                Some(parent) => *name_to_index.get(parent).ok_or_else(|| {
                    OrreryError::UnknownParent {
                        body: record.name.clone(),
                        parent: parent.clone(),
                    }
                })?,
            };
            parents.push(parent_index);
        }

        // Fixed topological order: place the root, then repeatedly place
        // bodies whose parent is already placed. Anything left over sits on
        // a cycle.
        let mut placed = vec![false; records.len()];
        let mut update_order = Vec::with_capacity(records.len());
        placed[root] = true;
        update_order.push(root);
        loop {
            let before = update_order.len();
            for index in 0..records.len() {
                if !placed[index] && placed[parents[index]] {
                    placed[index] = true;
                    update_order.push(index);
                }
            }
            if update_order.len() == before {
                break;
            }
        }
        if update_order.len() != records.len() {
            let stuck = (0..records.len()).find(|&i| !placed[i]).unwrap();
            return Err(OrreryError::CyclicHierarchy {
                body: records[stuck].name.clone(),
            });
        }

        // Masses up front, so a child can find its parent's mu no matter
        // which order the catalog listed them in.
        let names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        let mus: Vec<f64> = records
            .iter()
            .map(|r| r.physical.as_ref().map_or(0.0, PhysicalProperties::mu))
            .collect();

        // Per-body validation, and the mean-anomaly policy each body will
        // use for the rest of its life.
        let mut slot: Option<usize> = None;
        let mut bodies = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let parent_index = parents[index];

            let (elements, policy) = if index == root {
                (OrbitalElementSet::unused_for_root(), MeanMotionPolicy::Fitted)
            } else {
                let elements = record.elements.ok_or_else(|| OrreryError::MissingElements {
                    body: record.name.clone(),
                })?;
                validate_elements(&record.name, &elements)?;

                let policy = if record.binary_member {
                    MeanMotionPolicy::Fitted
                } else {
                    let parent_mu = mus[parent_index];
                    if parent_mu <= 0.0 {
                        return Err(OrreryError::MissingParentMass {
                            body: record.name.clone(),
                            parent: names[parent_index].clone(),
                        });
                    }
                    if record.selection_slot {
                        MeanMotionPolicy::Precomputed {
                            rad_per_sec: mean_motion(elements.semi_major_axis, parent_mu),
                        }
                    } else {
                        MeanMotionPolicy::Derived { parent_mu }
                    }
                };
                (elements, policy)
            };

            if record.selection_slot {
                if let Some(first) = slot {
                    return Err(OrreryError::MultipleSelectionSlots {
                        first: names[first].clone(),
                        second: record.name,
                    });
                }
                slot = Some(index);
            }

            bodies.push(Body {
                id: BodyID(index),
                name: record.name,
                kind: record.kind,
                binary_member: record.binary_member,
                elements,
                physical: record.physical,
                precession: record.precession,
                parent: BodyID(parent_index),
                policy,
                state: BodyState::default(),
            });
        }

        let resolution = vec![Resolution::Pending; bodies.len()];
        Ok(Orrery {
            bodies,
            update_order,
            resolution,
            slot,
        })
    }

    /// One simulated tick: every body's scene-space state is recomputed for
    /// the given instant, parents strictly before children.
    pub fn tick(&mut self, julian_seconds: f64) {
        for resolution in self.resolution.iter_mut() {
            *resolution = Resolution::Pending;
        }
        for order_index in 0..self.update_order.len() {
            let index = self.update_order[order_index];
            self.resolve_body(index, julian_seconds);
        }
    }

    fn resolve_body(&mut self, index: usize, julian_seconds: f64) {
        if self.bodies[index].is_root() {
            // The star anchors the scene at the origin.
            self.bodies[index].state = BodyState::default();
            self.resolution[index] = Resolution::Resolved;
            return;
        }

        let parent_index = self.bodies[index].parent.0;
        if self.resolution[parent_index] != Resolution::Resolved {
            // Can't happen while update_order is honored.
            debug_assert!(
                false,
                "{} resolved before its parent",
                self.bodies[index].name
            );
            log::error!(
                "{} ticked before its parent; keeping last known state",
                self.bodies[index].name
            );
            return;
        }
        let parent_state = *self.bodies[parent_index].state();

        let body = &mut self.bodies[index];
        let mean_anomaly = body.elements.mean_anomaly_at(body.policy, julian_seconds);

        match orbit::propagate(&body.elements, effective_mu(body), mean_anomaly) {
            Some(state) => {
                body.state.position =
                    orbit::remap_to_scene(state.position) + parent_state.position;
                body.state.velocity =
                    orbit::remap_to_scene(state.velocity) + parent_state.velocity;
                body.state.true_anomaly = state.true_anomaly;
            }
            None => {
                // One bad body must not take the scene down. Position comes
                // from the fixed-iteration solver; velocity and phase keep
                // their last-tick values.
                log::warn!(
                    "Kepler iteration did not converge for {}; using the fixed-iteration solver this tick",
                    body.name
                );
                let relative = orbit::propagate_fast(&body.elements, mean_anomaly);
                body.state.position = orbit::remap_to_scene(relative) + parent_state.position;
            }
        }
        self.resolution[index] = Resolution::Resolved;
    }

    /// Overwrites the selection slot with a new catalog record. The slot's
    /// previous elements survive any validation failure untouched.
    pub fn retarget_slot(
        &mut self,
        name: &str,
        elements: OrbitalElementSet,
    ) -> Result<BodyID, OrreryError> {
        let index = self.slot.ok_or(OrreryError::NoSelectionSlot)?;
        validate_elements(name, &elements)?;

        let parent_index = self.bodies[index].parent.0;
        let parent_mu = self.bodies[parent_index].mu();
        let rad_per_sec = mean_motion(elements.semi_major_axis, parent_mu);

        let body = &mut self.bodies[index];
        body.name = name.to_owned();
        body.elements = elements;
        body.policy = MeanMotionPolicy::Precomputed { rad_per_sec };
        Ok(body.id)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter()
    }

    pub fn get_body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    pub fn get_parent(&self, id: BodyID) -> &Body {
        self.get_body(self.get_body(id).parent)
    }

    pub fn body_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|body| body.name == name)
    }

    pub fn root(&self) -> &Body {
        // from_records guarantees the first entry of the update order is
        // the root star.
        &self.bodies[self.update_order[0]]
    }

    pub fn selection_slot(&self) -> Option<&Body> {
        self.slot.map(|index| &self.bodies[index])
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// The gravitational parameter handed to the solver. For fitted and
/// precomputed rates this is the mu that reproduces the rate, so the
/// velocity derivative stays consistent with the clock policy.
fn effective_mu(body: &Body) -> f64 {
    let a = body.elements.semi_major_axis;
    match body.policy {
        MeanMotionPolicy::Derived { parent_mu } => parent_mu,
        MeanMotionPolicy::Precomputed { rad_per_sec } => rad_per_sec.powi(2) * a.powi(3),
        MeanMotionPolicy::Fitted => {
            let rad_per_sec = body.elements.mean_motion_coefficient.to_radians();
            rad_per_sec.powi(2) * a.powi(3)
        }
    }
}

fn validate_elements(name: &str, elements: &OrbitalElementSet) -> Result<(), OrreryError> {
    let finite = elements.eccentricity.is_finite()
        && elements.semi_major_axis.is_finite()
        && elements.inclination_deg.is_finite()
        && elements.ascending_node_deg.is_finite()
        && elements.arg_periapsis_deg.is_finite()
        && elements.epoch_julian_seconds.is_finite()
        && elements.mean_anomaly_deg.is_finite()
        && elements.mean_motion_coefficient.is_finite();

    if !finite || elements.semi_major_axis <= 0.0 || elements.eccentricity < 0.0 {
        return Err(OrreryError::MalformedElements {
            body: name.to_owned(),
        });
    }
    if elements.eccentricity >= 1.0 {
        return Err(OrreryError::OpenOrbit {
            body: name.to_owned(),
            eccentricity: elements.eccentricity,
        });
    }
    Ok(())
}

impl OrbitalElementSet {
    /// The root star never goes through the solver; its element set exists
    /// only so `Body` needn't carry an `Option`.
    fn unused_for_root() -> Self {
        OrbitalElementSet {
            eccentricity: 0.0,
            periapsis_distance: 0.0,
            inclination_deg: 0.0,
            ascending_node_deg: 0.0,
            arg_periapsis_deg: 0.0,
            epoch_julian_seconds: 0.0,
            mean_motion_coefficient: 0.0,
            mean_anomaly_deg: 0.0,
            true_anomaly_deg: 0.0,
            semi_major_axis: 1.0,
            apoapsis_distance: 0.0,
            orbital_period_seconds: 0.0,
        }
    }
}
