mod body;
mod clock;
mod orrery;
mod swarm;

pub use body::{Body, BodyID, BodyKind, BodyState};
pub use clock::{julian_centuries_since_j2000, SimulationClock};
pub use orrery::{BodyRecord, Orrery};
pub use swarm::MinorBodyField;
