use std::{error::Error, fmt, io};

/// Everything that can go wrong while loading a catalog or retargeting the
/// selection slot. All of these are load/mutation-time failures; numerical
/// faults during a tick are handled per-body with a solver fallback and
/// never surface here.
#[derive(Debug)]
pub enum OrreryError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    DuplicateName { name: String },
    UnknownParent { body: String, parent: String },
    CyclicHierarchy { body: String },
    MissingRoot,
    MultipleRoots { first: String, second: String },
    MissingElements { body: String },
    MalformedElements { body: String },
    OpenOrbit { body: String, eccentricity: f64 },
    MissingParentMass { body: String, parent: String },
    MultipleSelectionSlots { first: String, second: String },
    NoSelectionSlot,
}

impl fmt::Display for OrreryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrreryError::IoError(e) => write!(f, "I/O error: {}", e),
            OrreryError::JsonError(e) => write!(f, "Catalog parsing error: {}", e),
            OrreryError::DuplicateName { name } => {
                write!(f, "Catalog lists {} twice", name)
            }
            OrreryError::UnknownParent { body, parent } => {
                write!(f, "Body {} orbits {}, which is not in the catalog", body, parent)
            }
            OrreryError::CyclicHierarchy { body } => {
                write!(f, "Parent chain of {} never reaches the root star", body)
            }
            OrreryError::MissingRoot => write!(f, "Catalog contains no root star"),
            OrreryError::MultipleRoots { first, second } => {
                write!(f, "Catalog contains two roots: {} and {}", first, second)
            }
            OrreryError::MissingElements { body } => {
                write!(f, "Body {} has no orbital elements", body)
            }
            OrreryError::MalformedElements { body } => {
                write!(f, "Orbital elements of {} are not finite and positive", body)
            }
            OrreryError::OpenOrbit { body, eccentricity } => {
                write!(
                    f,
                    "Body {} has eccentricity {}, only closed ellipses are supported",
                    body, eccentricity
                )
            }
            OrreryError::MissingParentMass { body, parent } => {
                write!(f, "Body {} needs the mass of {} to derive its mean motion", body, parent)
            }
            OrreryError::MultipleSelectionSlots { first, second } => {
                write!(f, "Both {} and {} claim the selection slot", first, second)
            }
            OrreryError::NoSelectionSlot => write!(f, "Catalog designates no selection slot"),
        }
    }
}

impl Error for OrreryError {}

// Implement `From<T>` conversions for automatic error mapping
impl From<io::Error> for OrreryError {
    fn from(err: io::Error) -> Self {
        OrreryError::IoError(err)
    }
}

impl From<serde_json::Error> for OrreryError {
    fn from(err: serde_json::Error) -> Self {
        OrreryError::JsonError(err)
    }
}
