pub mod elements;
pub mod orbit;
pub mod precession;
