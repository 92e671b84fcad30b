//! Expanse Observe - What the observer at the origin sees
//!
//! This crate implements the observation side of the simulator:
//! - SpaceObject: fixed comoving position, physical position derived
//! - LightDelaySolver: emission time of the light arriving now
//! - ObserverProjector: present / emitted / apparent positions per object
//! - SpaceTime: objects + expansion model behind one stepping interface

pub mod object;
pub mod projector;
pub mod solver;
pub mod space;

pub use object::*;
pub use projector::*;
pub use solver::*;
pub use space::*;
