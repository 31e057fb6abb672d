//! Ripplet - interactive 2.5D water surfaces
//!
//! Grid meshes for the top and front of a water body, a queued ripple
//! pipeline driving an external wave solver, and a mirrored camera for
//! planar reflections.

pub mod core;
pub mod math;
pub mod surface;
pub mod ripple;
pub mod reflection;
pub mod water;
