//! Planar reflection camera.
//!
//! Each frame the observer is mirrored across the water plane and given an
//! oblique projection whose near plane is the water surface, so nothing
//! below the water leaks into the reflection texture.

pub mod controller;
pub mod oblique;
pub mod settings;

pub use controller::{ReflectionCameraController, ReflectionPose, ReflectionRenderer};
pub use oblique::oblique_projection;
pub use settings::ReflectionSettings;
