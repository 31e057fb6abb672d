//! Mathematical utilities

pub mod aabb;
pub mod plane;

pub use aabb::Aabb;
pub use plane::ReflectionPlane;
