//! Interactive water body: meshes, ripple pipeline and material parameters.
//!
//! [`WaterSurface`] is the entry point. Build it from a [`WaterConfig`],
//! call [`initialize`](WaterSurface::initialize), feed contacts through
//! [`create_contact_ripple_at`](WaterSurface::create_contact_ripple_at) and
//! call [`fixed_tick`](WaterSurface::fixed_tick) at a fixed rate.

pub mod config;
pub mod surface;
pub mod uniforms;

pub use config::WaterConfig;
pub use surface::WaterSurface;
pub use uniforms::WaterUniforms;
