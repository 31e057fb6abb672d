//! Ripple event pipeline.
//!
//! Contacts become [`Ripple`]s in a FIFO [`RippleQueue`]. Every fixed tick
//! the [`RippleSimulationDriver`] takes at most one of them, turns it into
//! [`UpdateZone`]s and asks a [`SimulationEngine`] to advance the wave
//! field. The engine itself is opaque; [`CpuRippleEngine`] is a reference
//! implementation that runs on the CPU.

pub mod config;
pub mod contact;
pub mod cpu_engine;
pub mod driver;
pub mod engine;
pub mod queue;
pub mod zone;

pub use config::SimulationConfig;
pub use contact::{ContactRipple, ContactRippleGenerator, PointerButton, CONTACT_STRENGTH_RANGE};
pub use cpu_engine::CpuRippleEngine;
pub use driver::{RippleSimulationDriver, IMPACT_STRENGTH_ATTENUATION, IMPACT_ZONE_SIZE};
pub use engine::{ShaderParam, ShaderParams, SimulationEngine};
pub use queue::{Ripple, RippleQueue, SharedRippleQueue};
pub use zone::{SimulationPass, UpdateZone};
