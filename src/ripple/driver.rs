//! Per-tick orchestration of the simulation engine.

use crate::core::types::Vec2;

use super::config::SimulationConfig;
use super::engine::{ShaderParam, SimulationEngine};
use super::queue::{Ripple, RippleQueue};
use super::zone::UpdateZone;

/// Ripple strength is divided by this before it reaches the impulse pass.
///
/// Empirical tuning value; changing it changes how tall ripples look.
pub const IMPACT_STRENGTH_ATTENUATION: f32 = 5.0;

/// UV footprint of the impulse zone. Empirical tuning value.
pub const IMPACT_ZONE_SIZE: Vec2 = Vec2::splat(0.01);

/// Drives a [`SimulationEngine`] from a [`RippleQueue`], one fixed tick at a time.
///
/// At most one ripple is consumed per tick regardless of how many are
/// queued. Bursts of contacts are spread over consecutive ticks, which
/// keeps per-tick submission cost constant at the price of latency.
#[derive(Clone, Debug)]
pub struct RippleSimulationDriver {
    iterations_per_tick: u32,
    ticks: u64,
    ripples_applied: u64,
}

impl RippleSimulationDriver {
    /// Create a driver requesting `iterations_per_tick` engine steps per tick (at least one)
    pub fn new(iterations_per_tick: u32) -> Self {
        Self {
            iterations_per_tick: iterations_per_tick.max(1),
            ticks: 0,
            ripples_applied: 0,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.iterations_per_tick)
    }

    pub fn iterations_per_tick(&self) -> u32 {
        self.iterations_per_tick
    }

    pub fn set_iterations_per_tick(&mut self, iterations: u32) {
        self.iterations_per_tick = iterations.max(1);
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ripples handed to the engine so far
    pub fn ripples_applied(&self) -> u64 {
        self.ripples_applied
    }

    /// Value written to [`ShaderParam::ImpactHeight`] for a ripple of `strength`
    #[inline]
    pub fn impact_height(strength: f32) -> f32 {
        strength / IMPACT_STRENGTH_ATTENUATION
    }

    /// The full-surface smoothing zone followed by the ripple's impact zone
    pub fn zones_for(ripple: &Ripple) -> [UpdateZone; 2] {
        [
            UpdateZone::full_surface(),
            UpdateZone::impact(ripple.center_uv, IMPACT_ZONE_SIZE, ripple.direction_up),
        ]
    }

    /// Run one fixed tick.
    ///
    /// Clears last tick's zones, applies the oldest queued ripple (if any)
    /// and advances the engine. The engine advances even on an empty queue
    /// so existing waves keep propagating. Returns the ripple consumed.
    pub fn tick<E>(&mut self, queue: &mut RippleQueue, engine: &mut E) -> Option<Ripple>
    where
        E: SimulationEngine + ?Sized,
    {
        self.ticks += 1;
        engine.clear_update_zones();

        let applied = queue.dequeue();
        if let Some(ripple) = &applied {
            engine.set_float(ShaderParam::ImpactHeight, Self::impact_height(ripple.strength));
            engine.set_update_zones(&Self::zones_for(ripple));
            self.ripples_applied += 1;

            log::debug!(
                "Applying ripple at ({:.3}, {:.3}) strength {:.2} {} ({} still queued)",
                ripple.center_uv.x,
                ripple.center_uv.y,
                ripple.strength,
                if ripple.direction_up { "up" } else { "down" },
                queue.len()
            );
        }

        engine.update(self.iterations_per_tick);
        log::trace!("Ripple tick {} advanced {} iterations", self.ticks, self.iterations_per_tick);

        applied
    }
}

impl Default for RippleSimulationDriver {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}
