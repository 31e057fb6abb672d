//! Turning resolved contacts into ripple parameters.
//!
//! Collision and pointer picking happen elsewhere; this only decides how
//! hard and in which direction a contact disturbs the surface.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::types::Vec3;

/// Strength range for generated contacts
pub const CONTACT_STRENGTH_RANGE: Range<f32> = 0.2..0.6;

/// Pointer button that produced a contact
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Pushes the surface up
    Primary,
    /// Pushes the surface down
    Secondary,
}

/// A contact ready for [`WaterSurface::create_contact_ripple_at`](crate::water::WaterSurface::create_contact_ripple_at)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactRipple {
    pub world_position: Vec3,
    pub strength: f32,
    pub direction_up: bool,
}

/// Random strength and direction for contacts, from a seedable RNG.
pub struct ContactRippleGenerator<R: Rng = StdRng> {
    rng: R,
}

impl ContactRippleGenerator<StdRng> {
    /// Deterministic generator
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> ContactRippleGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn strength(&mut self) -> f32 {
        self.rng.gen_range(CONTACT_STRENGTH_RANGE)
    }

    /// A body entering the water. Rising bodies push up, sinking ones push
    /// down; without a velocity the direction is a coin flip.
    pub fn body_contact(&mut self, world_position: Vec3, vertical_velocity: Option<f32>) -> ContactRipple {
        let direction_up = match vertical_velocity {
            Some(vy) => vy > 0.0,
            None => self.rng.gen_bool(0.5),
        };
        ContactRipple {
            world_position,
            strength: self.strength(),
            direction_up,
        }
    }

    /// A pointer click that hit the surface
    pub fn pointer_contact(&mut self, world_position: Vec3, button: PointerButton) -> ContactRipple {
        ContactRipple {
            world_position,
            strength: self.strength(),
            direction_up: button == PointerButton::Primary,
        }
    }
}
