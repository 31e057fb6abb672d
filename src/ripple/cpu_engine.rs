//! CPU reference implementation of [`SimulationEngine`].
//!
//! A double-buffered height field. Each texel stores its current and
//! previous height; the smoothing pass runs a damped discrete wave step and
//! the impulse passes nudge heights inside a zone. Good enough to preview
//! ripples and to test the driver without a GPU.

use rayon::prelude::*;

use crate::core::types::{UVec2, Vec2};

use super::config::SimulationConfig;
use super::engine::{ShaderParam, ShaderParams, SimulationEngine};
use super::zone::{SimulationPass, UpdateZone};

/// `[height, previous_height]`
type Texel = [f32; 2];

/// Inclusive-exclusive texel rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TexelRect {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

fn texel_count(size: UVec2) -> usize {
    size.x as usize * size.y as usize
}

pub struct CpuRippleEngine {
    size: UVec2,
    damping: f32,
    buffers: [Vec<Texel>; 2],
    /// Index of the buffer holding the latest state
    front: usize,
    /// Back buffer already holds partial results from a non-swapping zone
    back_dirty: bool,
    zones: Vec<UpdateZone>,
    impact_height: f32,
    iterations: u64,
}

impl CpuRippleEngine {
    /// Create an engine with a `size` texel field (each axis at least 1)
    pub fn new(size: UVec2, damping: f32) -> Self {
        let size = size.max(UVec2::ONE);
        let len = texel_count(size);
        Self {
            size,
            damping,
            buffers: [vec![[0.0; 2]; len], vec![[0.0; 2]; len]],
            front: 0,
            back_dirty: false,
            zones: Vec::new(),
            impact_height: 0.0,
            iterations: 0,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.texture_size, config.damping)
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn impact_height(&self) -> f32 {
        self.impact_height
    }

    /// Total iterations run since the last [`initialize`](SimulationEngine::initialize)
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Zones currently applied by [`update`](SimulationEngine::update)
    pub fn zones(&self) -> &[UpdateZone] {
        &self.zones
    }

    /// Current heights, row-major, row 0 at v = 0
    pub fn heights(&self) -> Vec<f32> {
        self.buffers[self.front].iter().map(|t| t[0]).collect()
    }

    /// Height of the texel containing `uv` (clamped to the texture)
    pub fn height_at(&self, uv: Vec2) -> f32 {
        let x = ((uv.x * self.size.x as f32) as i64).clamp(0, self.size.x as i64 - 1) as usize;
        let y = ((uv.y * self.size.y as f32) as i64).clamp(0, self.size.y as i64 - 1) as usize;
        self.buffers[self.front][y * self.size.x as usize + x][0]
    }

    /// Largest absolute height in the field
    pub fn max_amplitude(&self) -> f32 {
        self.buffers[self.front]
            .par_iter()
            .map(|t| t[0].abs())
            .reduce(|| 0.0, f32::max)
    }

    /// Map a UV zone to texels; `None` when it misses the texture entirely.
    /// Zones smaller than a texel still cover the texel under their center.
    fn texel_rect(&self, zone: &UpdateZone) -> Option<TexelRect> {
        let (min, max) = zone.uv_rect();
        let w = self.size.x as f32;
        let h = self.size.y as f32;

        let x0 = (min.x * w).floor();
        let y0 = (min.y * h).floor();
        let x1 = (max.x * w).ceil().max(x0 + 1.0);
        let y1 = (max.y * h).ceil().max(y0 + 1.0);

        let x0 = x0.clamp(0.0, w) as usize;
        let y0 = y0.clamp(0.0, h) as usize;
        let x1 = x1.clamp(0.0, w) as usize;
        let y1 = y1.clamp(0.0, h) as usize;

        (x0 < x1 && y0 < y1).then_some(TexelRect { x0, y0, x1, y1 })
    }

    fn run_zone(&mut self, zone: &UpdateZone) {
        let Some(rect) = self.texel_rect(zone) else {
            log::trace!("Skipping off-texture zone at {:?}", zone.center);
            return;
        };

        let width = self.size.x as usize;
        let height = self.size.y as usize;
        let damping = self.damping;
        let impact = self.impact_height;
        let back_dirty = self.back_dirty;

        let (front, back) = {
            let (a, b) = self.buffers.split_at_mut(1);
            if self.front == 0 {
                (&a[0], &mut b[0])
            } else {
                (&b[0], &mut a[0])
            }
        };

        // Texels outside the zone carry over unchanged
        if !back_dirty {
            back.copy_from_slice(front);
        }

        let pass = zone.pass;
        back[rect.y0 * width..rect.y1 * width]
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out)| {
                let y = rect.y0 + row;
                for x in rect.x0..rect.x1 {
                    let [h, prev] = front[y * width + x];
                    out[x] = match pass {
                        SimulationPass::Smoothing => {
                            let sample = |sx: usize, sy: usize| front[sy * width + sx][0];
                            let neighbours = sample(x.saturating_sub(1), y)
                                + sample((x + 1).min(width - 1), y)
                                + sample(x, y.saturating_sub(1))
                                + sample(x, (y + 1).min(height - 1));
                            [(neighbours * 0.5 - prev) * damping, h]
                        }
                        SimulationPass::ImpulseUp => [h + impact, prev],
                        SimulationPass::ImpulseDown => [h - impact, prev],
                    };
                }
            });

        if zone.needs_buffer_swap {
            self.swap();
        } else {
            self.back_dirty = true;
        }
    }

    fn swap(&mut self) {
        self.front ^= 1;
        self.back_dirty = false;
    }
}

impl ShaderParams for CpuRippleEngine {
    fn set_float(&mut self, param: ShaderParam, value: f32) {
        match param {
            ShaderParam::ImpactHeight => self.impact_height = value,
            ShaderParam::WaterMeshDepth => {}
        }
    }
}

impl SimulationEngine for CpuRippleEngine {
    fn initialize(&mut self) {
        for buffer in &mut self.buffers {
            buffer.fill([0.0; 2]);
        }
        self.front = 0;
        self.back_dirty = false;
        self.zones.clear();
        self.iterations = 0;
        log::debug!("CPU ripple engine initialized ({}x{})", self.size.x, self.size.y);
    }

    fn clear_update_zones(&mut self) {
        self.zones.clear();
    }

    fn set_update_zones(&mut self, zones: &[UpdateZone]) {
        self.zones = zones.to_vec();
    }

    fn update(&mut self, iterations: u32) {
        let zones = if self.zones.is_empty() {
            vec![UpdateZone::full_surface()]
        } else {
            self.zones.clone()
        };

        for _ in 0..iterations {
            for zone in &zones {
                self.run_zone(zone);
            }
            if self.back_dirty {
                self.swap();
            }
            self.iterations += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> CpuRippleEngine {
        let mut engine = CpuRippleEngine::new(UVec2::splat(32), 0.98);
        engine.initialize();
        engine
    }

    #[test]
    fn test_texel_count_wide() {
        assert_eq!(texel_count(UVec2::new(256, 128)), 32_768);
        assert_eq!(texel_count(UVec2::splat(70_000)) as u64, 4_900_000_000);
    }

    #[test]
    fn test_flat_field_stays_flat() {
        let mut engine = engine();
        engine.update(10);
        assert_eq!(engine.max_amplitude(), 0.0);
        assert_eq!(engine.iterations(), 10);
    }

    #[test]
    fn test_impulse_raises_center() {
        let mut engine = engine();
        engine.set_float(ShaderParam::ImpactHeight, 0.1);
        let center = Vec2::new(0.5, 0.5);
        engine.set_update_zones(&[UpdateZone::impact(center, Vec2::splat(0.01), true)]);
        engine.update(1);

        assert!((engine.height_at(center) - 0.1).abs() < 1e-6);
        assert_eq!(engine.height_at(Vec2::new(0.1, 0.1)), 0.0);
    }

    #[test]
    fn test_impulse_down_depresses() {
        let mut engine = engine();
        engine.set_float(ShaderParam::ImpactHeight, 0.2);
        let center = Vec2::new(0.25, 0.75);
        engine.set_update_zones(&[UpdateZone::impact(center, Vec2::splat(0.01), false)]);
        engine.update(2);
        assert!((engine.height_at(center) + 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_wave_spreads_and_decays() {
        let mut engine = engine();
        engine.set_float(ShaderParam::ImpactHeight, 0.2);
        let center = Vec2::splat(0.5);
        engine.set_update_zones(&[
            UpdateZone::full_surface(),
            UpdateZone::impact(center, Vec2::splat(0.01), true),
        ]);
        engine.update(5);
        engine.clear_update_zones();

        engine.update(8);
        // Energy reaches texels a few cells away
        assert!(engine.height_at(Vec2::new(0.5 + 4.0 / 32.0, 0.5)).abs() > 0.0);

        let early = engine.max_amplitude();
        engine.update(400);
        let late = engine.max_amplitude();
        assert!(late < early, "amplitude should decay: {early} -> {late}");
    }

    #[test]
    fn test_off_texture_zone_ignored() {
        let mut engine = engine();
        engine.set_float(ShaderParam::ImpactHeight, 1.0);
        engine.set_update_zones(&[UpdateZone::impact(Vec2::new(3.0, -2.0), Vec2::splat(0.01), true)]);
        engine.update(3);
        assert_eq!(engine.max_amplitude(), 0.0);
    }

    #[test]
    fn test_non_swapping_zones_share_input() {
        let mut engine = engine();
        engine.set_float(ShaderParam::ImpactHeight, 0.5);
        let a = Vec2::new(0.2, 0.2);
        let b = Vec2::new(0.8, 0.8);
        let mut za = UpdateZone::impact(a, Vec2::splat(0.01), true);
        let mut zb = UpdateZone::impact(b, Vec2::splat(0.01), true);
        za.needs_buffer_swap = false;
        zb.needs_buffer_swap = false;
        engine.set_update_zones(&[za, zb]);
        engine.update(1);

        // Both writes land in the same back buffer and survive the swap
        assert!((engine.height_at(a) - 0.5).abs() < 1e-6);
        assert!((engine.height_at(b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_initialize_resets() {
        let mut engine = engine();
        engine.set_float(ShaderParam::ImpactHeight, 0.3);
        engine.set_update_zones(&[UpdateZone::impact(Vec2::splat(0.5), Vec2::splat(0.01), true)]);
        engine.update(4);
        assert!(engine.max_amplitude() > 0.0);

        engine.initialize();
        assert_eq!(engine.max_amplitude(), 0.0);
        assert!(engine.zones().is_empty());
        assert_eq!(engine.iterations(), 0);
    }
}
