//! The water body that ties meshes, ripples and reflection together.

use crate::core::types::{Mat4, Result, Vec2, Vec3};
use crate::core::Error;
use crate::reflection::ReflectionCameraController;
use crate::ripple::{
    ContactRipple, Ripple, RippleSimulationDriver, ShaderParam, ShaderParams, SharedRippleQueue, SimulationEngine,
};
use crate::surface::{SurfaceConfig, SurfaceMeshBuilder, SurfaceMeshes};

use super::config::WaterConfig;
use super::uniforms::WaterUniforms;

/// An interactive water body.
///
/// Owns the generated meshes, the pending ripples and the driver. The
/// simulation engine is optional: without one, contacts still queue up but
/// ticks do nothing.
///
/// Pending ripples live in a [`SharedRippleQueue`]. Threads that already
/// know the UV of a contact can enqueue through [`ripple_queue`](Self::ripple_queue);
/// world-space contacts need [`world_to_uv`](Self::world_to_uv) and go
/// through the thread that owns the surface.
pub struct WaterSurface<E: SimulationEngine> {
    config: WaterConfig,
    world_from_local: Mat4,
    local_from_world: Mat4,
    meshes: Option<SurfaceMeshes>,
    queue: SharedRippleQueue,
    driver: RippleSimulationDriver,
    engine: Option<E>,
    engine_ready: bool,
    uniforms: WaterUniforms,
    reflection: ReflectionCameraController,
}

impl<E: SimulationEngine> WaterSurface<E> {
    /// Create an uninitialized water body at the world origin
    pub fn new(config: WaterConfig, engine: Option<E>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            world_from_local: Mat4::IDENTITY,
            local_from_world: Mat4::IDENTITY,
            meshes: None,
            queue: SharedRippleQueue::new(),
            driver: RippleSimulationDriver::from_config(&config.simulation),
            engine,
            engine_ready: false,
            uniforms: WaterUniforms::default(),
            reflection: ReflectionCameraController::new(config.reflection, Vec3::ZERO),
        })
    }

    /// Generate the meshes, publish the mesh depth and reset the engine.
    ///
    /// Fails with [`Error::InvalidConfiguration`] if the surface
    /// configuration cannot produce a mesh; the previous meshes (if any)
    /// are kept in that case.
    pub fn initialize(&mut self) -> Result<()> {
        let meshes = SurfaceMeshBuilder::generate(self.config.surface)?;
        let depth = meshes.config.depth();

        self.uniforms.set_float(ShaderParam::WaterMeshDepth, depth);
        if let Some(engine) = self.engine.as_mut() {
            engine.set_float(ShaderParam::WaterMeshDepth, depth);
            engine.initialize();
            self.engine_ready = true;
        } else {
            log::warn!("Water surface initialized without a simulation engine");
        }

        self.meshes = Some(meshes);
        log::info!(
            "Water surface initialized: {}x{} top, front height {}",
            self.config.surface.width(),
            depth,
            self.config.surface.front_height
        );
        Ok(())
    }

    /// Rebuild the meshes for a new surface configuration.
    ///
    /// Pending ripples and wave state are kept.
    pub fn regenerate(&mut self, surface: SurfaceConfig) -> Result<()> {
        let meshes = SurfaceMeshBuilder::generate(surface)?;
        let depth = meshes.config.depth();

        self.uniforms.set_float(ShaderParam::WaterMeshDepth, depth);
        if let Some(engine) = self.engine.as_mut() {
            engine.set_float(ShaderParam::WaterMeshDepth, depth);
        }

        self.config.surface = surface;
        self.meshes = Some(meshes);
        Ok(())
    }

    /// Attach (or replace) the simulation engine; call [`initialize`](Self::initialize) afterwards
    pub fn set_engine(&mut self, engine: E) {
        self.engine = Some(engine);
        self.engine_ready = false;
    }

    /// Place the water body in the world. The local origin is the corner of
    /// the top grid on the front edge.
    pub fn set_transform(&mut self, world_from_local: Mat4) {
        self.world_from_local = world_from_local;
        self.local_from_world = world_from_local.inverse();
        self.reflection
            .set_surface_point(world_from_local.transform_point3(Vec3::ZERO));
    }

    pub fn transform(&self) -> Mat4 {
        self.world_from_local
    }

    /// Surface UV under a world position: `u = x / width`, `v = 1 - z / depth`
    /// in the water's local space. Not clamped; points off the surface map
    /// outside `[0, 1]`.
    pub fn world_to_uv(&self, world_position: Vec3) -> Result<Vec2> {
        let Some(meshes) = &self.meshes else {
            return Err(Error::NotInitialized("water meshes"));
        };

        let local = self.local_from_world.transform_point3(world_position);
        Ok(Vec2::new(
            local.x / meshes.config.width(),
            1.0 - local.z / meshes.config.depth(),
        ))
    }

    /// Queue a ripple at a world-space contact point.
    ///
    /// Strength is passed through as given; the driver attenuates it when
    /// the ripple is applied.
    pub fn create_contact_ripple_at(
        &mut self,
        world_position: Vec3,
        strength: f32,
        direction_up: bool,
    ) -> Result<Ripple> {
        let center_uv = self.world_to_uv(world_position)?;
        let ripple = Ripple::new(center_uv, strength, direction_up);
        self.queue.enqueue(ripple);

        log::trace!(
            "Queued ripple at uv ({:.3}, {:.3}), {} pending",
            center_uv.x,
            center_uv.y,
            self.queue.len()
        );
        Ok(ripple)
    }

    /// Queue a ripple for a resolved contact
    pub fn handle_contact(&mut self, contact: ContactRipple) -> Result<Ripple> {
        self.create_contact_ripple_at(contact.world_position, contact.strength, contact.direction_up)
    }

    /// Advance the simulation by one fixed tick, applying at most one ripple.
    ///
    /// Without an initialized engine this is a no-op and the queue is left
    /// alone.
    pub fn fixed_tick(&mut self) -> Option<Ripple> {
        let engine = match self.engine.as_mut() {
            Some(engine) if self.engine_ready => engine,
            _ => {
                log::debug!("Ripple tick skipped: simulation engine not ready");
                return None;
            }
        };

        let applied = self.driver.tick(&mut self.queue.lock(), engine);
        if let Some(ripple) = &applied {
            self.uniforms
                .set_float(ShaderParam::ImpactHeight, RippleSimulationDriver::impact_height(ripple.strength));
        }
        applied
    }

    pub fn config(&self) -> &WaterConfig {
        &self.config
    }

    pub fn meshes(&self) -> Option<&SurfaceMeshes> {
        self.meshes.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.meshes.is_some()
    }

    /// Handle to the pending ripple queue, usable from other threads
    pub fn ripple_queue(&self) -> SharedRippleQueue {
        self.queue.clone()
    }

    /// Consume ripples from `queue` instead. Ripples still pending in the
    /// current queue stay there.
    pub fn set_ripple_queue(&mut self, queue: SharedRippleQueue) {
        self.queue = queue;
    }

    pub fn pending_ripples(&self) -> usize {
        self.queue.len()
    }

    pub fn driver(&self) -> &RippleSimulationDriver {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut RippleSimulationDriver {
        &mut self.driver
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    pub fn uniforms(&self) -> &WaterUniforms {
        &self.uniforms
    }

    pub fn reflection(&self) -> &ReflectionCameraController {
        &self.reflection
    }

    pub fn reflection_mut(&mut self) -> &mut ReflectionCameraController {
        &mut self.reflection
    }
}
