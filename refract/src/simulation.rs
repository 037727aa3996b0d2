use super::*;

use alloc::vec::Vec;

/// The region a ray may occupy before it is culled.
///
/// The predicate matches the scene window: past the right edge, or outside
/// the vertical extent, a ray is gone. The left edge never culls, rays are
/// launched travelling rightward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: Float,
    pub height: Float,
}

impl Viewport {
    #[inline]
    pub fn contains(&self, point: &Vector) -> bool {
        point.x <= self.width && 0.0 <= point.y && point.y <= self.height
    }
}

/// Owns the active rays and drives them through the fibre, one fixed step at
/// a time.
#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    fibre: Fibre,
    indices: RefractiveIndices,
    viewport: Viewport,
    probe: Float,
    rays: Vec<LightRay>,
}

impl Simulation {
    /// `probe` is how far ahead of each ray's position the boundary test
    /// reaches, in scene units.
    #[inline]
    pub fn new(
        fibre: Fibre,
        indices: RefractiveIndices,
        viewport: Viewport,
        probe: Float,
    ) -> Self {
        Self {
            fibre,
            indices,
            viewport,
            probe,
            rays: Vec::new(),
        }
    }

    #[inline]
    pub fn spawn(&mut self, ray: LightRay) {
        self.rays.push(ray);
    }

    /// Advance every ray by one step, then drop the ones that left the
    /// viewport. Culling only runs after the whole update pass.
    pub fn tick(&mut self) {
        for ray in &mut self.rays {
            ray.step(&self.fibre, &self.indices, self.probe);
        }

        let viewport = self.viewport;
        self.rays.retain(|ray| viewport.contains(&ray.position()));
    }

    /// The first active ray's angle readout, once it has one.
    #[inline]
    pub fn readout(&self) -> Option<&AngleReadout> {
        self.rays.first().and_then(LightRay::readout)
    }

    #[inline]
    pub fn rays(&self) -> &[LightRay] {
        &self.rays
    }

    #[inline]
    pub const fn fibre(&self) -> &Fibre {
        &self.fibre
    }

    #[inline]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}
