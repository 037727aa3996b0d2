#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub use nalgebra;

use nalgebra::{ComplexField, RealField, SVector};

mod simulation;

pub use simulation::{Simulation, Viewport};

pub type Float = f64;

/// A position or velocity in screen coordinates: `y` grows downward.
pub type Vector = SVector<Float, 2>;

use core::f64::consts::PI;

#[inline]
pub fn deg_to_rad(degrees: Float) -> Float {
    degrees * PI / 180.0
}

#[inline]
pub fn rad_to_deg(radians: Float) -> Float {
    radians * 180.0 / PI
}

/// The fibre core: the horizontal strip between two boundary lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fibre {
    top: Float,
    bottom: Float,
}

impl Fibre {
    /// Returns `None` unless `top` lies strictly above `bottom` on screen,
    /// i. e. `top < bottom`.
    #[inline]
    pub fn try_new(top: Float, bottom: Float) -> Option<Self> {
        (top < bottom).then_some(Self { top, bottom })
    }

    #[inline]
    pub const fn top(&self) -> Float {
        self.top
    }

    #[inline]
    pub const fn bottom(&self) -> Float {
        self.bottom
    }

    /// The y-coordinate halfway between the two boundaries.
    #[inline]
    pub fn midline(&self) -> Float {
        (self.top + self.bottom) / 2.0
    }

    /// The boundary `point` has reached, if any. The top boundary is tested
    /// first.
    #[inline]
    pub fn boundary_hit(&self, point: &Vector) -> Option<Boundary> {
        if point.y <= self.top {
            Some(Boundary::Top)
        } else if point.y >= self.bottom {
            Some(Boundary::Bottom)
        } else {
            None
        }
    }
}

impl Default for Fibre {
    /// The classic demonstration geometry: boundaries at `y = 200` and
    /// `y = 400`, centered in an 800x600 scene.
    #[inline]
    fn default() -> Self {
        Self {
            top: 200.0,
            bottom: 400.0,
        }
    }
}

/// Which face of the fibre a ray has reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    Top,
    Bottom,
}

impl Boundary {
    /// The boundary normal, pointing into the core.
    #[inline]
    pub fn normal(self) -> Vector {
        match self {
            Self::Top => Vector::new(0.0, 1.0),
            Self::Bottom => Vector::new(0.0, -1.0),
        }
    }

    /// Sign of the vertical velocity of a ray transmitted through this
    /// boundary.
    #[inline]
    fn transmit_sign(self) -> Float {
        match self {
            Self::Top => -1.0,
            Self::Bottom => 1.0,
        }
    }
}

/// The refractive indices on either side of the fibre boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefractiveIndices {
    core: Float,
    cladding: Float,
}

impl RefractiveIndices {
    /// Returns `None` unless both indices are strictly positive.
    #[inline]
    pub fn try_new(core: Float, cladding: Float) -> Option<Self> {
        (core > 0.0 && cladding > 0.0).then_some(Self { core, cladding })
    }

    #[inline]
    pub const fn core(&self) -> Float {
        self.core
    }

    #[inline]
    pub const fn cladding(&self) -> Float {
        self.cladding
    }

    /// `n1 / n2`, the factor Snell's law applies to the incidence sine.
    #[inline]
    pub fn ratio(&self) -> Float {
        self.core / self.cladding
    }
}

/// What became of a ray at its most recent boundary interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Refraction {
    /// The ray left the core; the refraction angle is in degrees.
    Transmitted(Float),
    /// Snell's law had no real solution and the ray reflected back instead.
    TotalInternal,
}

/// Angles recorded at a ray's most recent boundary interaction, in degrees.
///
/// The incidence angle is measured between the incoming velocity and the
/// inward boundary normal, so a ray travelling at `a` degrees from the fibre
/// axis reads `90 + a`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleReadout {
    pub incidence: Float,
    pub refraction: Refraction,
}

/// A light ray travelling along the fibre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightRay {
    position: Vector,
    velocity: Vector,
    exited: bool,
    readout: Option<AngleReadout>,
}

impl LightRay {
    /// Returns `None` if `velocity` is too short to carry a direction.
    #[inline]
    pub fn try_new(position: Vector, velocity: Vector) -> Option<Self> {
        (velocity.norm() > Float::EPSILON).then_some(Self {
            position,
            velocity,
            exited: false,
            readout: None,
        })
    }

    /// A ray launched from `position`, `angle` degrees below the fibre axis,
    /// moving `speed` units per step.
    #[inline]
    pub fn launched(position: Vector, angle: Float, speed: Float) -> Option<Self> {
        let angle = deg_to_rad(angle);
        let direction = Vector::new(ComplexField::cos(angle), ComplexField::sin(angle));
        Self::try_new(position, direction * speed)
    }

    #[inline]
    pub fn position(&self) -> Vector {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    /// Whether the ray has been transmitted into the cladding.
    #[inline]
    pub const fn has_exited(&self) -> bool {
        self.exited
    }

    /// Angles from the most recent boundary interaction, once one happened.
    #[inline]
    pub fn readout(&self) -> Option<&AngleReadout> {
        self.readout.as_ref()
    }

    /// Direction of travel in radians, `atan2(vy, vx)`.
    #[inline]
    pub fn orientation(&self) -> Float {
        RealField::atan2(self.velocity.y, self.velocity.x)
    }

    /// Advance the ray by one simulation step and resolve at most one
    /// boundary interaction.
    ///
    /// The boundary test probes `probe` units ahead of the ray's position
    /// along its direction of travel. A ray that has already exited moves in
    /// a straight line and is exempt from the test forever.
    pub fn step(&mut self, fibre: &Fibre, indices: &RefractiveIndices, probe: Float) {
        self.position += self.velocity;

        if self.exited {
            return;
        }

        let direction = self.velocity.normalize();
        let tip = self.position + direction * probe;

        let Some(boundary) = fibre.boundary_hit(&tip) else {
            return;
        };

        let cos_theta1 = direction.dot(&boundary.normal());
        let theta1 = ComplexField::acos(cos_theta1);
        let sin_theta2 = indices.ratio() * ComplexField::sin(theta1);

        let refraction = if sin_theta2 > 1.0 {
            // Total internal reflection: mirror the normal component, the
            // tangential one is untouched.
            self.velocity.y = -self.velocity.y;
            Refraction::TotalInternal
        } else {
            let theta2 = ComplexField::asin(sin_theta2);
            let speed = self.velocity.norm();
            self.velocity.x = ComplexField::cos(theta2) * speed;
            self.velocity.y = boundary.transmit_sign() * ComplexField::sin(theta2) * speed;
            self.exited = true;
            Refraction::Transmitted(rad_to_deg(theta2))
        };

        self.readout = Some(AngleReadout {
            incidence: rad_to_deg(theta1),
            refraction,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: Float = 1.2;
    const PROBE: Float = 50.0;

    fn glass_to_air() -> RefractiveIndices {
        RefractiveIndices::try_new(1.5, 1.0).unwrap()
    }

    // Placed so the probe reaches the bottom boundary on the first step.
    fn ray_toward_bottom(angle: Float) -> LightRay {
        LightRay::launched(Vector::new(100.0, 380.0), angle, SPEED).unwrap()
    }

    #[test]
    fn fibre_orders_its_boundaries() {
        assert!(Fibre::try_new(200.0, 400.0).is_some());
        assert!(Fibre::try_new(400.0, 200.0).is_none());
        assert!(Fibre::try_new(300.0, 300.0).is_none());
    }

    #[test]
    fn fibre_reports_the_crossed_boundary() {
        let fibre = Fibre::default();

        assert_eq!(fibre.boundary_hit(&Vector::new(0.0, 150.0)), Some(Boundary::Top));
        assert_eq!(fibre.boundary_hit(&Vector::new(0.0, 200.0)), Some(Boundary::Top));
        assert_eq!(fibre.boundary_hit(&Vector::new(0.0, 300.0)), None);
        assert_eq!(fibre.boundary_hit(&Vector::new(0.0, 400.0)), Some(Boundary::Bottom));
        assert_eq!(fibre.boundary_hit(&Vector::new(0.0, 450.0)), Some(Boundary::Bottom));
    }

    #[test]
    fn boundary_normals_point_into_the_core() {
        assert_eq!(Boundary::Top.normal(), Vector::new(0.0, 1.0));
        assert_eq!(Boundary::Bottom.normal(), Vector::new(0.0, -1.0));
    }

    #[test]
    fn indices_must_be_positive() {
        assert!(RefractiveIndices::try_new(1.5, 1.0).is_some());
        assert!(RefractiveIndices::try_new(0.0, 1.0).is_none());
        assert!(RefractiveIndices::try_new(1.5, -1.0).is_none());
    }

    #[test]
    fn launch_velocity_must_be_nonzero() {
        assert!(LightRay::try_new(Vector::zeros(), Vector::zeros()).is_none());
        assert!(LightRay::launched(Vector::zeros(), 45.0, 0.0).is_none());
    }

    #[test]
    fn orientation_tracks_velocity() {
        let ray = LightRay::launched(Vector::zeros(), 30.0, SPEED).unwrap();
        assert!((ray.orientation() - deg_to_rad(30.0)).abs() < 1e-12);
    }

    #[test]
    fn no_interaction_away_from_the_boundaries() {
        let mut ray = LightRay::launched(Vector::new(100.0, 300.0), 30.0, SPEED).unwrap();
        let velocity = ray.velocity();
        let position = ray.position();

        ray.step(&Fibre::default(), &glass_to_air(), PROBE);

        assert_eq!(ray.velocity(), velocity);
        assert_eq!(ray.position(), position + velocity);
        assert!(ray.readout().is_none());
        assert!(!ray.has_exited());
    }

    #[test]
    fn shallow_launch_reflects_internally() {
        // 1.5 * sin(acos(-sin 30)) = 1.5 * sin(120 deg) = 1.299 > 1
        let mut ray = ray_toward_bottom(30.0);
        let before = ray.velocity();

        ray.step(&Fibre::default(), &glass_to_air(), PROBE);

        assert!(!ray.has_exited());
        assert_eq!(ray.velocity().x, before.x);
        assert_eq!(ray.velocity().y, -before.y);

        let readout = ray.readout().unwrap();
        assert_eq!(readout.refraction, Refraction::TotalInternal);
        // measured against the inward normal: 90 + 30
        assert!((readout.incidence - 120.0).abs() < 1e-9);
    }

    #[test]
    fn steep_launch_escapes_through_the_boundary() {
        // 1.5 * sin(150 deg) = 0.75, asin(0.75) = 48.590378 deg
        let mut ray = ray_toward_bottom(60.0);
        let speed_before = ray.velocity().norm();

        ray.step(&Fibre::default(), &glass_to_air(), PROBE);

        assert!(ray.has_exited());

        let readout = *ray.readout().unwrap();
        assert!((readout.incidence - 150.0).abs() < 1e-9);

        let Refraction::Transmitted(angle) = readout.refraction else {
            panic!("expected a transmitted ray, got {:?}", readout.refraction);
        };
        assert!((angle - 48.590378).abs() < 1e-6);

        // speed is conserved through the interaction
        assert!((ray.velocity().norm() - speed_before).abs() < 1e-12);

        // transmitted through the bottom boundary: down and to the right
        assert!(ray.velocity().x > 0.0 && ray.velocity().y > 0.0);
    }

    #[test]
    fn exited_rays_only_translate() {
        let mut ray = ray_toward_bottom(60.0);
        ray.step(&Fibre::default(), &glass_to_air(), PROBE);
        assert!(ray.has_exited());

        let frozen = *ray.readout().unwrap();
        let velocity = ray.velocity();
        let position = ray.position();

        ray.step(&Fibre::default(), &glass_to_air(), PROBE);
        ray.step(&Fibre::default(), &glass_to_air(), PROBE);

        assert_eq!(ray.velocity(), velocity);
        assert_eq!(ray.position(), position + velocity * 2.0);
        assert_eq!(*ray.readout().unwrap(), frozen);
    }

    #[test]
    fn top_and_bottom_interactions_mirror_each_other() {
        let fibre = Fibre::default();
        let indices = glass_to_air();

        let mut down = LightRay::launched(Vector::new(100.0, 380.0), 60.0, SPEED).unwrap();
        let mut up = LightRay::launched(Vector::new(100.0, 220.0), -60.0, SPEED).unwrap();

        down.step(&fibre, &indices, PROBE);
        up.step(&fibre, &indices, PROBE);

        assert!(down.has_exited() && up.has_exited());

        let d = *down.readout().unwrap();
        let u = *up.readout().unwrap();
        assert!((d.incidence - u.incidence).abs() < 1e-9);

        let (Refraction::Transmitted(da), Refraction::Transmitted(ua)) =
            (d.refraction, u.refraction)
        else {
            panic!("expected both rays to be transmitted");
        };
        assert!((da - ua).abs() < 1e-9);

        // mirrored vertical velocities, identical horizontal ones
        assert!((down.velocity().y + up.velocity().y).abs() < 1e-12);
        assert!((down.velocity().x - up.velocity().x).abs() < 1e-12);
    }
}
