use nalgebra::Point2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// A circular particle in the plane.
///
/// Identity is positional: particles are referred to by their index in the
/// owning [`Domain`], never by value, so two particles may legally share the
/// exact same coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub position: Point2<f64>,
    pub radius: f64, // 0 for point-like particles
}

impl Particle {
    /// Creates a particle after validating its radius.
    ///
    /// Errors with [`Error::InvalidParticle`] when `radius` is negative or
    /// non-finite. A zero radius is legal and models a point-like particle.
    pub fn new(x: f64, y: f64, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::InvalidParticle(format!(
                "radius must be finite and non-negative, got {radius}"
            )));
        }
        Ok(Self {
            position: Point2::new(x, y),
            radius,
        })
    }

    /// Creates a point-like particle, radius zero, which is always valid.
    pub fn point_like(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            radius: 0.0,
        }
    }

    /// Whether this particle has zero radius, so its surface distance equals
    /// its center distance.
    #[inline]
    pub fn is_point_like(&self) -> bool {
        self.radius == 0.0
    }
}

/// The square periodic domain owning the particles of one computation.
///
/// The side runs from `0` to `side_length` on both axes, both ends
/// inclusive, and wraps around at the edges. The particle sequence is
/// immutable for the lifetime of the domain; the neighbor search refers to
/// particles by their index in this sequence.
#[derive(Debug, Clone, Serialize)]
pub struct Domain {
    side_length: f64,
    particles: Vec<Particle>,
}

impl Domain {
    /// Builds a domain, taking ownership of `particles`.
    ///
    /// Errors:
    /// - [`Error::InvalidDomain`] when `side_length` is not finite-positive
    ///   or any particle lies outside `[0, L] x [0, L]` (NaN coordinates
    ///   fail the bounds check).
    /// - [`Error::InvalidParticle`] when a stored particle carries a
    ///   negative or non-finite radius. Radii are re-checked here because
    ///   the fields of [`Particle`] are public; the domain is the trust
    ///   boundary of the computation.
    pub fn new(side_length: f64, particles: Vec<Particle>) -> Result<Self> {
        validate_side_length(side_length)?;
        for (index, particle) in particles.iter().enumerate() {
            if !particle.radius.is_finite() || particle.radius < 0.0 {
                return Err(Error::InvalidParticle(format!(
                    "particle {index} has an illegal radius {}",
                    particle.radius
                )));
            }
            let (x, y) = (particle.position.x, particle.position.y);
            let inside =
                x >= 0.0 && x <= side_length && y >= 0.0 && y <= side_length;
            if !inside {
                return Err(Error::InvalidDomain(format!(
                    "particle {index} at ({x}, {y}) is outside the \
                     {side_length} x {side_length} domain"
                )));
            }
        }
        Ok(Self {
            side_length,
            particles,
        })
    }

    /// Generates a domain with `count` uniformly placed particles.
    ///
    /// Radii are drawn uniformly from `[0, max_radius]`; `max_radius = 0`
    /// yields all point-like particles. Radii comparable to the cell side
    /// weaken the cell index method's locality guarantee, so callers should
    /// keep `max_radius` small relative to `side_length / divisions`.
    pub fn random<R: Rng + ?Sized>(
        side_length: f64,
        count: usize,
        max_radius: f64,
        rng: &mut R,
    ) -> Result<Self> {
        validate_side_length(side_length)?;
        if !max_radius.is_finite() || max_radius < 0.0 {
            return Err(Error::InvalidParticle(format!(
                "max radius must be finite and non-negative, got {max_radius}"
            )));
        }

        let particles = (0..count)
            .map(|_| {
                let radius = if max_radius > 0.0 {
                    rng.gen_range(0.0..=max_radius)
                } else {
                    0.0
                };
                Particle {
                    position: Point2::new(
                        rng.gen_range(0.0..side_length),
                        rng.gen_range(0.0..side_length),
                    ),
                    radius,
                }
            })
            .collect();

        // Re-enter through the validating constructor; generation and
        // validation stay a single code path.
        Self::new(side_length, particles)
    }

    /// The length of the domain side.
    #[inline]
    pub fn side_length(&self) -> f64 {
        self.side_length
    }

    /// The particles of this domain, in index order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles in the domain.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the domain holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

fn validate_side_length(side_length: f64) -> Result<()> {
    if !side_length.is_finite() || side_length <= 0.0 {
        return Err(Error::InvalidDomain(format!(
            "side length must be finite and positive, got {side_length}"
        )));
    }
    Ok(())
}
