//! Cartesian state vector (position, velocity) in a right-handed inertial frame.
use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{KmPerSec, Kilometer};

/// Position (km) and velocity (km/s) of a body at one instant.
///
/// A transient value: the toolbox never stores state-vector history, it only consumes
/// and produces states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        StateVector { position, velocity }
    }

    /// Distance to the attracting center.
    pub fn radius(&self) -> Kilometer {
        self.position.norm()
    }

    pub fn speed(&self) -> KmPerSec {
        self.velocity.norm()
    }

    /// Velocity component along the position vector, `r·v / |r|`.
    pub fn radial_velocity(&self) -> KmPerSec {
        self.position.dot(&self.velocity) / self.radius()
    }

    /// Specific angular momentum vector `r × v` (km²/s).
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.position.cross(&self.velocity)
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.position.iter().chain(self.velocity.iter()).all(|c| c.is_finite())
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "r = [{:.6}, {:.6}, {:.6}] km, v = [{:.9}, {:.9}, {:.9}] km/s",
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z
        )
    }
}
