//! Magnetic dipole rotor
//!
//! Owns the rotor's orientation, dipole moment, externally applied field
//! (with rotating-field support), friction and angular velocity. Each
//! fixed step [`MagnetDipole::simulate`] integrates the rotational motion;
//! the steady-state accessors give the closed-form phase lag of a rotor
//! locked to a rotating drive field
//!
//! Angular state uses the degrees-based axis-angle convention from
//! [`crate::simulation::math`]

use crate::simulation::math::{axis_angle_deg, normalize_or_zero, NQuat, NVec3};

/// Rotor magnet driven by an externally applied (possibly rotating) field
///
/// `angular_velocity` is stored relative to the rotating reference frame
/// of the applied field. The setters keep the rotor's absolute spin
/// continuous across control changes:
/// - switching a nonzero field off hands the field-rotation rate back to
///   the rotor,
/// - changing the rotation rate under a live field subtracts the delta.
///
/// Saved directions let a zero-magnitude field or frequency be restored
/// along its last nonzero direction. Invariant: both saved directions are
/// unit length and only ever replaced by nonzero assignments
#[derive(Debug, Clone)]
pub struct MagnetDipole {
    orientation: NQuat,             // current rotor attitude
    moment: NVec3,                  // body-local dipole moment
    field: NVec3,                   // applied field, world space
    saved_field_direction: NVec3,   // unit; last nonzero field direction
    friction: f64,                  // stored damping coefficient
    frequency: NVec3,               // field rotation axis, rotations/sec
    saved_frequency_direction: NVec3, // unit; last nonzero frequency axis
    field_velocity: NVec3,          // 360 * frequency, deg/sec
    angular_velocity: NVec3,        // axis-angle rate, deg/sec
}

impl Default for MagnetDipole {
    fn default() -> Self {
        Self::new()
    }
}

impl MagnetDipole {
    pub fn new() -> Self {
        Self {
            orientation: NQuat::identity(),
            moment: NVec3::x(),
            field: NVec3::zeros(),
            saved_field_direction: NVec3::y(),
            friction: 0.0,
            frequency: NVec3::zeros(),
            saved_frequency_direction: -NVec3::z(),
            field_velocity: NVec3::zeros(),
            angular_velocity: NVec3::zeros(),
        }
    }

    // Builders: route every configured value through the corresponding
    // setter so the saved-direction and compensation bookkeeping holds
    // from the first tick

    pub fn with_moment(mut self, moment: NVec3) -> Self {
        self.moment = moment;
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_field(mut self, field: NVec3) -> Self {
        self.set_field(field);
        self
    }

    pub fn with_frequency(mut self, frequency: NVec3) -> Self {
        self.set_frequency(frequency);
        self
    }

    pub fn with_orientation(mut self, orientation: NQuat) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn orientation(&self) -> NQuat {
        self.orientation
    }

    pub fn moment(&self) -> NVec3 {
        self.moment
    }

    pub fn set_moment(&mut self, moment: NVec3) {
        self.moment = moment;
    }

    pub fn angular_velocity(&self) -> NVec3 {
        self.angular_velocity
    }

    pub fn field(&self) -> NVec3 {
        self.field
    }

    pub fn frequency(&self) -> NVec3 {
        self.frequency
    }

    /// Effective damping coefficient
    ///
    /// The stored value applies only while no field is present. Under a
    /// live field the damping is `|field| / 4`, the coefficient whose
    /// dissipation matches the steady-state energy of the driven rotor;
    /// without it an engaged rotating field oscillates without bound
    pub fn friction(&self) -> f64 {
        if self.field.norm() == 0.0 {
            self.friction
        } else {
            self.field.norm() / 4.0
        }
    }

    pub fn set_friction(&mut self, friction: f64) {
        self.friction = friction;
    }

    /// Assign the applied field
    ///
    /// Turning a nonzero field off adds the current field-rotation rate
    /// into the rotor's angular velocity first: removing the rotating
    /// reference frame must not discard its contribution to the body's
    /// absolute spin. Any nonzero assignment refreshes the saved direction
    pub fn set_field(&mut self, field: NVec3) {
        if self.field.norm() != 0.0 && field.norm() == 0.0 {
            self.angular_velocity += self.field_velocity;
        }

        self.field = field;
        if self.field.norm() != 0.0 {
            self.saved_field_direction = normalize_or_zero(self.field);
        }
    }

    pub fn field_magnitude(&self) -> f64 {
        self.field.norm()
    }

    /// Rescale the field, restoring the saved direction from zero
    pub fn set_field_magnitude(&mut self, magnitude: f64) {
        if self.field.norm() == 0.0 {
            self.set_field(magnitude * self.saved_field_direction);
        } else {
            self.set_field(magnitude * normalize_or_zero(self.field));
        }
    }

    /// Current field direction, falling back to the saved one at zero field
    pub fn field_direction(&self) -> NVec3 {
        if self.field.norm() != 0.0 {
            normalize_or_zero(self.field)
        } else {
            self.saved_field_direction
        }
    }

    /// Point the field along `direction`, keeping the current magnitude
    /// A zero `direction` leaves the saved direction untouched
    pub fn set_field_direction(&mut self, direction: NVec3) {
        let dir = normalize_or_zero(direction);
        if dir != NVec3::zeros() {
            self.saved_field_direction = dir;
        }

        let magnitude = self.field.norm();
        self.set_field(magnitude * self.saved_field_direction);
    }

    /// Assign the field rotation frequency (rotations/sec about the axis)
    ///
    /// The rotor's angular velocity is stored relative to the rotating
    /// field frame, so a rate change under a live field is compensated to
    /// keep the absolute spin continuous
    pub fn set_frequency(&mut self, frequency: NVec3) {
        let prev_field_velocity = self.field_velocity;

        self.frequency = frequency;
        self.field_velocity = 360.0 * frequency;

        if self.frequency.norm() != 0.0 {
            self.saved_frequency_direction = normalize_or_zero(self.frequency);
        }

        if self.field.norm() != 0.0 {
            let delta = self.field_velocity - prev_field_velocity;
            self.angular_velocity -= delta;
        }
    }

    pub fn frequency_magnitude(&self) -> f64 {
        self.frequency.norm()
    }

    /// Rescale the frequency, restoring the saved axis from zero
    pub fn set_frequency_magnitude(&mut self, magnitude: f64) {
        if self.frequency.norm() == 0.0 {
            self.set_frequency(magnitude * self.saved_frequency_direction);
        } else {
            self.set_frequency(magnitude * normalize_or_zero(self.frequency));
        }
    }

    /// Rotational kinetic energy of a rotor locked to the rotating field,
    /// per unit moment of inertia (angular speed taken in rad/sec)
    pub fn stable_kinetic_energy(&self) -> f64 {
        let w = self.field_velocity.norm().to_radians();
        w * w / 2.0
    }

    /// Equilibrium angular lag, in degrees, between the rotor moment and
    /// the driving field at steady rotation
    ///
    /// Solves `cos(x) = k / (|m||B|) - 1` from the energy balance. The
    /// arccos argument is clamped to [-1, 1]: past pull-out
    /// (`k > 2|m||B|`) the lag reads 0 instead of NaN. A zero `|m||B|`
    /// means no restoring torque and no defined lag; treated as 0
    pub fn stable_displacement(&self) -> f64 {
        let k = self.stable_kinetic_energy();
        let mb = self.moment.norm() * self.field.norm();

        if mb == 0.0 {
            // No energy
            return 0.0;
        }

        let cos_x = (k / mb - 1.0).clamp(-1.0, 1.0);
        cos_x.acos().to_degrees()
    }

    /// The applied field as seen from the rotor's steady-state-lagged
    /// frame: the field rotated back by the equilibrium lag about the
    /// frequency axis. Equals `field` exactly while the frequency is zero
    pub fn apparent_field(&self) -> NVec3 {
        if self.frequency.norm() == 0.0 {
            return self.field;
        }

        let displacement = self.stable_displacement();
        let axis = normalize_or_zero(self.frequency);
        axis_angle_deg(-displacement * axis) * self.field
    }

    /// Rotor attitude as XYZ Euler angles in degrees
    pub fn rotation_euler_deg(&self) -> NVec3 {
        let (roll, pitch, yaw) = self.orientation.euler_angles();
        NVec3::new(roll.to_degrees(), pitch.to_degrees(), yaw.to_degrees())
    }

    /// Advance the rotor by one fixed step of `dt` seconds
    ///
    /// Position update first (from the same-step acceleration), then an
    /// explicit Euler velocity update. Not symplectic: purely conservative
    /// configurations drift over long runs, which is acceptable for an
    /// interactive sandbox but not for energy-conserving integration
    pub fn simulate(&mut self, dt: f64) {
        // Externally rotating field: carry the field vector and the rotor
        // frame around the frequency axis before computing torque
        if self.field.norm() != 0.0 && self.frequency.norm() != 0.0 {
            let frame_rot = axis_angle_deg(self.field_velocity * dt);
            self.set_field(frame_rot * self.field);
            self.orientation = frame_rot * self.orientation;
        }

        let torque = (self.orientation * self.moment).cross(&self.field);
        let friction_torque = -normalize_or_zero(self.angular_velocity) * self.friction();

        // Unit moment of inertia
        let acceleration = torque + friction_torque;

        let dx_from_accel = acceleration * dt * dt / 2.0;
        let dx_from_velocity = self.angular_velocity * dt;

        // Composition order matters: the acceleration-from-rest increment
        // applies after the current-velocity displacement
        let dx = axis_angle_deg(dx_from_accel) * axis_angle_deg(dx_from_velocity);

        self.orientation = dx * self.orientation;
        self.angular_velocity += acceleration * dt;
    }
}
