//! Multi-pole stator driving a single rotor magnet
//!
//! Two explicit drive modes, selected by pole count:
//! - [`DriveMode::PhaseDriven`] (one pole pair): the controller advances a
//!   stored phase scalar each tick and writes the field along its up axis
//! - [`DriveMode::FieldVectorDriven`] (several pole pairs): the magnet's
//!   field vector itself rotates; phase is derived from the magnet's live
//!   field direction rather than stored
//!
//! Coil visuals are an external collaborator reached through [`CoilRig`];
//! the controller only computes their local transforms

use crate::simulation::dipole::MagnetDipole;
use crate::simulation::error::SimError;
use crate::simulation::math::{
    axis_angle_deg, normalize_or_zero, project_on_plane, signed_angle_deg, NQuat, NVec3,
};

/// How the stator turns control inputs into magnet state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveMode {
    /// Single pole pair: the phase scalar is authoritative and advanced by
    /// the driver; the field vector never rotates
    PhaseDriven,
    /// Several pole pairs: the field vector physically rotates and phase
    /// follows the magnet's state
    FieldVectorDriven,
}

/// Local transform for one coil, handed to the rendering collaborator
#[derive(Debug, Clone)]
pub struct CoilPlacement {
    pub rotation: NQuat,
    pub position: NVec3,
}

/// External rendering interface: recreate the coil visuals after a pole
/// recount. The core never retains the rig; it is passed in where needed
pub trait CoilRig {
    fn rebuild(&mut self, placements: &[CoilPlacement]);
}

/// No-op rig for headless runs and callers that do not render coils
pub struct DiscardCoils;

impl CoilRig for DiscardCoils {
    fn rebuild(&mut self, _placements: &[CoilPlacement]) {}
}

/// Models a multi-pole stator: maps voltage/frequency/phase control inputs
/// onto the driven magnet's field state
pub struct StatorController {
    poles: u32,        // pole-pair count, >= 1
    coil_radius: f64,  // placement radius for coil visuals
    up: NVec3,         // unit; local zero-phase direction
    forward: NVec3,    // unit; stator axis, coils laid out about it
    voltage: f64,
    frequency_hz: f64,
    phase: f64,        // stored phase, degrees; authoritative only when phase-driven
}

impl Default for StatorController {
    fn default() -> Self {
        Self::new()
    }
}

impl StatorController {
    pub fn new() -> Self {
        Self {
            poles: 1,
            coil_radius: 1.0,
            up: NVec3::y(),
            forward: NVec3::z(),
            voltage: 0.0,
            frequency_hz: 0.0,
            phase: 0.0,
        }
    }

    /// Construction-time pole count; validated, but with no magnet bound
    /// yet there is nothing to re-derive
    pub fn with_poles(mut self, poles: u32) -> Result<Self, SimError> {
        if poles == 0 {
            return Err(SimError::InvalidPoleCount(poles));
        }
        self.poles = poles;
        Ok(self)
    }

    pub fn with_coil_radius(mut self, coil_radius: f64) -> Self {
        self.coil_radius = coil_radius;
        self
    }

    pub fn with_axes(mut self, up: NVec3, forward: NVec3) -> Self {
        self.up = normalize_or_zero(up);
        self.forward = normalize_or_zero(forward);
        self
    }

    pub fn poles(&self) -> u32 {
        self.poles
    }

    pub fn coil_radius(&self) -> f64 {
        self.coil_radius
    }

    pub fn set_coil_radius(&mut self, coil_radius: f64) {
        self.coil_radius = coil_radius;
    }

    pub fn up(&self) -> NVec3 {
        self.up
    }

    pub fn forward(&self) -> NVec3 {
        self.forward
    }

    pub fn drive_mode(&self) -> DriveMode {
        if self.poles == 1 {
            DriveMode::PhaseDriven
        } else {
            DriveMode::FieldVectorDriven
        }
    }

    /// Angular slot width between adjacent coils, degrees
    pub fn between_poles(&self) -> f64 {
        360.0 / (2 * self.poles) as f64
    }

    /// Change the pole-pair count
    ///
    /// Rejects zero without touching any state. On success the coil rig is
    /// rebuilt and voltage/frequency/phase are re-derived so the magnet's
    /// physical state stays consistent under the new pole count
    pub fn set_poles(
        &mut self,
        poles: u32,
        magnet: &mut MagnetDipole,
        rig: &mut dyn CoilRig,
    ) -> Result<(), SimError> {
        if poles == 0 {
            return Err(SimError::InvalidPoleCount(poles));
        }

        self.poles = poles;
        rig.rebuild(&self.coil_placements());

        let voltage = self.voltage;
        self.set_voltage(voltage, magnet);
        let frequency_hz = self.frequency_hz;
        self.set_frequency_hz(frequency_hz, magnet);
        let phase = self.phase_deg(magnet);
        self.set_phase_deg(phase, magnet);

        Ok(())
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    /// Drive voltage. Phase-driven mode modulates the field magnitude by
    /// the cosine of the stored phase; field-vector mode maps it directly
    pub fn set_voltage(&mut self, voltage: f64, magnet: &mut MagnetDipole) {
        self.voltage = voltage;
        match self.drive_mode() {
            DriveMode::PhaseDriven => {
                magnet.set_field_magnitude(self.phase.to_radians().cos() * voltage);
            }
            DriveMode::FieldVectorDriven => {
                magnet.set_field_magnitude(voltage);
            }
        }
    }

    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }

    /// Drive frequency in Hz
    ///
    /// A single-pole stator cannot rotate the field vector, so the
    /// magnet's own rotating-field frequency is forced to zero and the
    /// phase scalar advances in [`StatorController::update`] instead
    pub fn set_frequency_hz(&mut self, frequency_hz: f64, magnet: &mut MagnetDipole) {
        self.frequency_hz = frequency_hz;
        match self.drive_mode() {
            DriveMode::PhaseDriven => magnet.set_frequency_magnitude(0.0),
            DriveMode::FieldVectorDriven => magnet.set_frequency_magnitude(frequency_hz),
        }
    }

    /// Drive phase in degrees
    ///
    /// Phase-driven mode reports the stored scalar. Field-vector mode
    /// derives the phase from the magnet's live field direction about the
    /// stator axis; phase follows the magnet's actual state, not the last
    /// value set
    pub fn phase_deg(&self, magnet: &MagnetDipole) -> f64 {
        match self.drive_mode() {
            DriveMode::PhaseDriven => self.phase,
            DriveMode::FieldVectorDriven => {
                let in_plane = project_on_plane(magnet.field_direction(), self.forward);
                signed_angle_deg(self.up, in_plane, -self.forward)
            }
        }
    }

    /// Set the drive phase, normalized into [0, 360)
    pub fn set_phase_deg(&mut self, phase: f64, magnet: &mut MagnetDipole) {
        let phase = phase.rem_euclid(360.0);

        match self.drive_mode() {
            DriveMode::PhaseDriven => {
                self.phase = phase;
                magnet.set_field(self.up * phase.to_radians().cos() * self.voltage);
            }
            DriveMode::FieldVectorDriven => {
                let rot = axis_angle_deg(phase * -self.forward);
                magnet.set_field_direction(rot * self.up);
            }
        }
    }

    /// Index of the nearest energized coil, in [0, 2*poles)
    pub fn active_pole(&self, magnet: &MagnetDipole) -> u32 {
        let between = self.between_poles();

        let mut angle = self.phase_deg(magnet) + between / 2.0;
        if angle < 0.0 {
            angle += 360.0;
        }

        (angle / between).floor() as u32 % (2 * self.poles)
    }

    /// Jump the drive phase onto coil slot `pole`
    pub fn set_active_pole(&mut self, pole: u32, magnet: &mut MagnetDipole) {
        self.set_phase_deg(pole as f64 * self.between_poles(), magnet);
    }

    /// Advance to the next coil slot, emulating one commutation step
    pub fn flip(&mut self, magnet: &mut MagnetDipole) {
        let pole = self.active_pole(magnet);
        self.set_active_pole((pole + 1) % (2 * self.poles), magnet);
    }

    /// Local transforms for the `2*poles` coils, evenly spaced about the
    /// stator axis at `coil_radius`
    pub fn coil_placements(&self) -> Vec<CoilPlacement> {
        (0..2 * self.poles)
            .map(|i| {
                let rotation = axis_angle_deg(i as f64 * self.between_poles() * self.forward);
                let position = rotation * (self.up * self.coil_radius);
                CoilPlacement { rotation, position }
            })
            .collect()
    }

    /// Per-tick control update
    ///
    /// Only phase-driven stators do continuous work here: the phase scalar
    /// advances at `360 * frequency_hz` deg/sec. Field-vector stators
    /// rotate the field inside the magnet's own integration instead
    pub fn update(&mut self, dt: f64, magnet: &mut MagnetDipole) {
        if self.drive_mode() == DriveMode::PhaseDriven {
            let phase = self.phase + 360.0 * self.frequency_hz * dt;
            self.set_phase_deg(phase, magnet);
        }
    }
}
