//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime
//! [`SimulationWorld`] bundle: parameters, rotor magnets, stator bindings
//! and the charged-body registry with the active force set
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! integration and visualization systems

use bevy::prelude::Resource;

use crate::configuration::config::{ChargeKindConfig, ScenarioConfig};
use crate::simulation::charge::{ChargeKind, ChargedBody, PointBody};
use crate::simulation::dipole::MagnetDipole;
use crate::simulation::error::SimError;
use crate::simulation::math::NVec3;
use crate::simulation::params::Parameters;
use crate::simulation::stator::StatorController;
use crate::simulation::world::{SimulationWorld, StatorBinding};

/// Bevy resource wrapping a fully-initialized simulation world
///
/// This is the main "runtime bundle" constructed from a [`ScenarioConfig`]:
/// it owns the world that the physics and visualization systems step and
/// read each frame
#[derive(Resource)]
pub struct Scenario {
    pub world: SimulationWorld,
}

/// Map a YAML vector onto nalgebra, rejecting anything but 3 components
fn vec3(components: &[f64]) -> Result<NVec3, SimError> {
    if components.len() != 3 {
        return Err(SimError::InvalidVector(components.len()));
    }
    Ok(NVec3::new(components[0], components[1], components[2]))
}

impl Scenario {
    /// Validate the configuration and build the runtime world
    ///
    /// Every malformed entry is rejected here; runtime state is only ever
    /// constructed from checked values
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        let parameters = Parameters {
            t_end: cfg.parameters.t_end,
            h0: cfg.parameters.h0,
        };

        let mut world = SimulationWorld::new(parameters);

        // Magnets: configured values route through the dipole setters so
        // saved-direction bookkeeping holds from the first tick
        for mc in &cfg.magnets {
            let magnet = MagnetDipole::new()
                .with_moment(vec3(&mc.moment)?)
                .with_friction(mc.friction)
                .with_field(vec3(&mc.field)?)
                .with_frequency(vec3(&mc.frequency)?);
            world.magnets.push(magnet);
        }

        // Stators: bind to a configured magnet and apply the control
        // inputs under the configured pole count
        for sc in &cfg.stators {
            if sc.magnet >= world.magnets.len() {
                return Err(SimError::UnknownMagnet(sc.magnet));
            }
            let magnet = &mut world.magnets[sc.magnet];

            let mut controller = StatorController::new()
                .with_coil_radius(sc.coil_radius)
                .with_poles(sc.poles)?;
            controller.set_voltage(sc.voltage, magnet);
            controller.set_frequency_hz(sc.frequency_hz, magnet);
            controller.set_phase_deg(sc.phase_deg, magnet);

            world.stators.push(StatorBinding {
                controller,
                magnet: sc.magnet,
            });
        }

        // Charged bodies: inserted active
        for bc in &cfg.bodies {
            let kind = match bc.kind {
                ChargeKindConfig::Electric => ChargeKind::Electric,
                ChargeKindConfig::Magnetic => ChargeKind::Magnetic,
            };
            let body = PointBody::new(vec3(&bc.x)?, vec3(&bc.v)?, bc.m);
            world.registry.insert(ChargedBody::new(bc.charge, kind, body));
        }

        Ok(Self { world })
    }
}
