//! Single-threaded fixed-step simulation driver
//!
//! Each tick applies stator control updates first, then integrates every
//! rotor, then runs one pairwise force pass over the charged-body registry
//! and advances the translational state. Stator-driven field changes are
//! therefore visible to the same tick's rotor integration, and results are
//! deterministic for a fixed registry layout

use crate::simulation::charge::{ForceSet, InverseSquareForce};
use crate::simulation::dipole::MagnetDipole;
use crate::simulation::math::NVec3;
use crate::simulation::params::Parameters;
use crate::simulation::registry::Registry;
use crate::simulation::stator::StatorController;

/// A stator bound to the rotor magnet it drives
pub struct StatorBinding {
    pub controller: StatorController,
    pub magnet: usize, // index into SimulationWorld::magnets
}

/// Owns every live simulation object and drives them at a fixed step
pub struct SimulationWorld {
    pub parameters: Parameters,
    pub magnets: Vec<MagnetDipole>,
    pub stators: Vec<StatorBinding>,
    pub registry: Registry,
    pub forces: ForceSet,
    pub t: f64, // time
}

impl SimulationWorld {
    pub fn new(parameters: Parameters) -> Self {
        Self {
            parameters,
            magnets: Vec::new(),
            stators: Vec::new(),
            registry: Registry::new(),
            forces: ForceSet::new().with(InverseSquareForce),
            t: 0.0,
        }
    }

    /// Advance the whole world by one fixed step
    pub fn step(&mut self) {
        let dt = self.parameters.h0;

        // Control first: stator updates must land before their magnet
        // integrates this tick. A binding with a stale magnet index is
        // skipped rather than aborting the tick
        for binding in self.stators.iter_mut() {
            if let Some(magnet) = self.magnets.get_mut(binding.magnet) {
                binding.controller.update(dt, magnet);
            }
        }

        for magnet in self.magnets.iter_mut() {
            magnet.simulate(dt);
        }

        // One pairwise pass, then hand each body its total force and let
        // the translational integrator consume it
        let mut force_buf = vec![NVec3::zeros(); self.registry.slot_count()];
        self.forces.accumulate_forces(&self.registry, &mut force_buf);

        for (handle, charged) in self.registry.iter_active_mut() {
            charged.body.add_force(force_buf[handle.index()]);
            charged.body.integrate(dt);
        }

        self.t += dt;
    }

    /// Run fixed steps until `t_end`
    pub fn run_to_end(&mut self) {
        while self.t < self.parameters.t_end {
            self.step();
        }
    }
}
