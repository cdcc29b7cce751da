//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – fixed step size and headless end time
//! - [`MagnetConfig`]     – rotor magnets (dipole moment, field, friction)
//! - [`StatorConfig`]     – stators bound to magnets by index
//! - [`ChargeConfig`]     – charged point bodies
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! parameters:
//!   t_end: 10.0             # total simulation time (headless runs)
//!   h0: 0.02                # fixed step size
//!
//! magnets:
//!   - moment: [ 1.0, 0.0, 0.0 ]
//!     field: [ 0.0, 0.0, 0.0 ]
//!     frequency: [ 0.0, 0.0, 0.0 ]
//!     friction: 0.0
//!
//! stators:
//!   - magnet: 0             # index into the magnets list
//!     poles: 2
//!     coil_radius: 1.5
//!     voltage: 2.0
//!     frequency_hz: 1.0
//!     phase_deg: 0.0
//!
//! bodies:
//!   - charge: 1.0e-6
//!     kind: electric        # or "magnetic"
//!     x: [ -0.5, 0.0, 0.0 ]
//!     v: [ 0.0, 0.0, 0.0 ]
//!     m: 1.0
//! ```
//!
//! The engine then maps this configuration into its internal runtime
//! scenario representation, validating every entry at the boundary.

use serde::Deserialize;

/// Global numerical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64, // time end
    pub h0: f64,    // fixed step size
}

/// Configuration for a single rotor magnet
#[derive(Deserialize, Debug)]
pub struct MagnetConfig {
    pub moment: Vec<f64>,    // body-local dipole moment
    pub field: Vec<f64>,     // applied field, world space
    pub frequency: Vec<f64>, // field rotation axis, rotations/sec
    pub friction: f64,       // stored damping coefficient
}

/// Configuration for a stator and the magnet it drives
#[derive(Deserialize, Debug)]
pub struct StatorConfig {
    pub magnet: usize,     // index into the magnets list
    pub poles: u32,        // pole-pair count, >= 1
    pub coil_radius: f64,  // placement radius for coil visuals
    pub voltage: f64,
    pub frequency_hz: f64,
    pub phase_deg: f64,
}

/// Which force law a configured body participates in
/// `kind: "electric"` or `kind: "magnetic"`
#[derive(Deserialize, Debug, Clone, Copy)]
pub enum ChargeKindConfig {
    #[serde(rename = "electric")] // Coulomb's law
    Electric,

    #[serde(rename = "magnetic")] // permeability-derived inverse-square analog
    Magnetic,
}

/// Configuration for a single charged body's initial state
#[derive(Deserialize, Debug)]
pub struct ChargeConfig {
    pub charge: f64,           // signed charge magnitude
    pub kind: ChargeKindConfig,
    pub x: Vec<f64>,           // initial position
    pub v: Vec<f64>,           // initial velocity
    pub m: f64,                // mass
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig, // global numerical parameters
    #[serde(default)]
    pub magnets: Vec<MagnetConfig>,   // rotor magnets
    #[serde(default)]
    pub stators: Vec<StatorConfig>,   // stators driving magnets
    #[serde(default)]
    pub bodies: Vec<ChargeConfig>,    // charged point bodies
}
