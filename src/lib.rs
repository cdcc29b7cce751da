pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::math::{axis_angle_deg, normalize_or_zero, project_on_plane, signed_angle_deg, NQuat, NVec3};
pub use simulation::dipole::MagnetDipole;
pub use simulation::stator::{CoilPlacement, CoilRig, DiscardCoils, DriveMode, StatorController};
pub use simulation::charge::{ChargeKind, ChargedBody, ForceLaw, ForceSet, InverseSquareForce, PointBody, COULOMB_CONST, PERMEABILITY, PERMITTIVITY};
pub use simulation::registry::{BodyHandle, Registry};
pub use simulation::world::{SimulationWorld, StatorBinding};
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;
pub use simulation::error::SimError;

pub use configuration::config::{ChargeConfig, ChargeKindConfig, MagnetConfig, ParametersConfig, ScenarioConfig, StatorConfig};

pub use visualization::emsim_vis3d::run_3d;

pub use benchmark::benchmark::{bench_dipole, bench_forces};
