use std::time::Instant;

use crate::simulation::charge::{ChargeKind, ChargedBody, ForceSet, InverseSquareForce, PointBody};
use crate::simulation::dipole::MagnetDipole;
use crate::simulation::math::NVec3;
use crate::simulation::registry::Registry;

/// Wall-clock scaling of the direct pairwise force pass
pub fn bench_forces() {
    // Different population sizes to test
    let ns = [50, 100, 200, 400, 800, 1600];

    for n in ns {
        // Build a registry by hand
        let mut registry = Registry::new();

        for i in 0..n {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            let x = NVec3::new(
                (i_f * 0.37).sin() * 5.0,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            );
            let charge = if i % 2 == 0 { 1.0e-6 } else { -1.0e-6 };

            registry.insert(ChargedBody::new(
                charge,
                ChargeKind::Electric,
                PointBody::new(x, NVec3::zeros(), 1.0),
            ));
        }

        let forces = ForceSet::new().with(InverseSquareForce);
        let mut out = vec![NVec3::zeros(); registry.slot_count()];

        let reps = 50;
        let t0 = Instant::now();
        for _ in 0..reps {
            forces.accumulate_forces(&registry, &mut out);
        }
        let elapsed = t0.elapsed().as_secs_f64();

        println!(
            "bench_forces: n = {:5}  {:10.4} ms/pass",
            n,
            elapsed / reps as f64 * 1000.0
        );
    }
}

/// Throughput of the rotor integrator under a rotating drive field
pub fn bench_dipole() {
    let steps = 1_000_000;
    let dt = 0.02;

    let mut magnet = MagnetDipole::new()
        .with_field(NVec3::new(0.0, 2.0, 0.0))
        .with_frequency(NVec3::new(0.0, 0.0, -1.0));

    let t0 = Instant::now();
    for _ in 0..steps {
        magnet.simulate(dt);
    }
    let elapsed = t0.elapsed().as_secs_f64();

    println!(
        "bench_dipole: {} steps in {:.3} s ({:.0} steps/sec)",
        steps,
        elapsed,
        steps as f64 / elapsed
    );
}
