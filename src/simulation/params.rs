//! Numerical parameters for the fixed-step driver
//!
//! `Parameters` holds the runtime settings shared by every simulation
//! object: the fixed step size and the end time for headless runs

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end for headless runs
    pub h0: f64,    // fixed step size
}
