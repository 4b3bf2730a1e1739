//! Monte Carlo polymer-degradation core.
//!
//! This module provides:
//! - Bond/Chain model: immutable bond descriptions, mutable chain mass state
//! - Ensemble builder: populations of independent chains
//! - ArrheniusKinetics: temperature-dependent breakage rates
//! - DegradationSimulator: continuous-time Gillespie (SSA) event loop
//! - compute_reproducibility: CV statistics over parallel replicates
//! - estimate_omega: configurational-entropy estimate for regression

pub mod chain;
pub mod ensemble;
pub mod kinetics;
pub mod gillespie;
pub mod reproducibility;
pub mod omega;

pub use chain::{Bond, BondType, Chain};
pub use ensemble::{BondParams, ChainArchitecture, Ensemble};
pub use kinetics::ArrheniusKinetics;
pub use gillespie::{
    DegradationSimulator, DegradationTrace, ScissionEvent, SimulationConfig, TerminationReason,
};
pub use reproducibility::{
    compute_reproducibility, ReplicateConfig, ReplicateOutcome, ReproducibilityStats,
};
pub use omega::{causality_from_cv, effective_omega, estimate_omega, predicted_causality};
