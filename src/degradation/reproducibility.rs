//! Reproducibility analysis across independent replicate ensembles.
//!
//! Runs the Gillespie core over many independently seeded replicates and
//! reports coefficient-of-variation statistics of the final state. CV is
//! the operational "causality" measurement the rest of the workbench
//! regresses against omega.
//!
//! Replicates share no mutable state; each owns its ensemble and RNG, so
//! the batch parallelizes with Rayon without synchronization.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use super::ensemble::{BondParams, ChainArchitecture, Ensemble};
use super::gillespie::{
    DegradationSimulator, SimulationConfig, TerminationReason,
};
use super::kinetics::ArrheniusKinetics;

/// Per-replicate final state. Never mutated after creation.
#[derive(Clone, Copy, Debug)]
pub struct ReplicateOutcome {
    pub final_mean_mw: f64,
    pub final_time: f64,
    pub termination: TerminationReason,
}

/// Everything needed to build and run one replicate ensemble.
#[derive(Clone, Debug)]
pub struct ReplicateConfig {
    pub n_replicates: usize,
    pub n_chains: usize,
    pub n_monomers: usize,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Environment metadata, carried onto each ensemble.
    pub ph: f64,
    pub architecture: ChainArchitecture,
    pub bond_params: BondParams,
    pub simulation: SimulationConfig,
}

impl ReplicateConfig {
    fn validate(&self) -> Result<(), String> {
        if self.n_replicates < 2 {
            return Err(format!(
                "n_replicates must be >= 2 for a defined CV, got {}",
                self.n_replicates
            ));
        }
        self.simulation.validate()
    }
}

/// Ensemble statistics over replicates. CVs are percentages
/// (std / mean × 100).
#[derive(Clone, Debug)]
pub struct ReproducibilityStats {
    pub mean_mw: f64,
    pub std_mw: f64,
    pub cv_mw: f64,
    pub mean_time: f64,
    pub std_time: f64,
    pub cv_time: f64,
    /// Final mean MW per replicate, in replicate order.
    pub raw_mw: Vec<f64>,
    /// Final simulated time per replicate, in replicate order.
    pub raw_time: Vec<f64>,
    /// Replicates that reached the target fraction within budget.
    pub n_target_reached: usize,
}

/// Population mean and standard deviation (ddof 0, numpy convention).
fn mean_and_std(samples: &[f64]) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

fn cv_percent(mean: f64, std: f64) -> f64 {
    if mean > 0.0 {
        std / mean * 100.0
    } else {
        0.0
    }
}

/// Simulate `n_replicates` independent ensembles in parallel and compute
/// reproducibility statistics of the final state.
///
/// Each replicate gets its own RNG seeded as
/// `base_seed.wrapping_add(replicate_index)`, so results are
/// deterministic under parallel execution and replicates stay
/// statistically independent. Replicates that stop early (rate
/// exhaustion, step budget) still contribute whatever final state they
/// reached.
///
/// # Arguments
/// * `config` - Replicate construction and simulation parameters
/// * `base_seed` - Base RNG seed
pub fn compute_reproducibility(
    config: &ReplicateConfig,
    base_seed: u64,
) -> Result<ReproducibilityStats, String> {
    config.validate()?;

    let simulator =
        DegradationSimulator::new(ArrheniusKinetics::default(), config.simulation.clone())?;

    // Fail construction errors fast, before spawning the batch.
    Ensemble::new(
        config.n_chains,
        config.n_monomers,
        config.temperature,
        config.ph,
        config.architecture,
        &config.bond_params,
    )?;

    let outcomes: Vec<ReplicateOutcome> = (0..config.n_replicates)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
            // Construction already validated above; same parameters here.
            let mut ensemble = Ensemble::new(
                config.n_chains,
                config.n_monomers,
                config.temperature,
                config.ph,
                config.architecture,
                &config.bond_params,
            )?;

            let trace = simulator.simulate(&mut ensemble, &mut rng);
            Ok(ReplicateOutcome {
                final_mean_mw: trace.final_mean_mw,
                final_time: trace.final_time,
                termination: trace.termination,
            })
        })
        .collect::<Result<Vec<ReplicateOutcome>, String>>()?;

    let raw_mw: Vec<f64> = outcomes.iter().map(|o| o.final_mean_mw).collect();
    let raw_time: Vec<f64> = outcomes.iter().map(|o| o.final_time).collect();
    let n_target_reached = outcomes
        .iter()
        .filter(|o| o.termination == TerminationReason::TargetReached)
        .count();

    let (mean_mw, std_mw) = mean_and_std(&raw_mw);
    let (mean_time, std_time) = mean_and_std(&raw_time);

    Ok(ReproducibilityStats {
        mean_mw,
        std_mw,
        cv_mw: cv_percent(mean_mw, std_mw),
        mean_time,
        std_time,
        cv_time: cv_percent(mean_time, std_time),
        raw_mw,
        raw_time,
        n_target_reached,
    })
}
