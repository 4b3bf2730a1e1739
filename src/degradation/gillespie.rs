//! Gillespie (SSA) simulation of polymer degradation.
//!
//! The ensemble is a continuous-time Markov chain whose state is the
//! joint {remaining bonds, molecular weight} of all chains. Transitions
//! are "break bond b on chain c" with instantaneous Arrhenius rates.
//! Each step draws an exponential waiting time from the ensemble-wide
//! total rate, then selects chain and bond by rate-weighted choice.

use rand::rngs::StdRng;
use rand::Rng;

use super::chain::BondType;
use super::ensemble::Ensemble;
use super::kinetics::ArrheniusKinetics;

/// Configuration for one degradation run.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Stop once mean MW drops to this fraction of the initial mean.
    pub target_mw_fraction: f64,
    /// Step budget; reaching it is a detectable non-convergence, not an
    /// error.
    pub max_steps: usize,
    /// Steps between (time, mean MW) samples and target checks.
    pub sample_interval: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            target_mw_fraction: 0.5,
            max_steps: 1_000_000,
            sample_interval: 100,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.target_mw_fraction > 0.0 && self.target_mw_fraction <= 1.0) {
            return Err(format!(
                "target_mw_fraction must be in (0, 1], got {}",
                self.target_mw_fraction
            ));
        }
        if self.max_steps < 1 {
            return Err("max_steps must be >= 1".to_string());
        }
        if self.sample_interval < 1 {
            return Err("sample_interval must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Why a simulation stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminationReason {
    /// Mean MW reached the target fraction.
    TargetReached,
    /// Total reaction rate dropped to zero; no further events possible.
    RatesExhausted,
    /// Step budget ran out before the target was reached.
    StepBudgetExhausted,
}

impl TerminationReason {
    /// String tag used by the binding layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::TargetReached => "target_reached",
            TerminationReason::RatesExhausted => "rates_exhausted",
            TerminationReason::StepBudgetExhausted => "step_budget_exhausted",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::TargetReached => write!(f, "target molecular weight reached"),
            TerminationReason::RatesExhausted => write!(f, "no more events possible"),
            TerminationReason::StepBudgetExhausted => write!(f, "step budget exhausted"),
        }
    }
}

/// One executed scission event.
#[derive(Clone, Copy, Debug)]
pub struct ScissionEvent {
    pub chain_id: usize,
    pub bond_type: BondType,
    /// Exponential waiting time that preceded the event.
    pub waiting_time: f64,
}

/// Result of a degradation run: the sampled (time, mean MW) series plus
/// final scalars.
#[derive(Clone, Debug)]
pub struct DegradationTrace {
    /// (elapsed_time, mean_mw) samples, including the initial state and
    /// the final state.
    pub samples: Vec<(f64, f64)>,
    pub final_mean_mw: f64,
    pub final_time: f64,
    pub n_steps: usize,
    pub termination: TerminationReason,
}

impl DegradationTrace {
    /// True when the run converged to the target fraction.
    pub fn reached_target(&self) -> bool {
        self.termination == TerminationReason::TargetReached
    }
}

/// Gillespie simulator over a degradation ensemble.
pub struct DegradationSimulator {
    kinetics: ArrheniusKinetics,
    config: SimulationConfig,
}

impl DegradationSimulator {
    pub fn new(
        kinetics: ArrheniusKinetics,
        config: SimulationConfig,
    ) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { kinetics, config })
    }

    /// Execute one SSA step.
    ///
    /// Returns `None` when the ensemble-wide total rate is zero: all
    /// chains degraded or bond-exhausted. That is the normal terminal
    /// condition, not an error.
    pub fn step(&self, ensemble: &mut Ensemble, rng: &mut StdRng) -> Option<ScissionEvent> {
        let temperature = ensemble.temperature;

        let chain_rates: Vec<f64> = ensemble
            .chains
            .iter()
            .map(|chain| self.kinetics.chain_rate(chain, temperature))
            .collect();
        let total_rate: f64 = chain_rates.iter().sum();
        if total_rate <= 0.0 {
            return None;
        }

        // Exponential waiting time: dt = -ln(U) / total_rate.
        let dt = -rng.gen::<f64>().ln() / total_rate;
        ensemble.time += dt;

        // Rate-weighted chain selection.
        let u: f64 = rng.gen::<f64>() * total_rate;
        let mut cumsum = 0.0;
        let mut chain_idx = 0;
        for (i, &rate) in chain_rates.iter().enumerate() {
            cumsum += rate;
            if u <= cumsum {
                chain_idx = i;
                break;
            }
        }

        // The chain carried positive rate, so a bond is selectable.
        let bond_idx = self
            .kinetics
            .select_bond(&ensemble.chains[chain_idx], temperature, rng)?;

        let split_draw: f64 = rng.gen();
        let bond = ensemble.chains[chain_idx].apply_scission(bond_idx, split_draw);

        Some(ScissionEvent {
            chain_id: ensemble.chains[chain_idx].id,
            bond_type: bond.bond_type,
            waiting_time: dt,
        })
    }

    /// Run the SSA loop until the target MW fraction is reached, the
    /// total rate hits zero, or the step budget runs out.
    ///
    /// Mean MW is sampled (and the target checked) every
    /// `sample_interval` steps to bound overhead. Deterministic given a
    /// fixed RNG seed and identical inputs.
    pub fn simulate(&self, ensemble: &mut Ensemble, rng: &mut StdRng) -> DegradationTrace {
        let target_mw = self.config.target_mw_fraction * ensemble.initial_mean_mw;

        let mut samples = vec![(ensemble.time, ensemble.mean_molecular_weight())];
        let mut n_steps = 0;
        let mut termination = TerminationReason::StepBudgetExhausted;

        while n_steps < self.config.max_steps {
            if self.step(ensemble, rng).is_none() {
                termination = TerminationReason::RatesExhausted;
                break;
            }
            n_steps += 1;

            if n_steps % self.config.sample_interval == 0 {
                let mean_mw = ensemble.mean_molecular_weight();
                samples.push((ensemble.time, mean_mw));
                if mean_mw <= target_mw {
                    termination = TerminationReason::TargetReached;
                    break;
                }
            }
        }

        let final_mean_mw = ensemble.mean_molecular_weight();
        let final_time = ensemble.time;
        if samples.last().map(|&(t, _)| t) != Some(final_time) {
            samples.push((final_time, final_mean_mw));
        }

        DegradationTrace {
            samples,
            final_mean_mw,
            final_time,
            n_steps,
            termination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::degradation::ensemble::{BondParams, ChainArchitecture};
    use rand::SeedableRng;

    fn test_ensemble(end_accessibility: f64, bulk_accessibility: f64) -> Ensemble {
        Ensemble::new(
            10,
            20,
            37.0,
            7.0,
            ChainArchitecture::Linear,
            &BondParams {
                end_accessibility,
                bulk_accessibility,
                ..BondParams::default()
            },
        )
        .unwrap()
    }

    fn test_simulator(target_mw_fraction: f64) -> DegradationSimulator {
        DegradationSimulator::new(
            ArrheniusKinetics::default(),
            SimulationConfig {
                target_mw_fraction,
                max_steps: 50_000,
                sample_interval: 10,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_step_advances_time_and_consumes_a_bond() {
        let simulator = test_simulator(0.5);
        let mut ensemble = test_ensemble(0.9, 0.1);
        let mut rng = StdRng::seed_from_u64(42);

        let n_bonds_before: usize = ensemble.chains.iter().map(|c| c.n_bonds()).sum();
        let event = simulator.step(&mut ensemble, &mut rng).unwrap();
        let n_bonds_after: usize = ensemble.chains.iter().map(|c| c.n_bonds()).sum();

        assert!(event.waiting_time > 0.0);
        assert!(ensemble.time > 0.0);
        assert_eq!(n_bonds_after, n_bonds_before - 1);
    }

    #[test]
    fn test_molecular_weight_monotonic() {
        let simulator = test_simulator(0.3);
        let mut ensemble = test_ensemble(0.9, 0.5);
        let mut rng = StdRng::seed_from_u64(11);

        let mut previous: Vec<f64> = ensemble
            .chains
            .iter()
            .map(|c| c.molecular_weight)
            .collect();
        let mut previous_time = ensemble.time;

        for _ in 0..2_000 {
            if simulator.step(&mut ensemble, &mut rng).is_none() {
                break;
            }
            for (chain, &prev_mw) in ensemble.chains.iter().zip(previous.iter()) {
                assert!(chain.molecular_weight <= prev_mw);
            }
            assert!(ensemble.time >= previous_time);
            previous = ensemble
                .chains
                .iter()
                .map(|c| c.molecular_weight)
                .collect();
            previous_time = ensemble.time;
        }
    }

    #[test]
    fn test_degraded_chains_stay_degraded() {
        let simulator = test_simulator(0.05);
        let mut ensemble = test_ensemble(0.9, 0.5);
        let mut rng = StdRng::seed_from_u64(3);

        let mut was_degraded = vec![false; ensemble.chains.len()];
        for _ in 0..20_000 {
            if simulator.step(&mut ensemble, &mut rng).is_none() {
                break;
            }
            for (chain, flag) in ensemble.chains.iter().zip(was_degraded.iter_mut()) {
                if *flag {
                    assert!(chain.is_degraded, "degradation latch reverted");
                }
                *flag = chain.is_degraded;
            }
        }
    }

    #[test]
    fn test_simulate_reaches_target() {
        let simulator = test_simulator(0.5);
        let mut ensemble = test_ensemble(0.9, 0.5);
        let mut rng = StdRng::seed_from_u64(42);

        let trace = simulator.simulate(&mut ensemble, &mut rng);
        assert!(trace.reached_target());
        assert!(trace.final_mean_mw <= 0.5 * ensemble.initial_mean_mw);
        assert!(trace.final_time > 0.0);
        assert!(trace.samples.len() >= 2);
    }

    #[test]
    fn test_rate_exhaustion_is_normal_termination() {
        // Zero accessibility everywhere: total rate is zero at step one.
        let simulator = test_simulator(0.5);
        let mut ensemble = test_ensemble(0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(1);

        let trace = simulator.simulate(&mut ensemble, &mut rng);
        assert_eq!(trace.termination, TerminationReason::RatesExhausted);
        assert_eq!(trace.n_steps, 0);
        assert_eq!(trace.final_mean_mw, ensemble.initial_mean_mw);
    }

    #[test]
    fn test_step_budget_is_detectable() {
        let simulator = DegradationSimulator::new(
            ArrheniusKinetics::default(),
            SimulationConfig {
                target_mw_fraction: 0.01,
                max_steps: 5,
                sample_interval: 1,
            },
        )
        .unwrap();
        let mut ensemble = test_ensemble(0.9, 0.5);
        let mut rng = StdRng::seed_from_u64(9);

        let trace = simulator.simulate(&mut ensemble, &mut rng);
        assert_eq!(trace.termination, TerminationReason::StepBudgetExhausted);
        assert_eq!(trace.n_steps, 5);
        // Data gathered so far is still returned.
        assert!(!trace.samples.is_empty());
    }

    #[test]
    fn test_simulate_deterministic_given_seed() {
        let simulator = test_simulator(0.4);

        let run = |seed: u64| {
            let mut ensemble = test_ensemble(0.9, 0.5);
            let mut rng = StdRng::seed_from_u64(seed);
            simulator.simulate(&mut ensemble, &mut rng)
        };

        let a = run(42);
        let b = run(42);
        assert_eq!(a.samples, b.samples);
        assert_eq!(a.final_mean_mw, b.final_mean_mw);
        assert_eq!(a.final_time, b.final_time);
        assert_eq!(a.n_steps, b.n_steps);

        let c = run(43);
        assert_ne!(a.samples, c.samples);
    }

    #[test]
    fn test_config_validation() {
        let bad_fraction = SimulationConfig {
            target_mw_fraction: 0.0,
            ..SimulationConfig::default()
        };
        assert!(bad_fraction.validate().is_err());

        let bad_interval = SimulationConfig {
            sample_interval: 0,
            ..SimulationConfig::default()
        };
        assert!(bad_interval.validate().is_err());

        assert!(SimulationConfig::default().validate().is_ok());
    }
}
