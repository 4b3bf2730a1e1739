use ndarray::Array2;
use numpy::{PyArray1, PyArray2};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use pyo3::wrap_pyfunction;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod degradation;

use degradation::ensemble::{BondParams, ChainArchitecture, Ensemble};
use degradation::gillespie::{DegradationSimulator, SimulationConfig};
use degradation::kinetics::ArrheniusKinetics;
use degradation::reproducibility::ReplicateConfig;
use degradation::{omega, reproducibility};

fn value_error(message: String) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(message)
}

/// Simulate degradation of one ensemble and return its time series.
///
/// This is the single-run entry point from Python: it builds the
/// ensemble, runs the Gillespie loop to the target molecular-weight
/// fraction (or budget), and returns the sampled trajectory.
///
/// # Arguments
/// * `n_chains` - Chains in the ensemble
/// * `n_monomers` - Repeat units per chain
/// * `temperature` - Temperature in Celsius
/// * `chain_type` - "linear" or "crosslinked"
/// * `seed` - RNG seed (fixed seed gives bit-identical output)
///
/// # Returns
/// * Dict with "trace" ((n_samples, 2) array of time and mean MW),
///   "final_mean_mw", "final_time", "n_steps", "termination"
#[pyfunction]
#[pyo3(signature = (n_chains, n_monomers, temperature, chain_type,
    end_accessibility=0.9, bulk_accessibility=0.1, crosslink_density=0.0,
    monomer_mass=100.0, ph=7.0, target_mw_fraction=0.5,
    max_steps=1_000_000, sample_interval=100, seed=42))]
#[allow(clippy::too_many_arguments)]
fn simulate_polymer_degradation<'py>(
    py: Python<'py>,
    n_chains: usize,
    n_monomers: usize,
    temperature: f64,
    chain_type: &str,
    end_accessibility: f64,
    bulk_accessibility: f64,
    crosslink_density: f64,
    monomer_mass: f64,
    ph: f64,
    target_mw_fraction: f64,
    max_steps: usize,
    sample_interval: usize,
    seed: u64,
) -> PyResult<&'py PyDict> {
    let architecture = ChainArchitecture::parse(chain_type).map_err(value_error)?;
    let params = BondParams {
        end_accessibility,
        bulk_accessibility,
        crosslink_density,
        monomer_mass,
    };
    let mut ensemble = Ensemble::new(n_chains, n_monomers, temperature, ph, architecture, &params)
        .map_err(value_error)?;

    let simulator = DegradationSimulator::new(
        ArrheniusKinetics::default(),
        SimulationConfig {
            target_mw_fraction,
            max_steps,
            sample_interval,
        },
    )
    .map_err(value_error)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let trace = simulator.simulate(&mut ensemble, &mut rng);

    let mut matrix = Array2::<f64>::zeros((trace.samples.len(), 2));
    for (i, &(time, mean_mw)) in trace.samples.iter().enumerate() {
        matrix[[i, 0]] = time;
        matrix[[i, 1]] = mean_mw;
    }

    let result = PyDict::new(py);
    result.set_item("trace", PyArray2::from_owned_array(py, matrix))?;
    result.set_item("final_mean_mw", trace.final_mean_mw)?;
    result.set_item("final_time", trace.final_time)?;
    result.set_item("n_steps", trace.n_steps)?;
    result.set_item("termination", trace.termination.as_str())?;
    result.set_item("reached_target", trace.reached_target())?;
    Ok(result)
}

/// Simulate independent replicate ensembles in parallel and report
/// coefficient-of-variation statistics of the final state.
///
/// Each replicate is seeded as `seed + replicate_index`, so the batch is
/// deterministic under parallel execution and replicates stay
/// statistically independent.
///
/// # Returns
/// * Dict with "cv_mw", "cv_time" (percent), "mean_mw", "std_mw",
///   "mean_time", "std_time", "raw_mw", "raw_time", "n_target_reached"
#[pyfunction]
#[pyo3(signature = (n_replicates, n_chains, n_monomers, temperature, chain_type,
    end_accessibility=0.9, bulk_accessibility=0.1, crosslink_density=0.0,
    monomer_mass=100.0, ph=7.0, target_mw_fraction=0.5,
    max_steps=1_000_000, sample_interval=100, seed=42))]
#[allow(clippy::too_many_arguments)]
fn compute_reproducibility<'py>(
    py: Python<'py>,
    n_replicates: usize,
    n_chains: usize,
    n_monomers: usize,
    temperature: f64,
    chain_type: &str,
    end_accessibility: f64,
    bulk_accessibility: f64,
    crosslink_density: f64,
    monomer_mass: f64,
    ph: f64,
    target_mw_fraction: f64,
    max_steps: usize,
    sample_interval: usize,
    seed: u64,
) -> PyResult<&'py PyDict> {
    let architecture = ChainArchitecture::parse(chain_type).map_err(value_error)?;
    let config = ReplicateConfig {
        n_replicates,
        n_chains,
        n_monomers,
        temperature,
        ph,
        architecture,
        bond_params: BondParams {
            end_accessibility,
            bulk_accessibility,
            crosslink_density,
            monomer_mass,
        },
        simulation: SimulationConfig {
            target_mw_fraction,
            max_steps,
            sample_interval,
        },
    };

    let stats = reproducibility::compute_reproducibility(&config, seed).map_err(value_error)?;

    let result = PyDict::new(py);
    result.set_item("cv_mw", stats.cv_mw)?;
    result.set_item("cv_time", stats.cv_time)?;
    result.set_item("mean_mw", stats.mean_mw)?;
    result.set_item("std_mw", stats.std_mw)?;
    result.set_item("mean_time", stats.mean_time)?;
    result.set_item("std_time", stats.std_time)?;
    result.set_item("raw_mw", PyArray1::from_vec(py, stats.raw_mw))?;
    result.set_item("raw_time", PyArray1::from_vec(py, stats.raw_time))?;
    result.set_item("n_target_reached", stats.n_target_reached)?;
    Ok(result)
}

/// Effective configurational-entropy count for a chain construction.
#[pyfunction]
#[pyo3(signature = (n_monomers, chain_type, end_accessibility=0.9,
    bulk_accessibility=0.1, crosslink_density=0.0))]
fn estimate_omega(
    n_monomers: usize,
    chain_type: &str,
    end_accessibility: f64,
    bulk_accessibility: f64,
    crosslink_density: f64,
) -> PyResult<f64> {
    let architecture = ChainArchitecture::parse(chain_type).map_err(value_error)?;
    let params = BondParams {
        end_accessibility,
        bulk_accessibility,
        crosslink_density,
        ..BondParams::default()
    };
    omega::estimate_omega(n_monomers, architecture, &params).map_err(value_error)
}

/// Clamp raw omega onto the effective-omega regression scale.
#[pyfunction]
fn estimate_omega_effective(omega_raw: f64) -> f64 {
    omega::effective_omega(omega_raw)
}

/// Closed-form causality prediction C = omega^(-ln2/d).
#[pyfunction]
#[pyo3(signature = (omega_raw, dimension=3.0))]
fn predicted_causality(omega_raw: f64, dimension: f64) -> f64 {
    omega::predicted_causality(omega_raw, dimension)
}

/// Convert an observed CV (fraction) to the causality scale 1/(1+CV).
#[pyfunction]
fn causality_from_cv(cv_fraction: f64) -> f64 {
    omega::causality_from_cv(cv_fraction)
}

/// Python module definition
#[pymodule]
fn darwin_degradation(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(simulate_polymer_degradation, m)?)?;
    m.add_function(wrap_pyfunction!(compute_reproducibility, m)?)?;
    m.add_function(wrap_pyfunction!(estimate_omega, m)?)?;
    m.add_function(wrap_pyfunction!(estimate_omega_effective, m)?)?;
    m.add_function(wrap_pyfunction!(predicted_causality, m)?)?;
    m.add_function(wrap_pyfunction!(causality_from_cv, m)?)?;
    Ok(())
}
