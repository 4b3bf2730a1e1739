//! Ensemble construction: a fixed-size population of independent chains
//! plus environment scalars and the simulated clock.

use super::chain::Chain;

/// Supported chain architectures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainArchitecture {
    Linear,
    Crosslinked,
}

impl ChainArchitecture {
    /// Parse the string tag used by the binding layer.
    pub fn parse(tag: &str) -> Result<Self, String> {
        match tag {
            "linear" => Ok(ChainArchitecture::Linear),
            "crosslinked" => Ok(ChainArchitecture::Crosslinked),
            other => Err(format!(
                "unknown chain_type '{}' (expected 'linear' or 'crosslinked')",
                other
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChainArchitecture::Linear => "linear",
            ChainArchitecture::Crosslinked => "crosslinked",
        }
    }
}

/// Bond construction parameters shared by every chain in an ensemble.
#[derive(Clone, Copy, Debug)]
pub struct BondParams {
    /// Accessibility of chain-end bonds, in [0, 1].
    pub end_accessibility: f64,
    /// Accessibility of bulk bonds, in [0, 1].
    pub bulk_accessibility: f64,
    /// Crosslinks per monomer; only used by the crosslinked architecture.
    pub crosslink_density: f64,
    /// Mass of one repeat unit.
    pub monomer_mass: f64,
}

impl Default for BondParams {
    fn default() -> Self {
        Self {
            end_accessibility: 0.9,
            bulk_accessibility: 0.1,
            crosslink_density: 0.0,
            monomer_mass: 100.0,
        }
    }
}

/// A population of independent chains under shared environment scalars.
///
/// `time` is the simulated clock: it accumulates exponential waiting
/// times and is monotonically non-decreasing.
#[derive(Clone, Debug)]
pub struct Ensemble {
    pub chains: Vec<Chain>,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Retained environment metadata; not read by the kinetics.
    pub ph: f64,
    /// Elapsed simulated time.
    pub time: f64,
    /// Mean molecular weight at construction, for fraction targets.
    pub initial_mean_mw: f64,
}

impl Ensemble {
    /// Build `n_chains` independently constructed chains.
    ///
    /// Chains share no bond storage, so degradation of one chain can
    /// never affect another. Fails if `n_chains < 1`, if the
    /// architecture's chain constructor rejects its parameters, or if
    /// the temperature is at or below absolute zero.
    pub fn new(
        n_chains: usize,
        n_monomers: usize,
        temperature: f64,
        ph: f64,
        architecture: ChainArchitecture,
        params: &BondParams,
    ) -> Result<Self, String> {
        if n_chains < 1 {
            return Err(format!("n_chains must be >= 1, got {}", n_chains));
        }
        if temperature <= -273.15 {
            return Err(format!(
                "temperature must be above absolute zero, got {}",
                temperature
            ));
        }

        let chains = (0..n_chains)
            .map(|id| match architecture {
                ChainArchitecture::Linear => Chain::linear(
                    id,
                    n_monomers,
                    params.monomer_mass,
                    params.end_accessibility,
                    params.bulk_accessibility,
                ),
                ChainArchitecture::Crosslinked => Chain::crosslinked(
                    id,
                    n_monomers,
                    params.crosslink_density,
                    params.monomer_mass,
                    params.end_accessibility,
                    params.bulk_accessibility,
                ),
            })
            .collect::<Result<Vec<Chain>, String>>()?;

        let initial_mean_mw =
            chains.iter().map(|c| c.molecular_weight).sum::<f64>() / chains.len() as f64;

        Ok(Self {
            chains,
            temperature,
            ph,
            time: 0.0,
            initial_mean_mw,
        })
    }

    /// Current mean molecular weight over all chains (degraded included).
    pub fn mean_molecular_weight(&self) -> f64 {
        self.chains.iter().map(|c| c.molecular_weight).sum::<f64>() / self.chains.len() as f64
    }

    /// Current mean molecular weight as a fraction of the initial mean.
    pub fn mw_fraction(&self) -> f64 {
        self.mean_molecular_weight() / self.initial_mean_mw
    }
}
