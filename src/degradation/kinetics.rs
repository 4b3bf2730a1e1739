//! Arrhenius kinetics: converts static bond/chain attributes plus the
//! ensemble temperature into breakage rates.

use rand::rngs::StdRng;
use rand::Rng;

use super::chain::{Bond, Chain};

/// Arrhenius rate model.
///
/// Factorized per-bond rate:
///     k(bond) = A × exp(-Ea / (R · T_kelvin)) × accessibility
///
/// Where:
///     A  - Pre-exponential frequency factor
///     Ea - Bond activation energy (kJ/mol, converted to J/mol)
///     R  - Gas constant
///     accessibility - Steric/diffusion exposure weight in [0, 1]
#[derive(Clone, Copy, Debug)]
pub struct ArrheniusKinetics {
    /// Pre-exponential factor A (1/s).
    pub prefactor: f64,
    /// Gas constant R (J/(mol·K)).
    pub gas_constant: f64,
}

impl Default for ArrheniusKinetics {
    fn default() -> Self {
        Self {
            prefactor: 1.0e13,
            gas_constant: 8.314,
        }
    }
}

impl ArrheniusKinetics {
    /// Breakage rate of a single bond at `temperature` (Celsius).
    ///
    /// Finite and non-negative for any valid bond (Ea >= 0,
    /// accessibility in [0, 1]) at any temperature above absolute zero.
    #[inline]
    pub fn bond_rate(&self, bond: &Bond, temperature: f64) -> f64 {
        let kelvin = temperature + 273.15;
        let exponent = -bond.activation_energy * 1000.0 / (self.gas_constant * kelvin);
        self.prefactor * exponent.exp() * bond.accessibility
    }

    /// Total breakage rate of a chain: zero for degraded or
    /// bond-exhausted chains, else the sum over remaining bonds.
    pub fn chain_rate(&self, chain: &Chain, temperature: f64) -> f64 {
        if chain.is_degraded || chain.bonds.is_empty() {
            return 0.0;
        }
        chain
            .bonds
            .iter()
            .map(|bond| self.bond_rate(bond, temperature))
            .sum()
    }

    /// Rate-weighted random choice among a chain's remaining bonds.
    ///
    /// Selection probability is proportional to each bond's Arrhenius
    /// rate. Returns `None` if the chain has no bonds or no bond carries
    /// positive rate.
    pub fn select_bond(
        &self,
        chain: &Chain,
        temperature: f64,
        rng: &mut StdRng,
    ) -> Option<usize> {
        if chain.bonds.is_empty() {
            return None;
        }

        let rates: Vec<f64> = chain
            .bonds
            .iter()
            .map(|bond| self.bond_rate(bond, temperature))
            .collect();
        let total_rate: f64 = rates.iter().sum();
        if total_rate <= 0.0 {
            return None;
        }

        let u: f64 = rng.gen::<f64>() * total_rate;
        let mut cumsum = 0.0;
        let mut chosen_idx = 0;
        for (i, &rate) in rates.iter().enumerate() {
            cumsum += rate;
            if u <= cumsum {
                chosen_idx = i;
                break;
            }
        }
        Some(chosen_idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::degradation::chain::BondType;
    use rand::SeedableRng;

    fn bond(bond_type: BondType, activation_energy: f64, accessibility: f64) -> Bond {
        Bond {
            id: 0,
            bond_type,
            activation_energy,
            accessibility,
        }
    }

    #[test]
    fn test_bond_rate_finite_and_non_negative() {
        let kinetics = ArrheniusKinetics::default();
        for &ea in &[0.0, 80.0, 100.0, 120.0, 500.0] {
            for &acc in &[0.0, 0.01, 0.5, 1.0] {
                for &temp in &[-100.0, 0.0, 37.0, 250.0] {
                    let rate = kinetics.bond_rate(&bond(BondType::Bulk, ea, acc), temp);
                    assert!(rate.is_finite(), "Ea={} acc={} T={}", ea, acc, temp);
                    assert!(rate >= 0.0, "Ea={} acc={} T={}", ea, acc, temp);
                }
            }
        }
    }

    #[test]
    fn test_bond_rate_monotonic_in_activation_energy() {
        let kinetics = ArrheniusKinetics::default();
        let low = kinetics.bond_rate(&bond(BondType::ChainEnd, 80.0, 0.5), 37.0);
        let high = kinetics.bond_rate(&bond(BondType::Bulk, 100.0, 0.5), 37.0);
        assert!(low > high);
    }

    #[test]
    fn test_bond_rate_monotonic_in_temperature_and_accessibility() {
        let kinetics = ArrheniusKinetics::default();
        let b = bond(BondType::Bulk, 100.0, 0.5);
        assert!(kinetics.bond_rate(&b, 60.0) > kinetics.bond_rate(&b, 37.0));

        let exposed = bond(BondType::Bulk, 100.0, 0.9);
        let buried = bond(BondType::Bulk, 100.0, 0.1);
        assert!(kinetics.bond_rate(&exposed, 37.0) > kinetics.bond_rate(&buried, 37.0));
    }

    #[test]
    fn test_chain_rate_zero_for_degraded_chain() {
        let kinetics = ArrheniusKinetics::default();
        let mut chain = Chain::linear(0, 10, 100.0, 0.9, 0.1).unwrap();
        assert!(kinetics.chain_rate(&chain, 37.0) > 0.0);

        chain.is_degraded = true;
        assert_eq!(kinetics.chain_rate(&chain, 37.0), 0.0);
    }

    #[test]
    fn test_select_bond_prefers_high_rate_bonds() {
        // Chain-end bonds at 0.9 accessibility and 80 kJ/mol dominate
        // bulk bonds at 0.01 and 100 kJ/mol by several orders of
        // magnitude, so essentially every draw picks a chain end.
        let kinetics = ArrheniusKinetics::default();
        let chain = Chain::linear(0, 50, 100.0, 0.9, 0.01).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let idx = kinetics.select_bond(&chain, 37.0, &mut rng).unwrap();
            assert_eq!(chain.bonds[idx].bond_type, BondType::ChainEnd);
        }
    }

    #[test]
    fn test_select_bond_none_when_no_rate() {
        let kinetics = ArrheniusKinetics::default();
        let mut chain = Chain::linear(0, 10, 100.0, 0.0, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(kinetics.select_bond(&chain, 37.0, &mut rng).is_none());

        chain.bonds.clear();
        assert!(kinetics.select_bond(&chain, 37.0, &mut rng).is_none());
    }
}
