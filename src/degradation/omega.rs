//! Effective configurational-entropy (omega) estimation and the
//! closed-form causality helpers regressed against it.
//!
//! Omega is a pure function of chain construction parameters. It is
//! deliberately decoupled from the simulation core so the two can be
//! compared independently.

use super::chain::CROSSLINK_ACCESSIBILITY;
use super::ensemble::{BondParams, ChainArchitecture};

/// Scale factor mapping raw omega to effective omega.
pub const OMEGA_EFF_ALPHA: f64 = 0.055;
/// Lower clamp of the effective-omega map.
pub const OMEGA_EFF_MIN: f64 = 2.0;
/// Upper clamp of the effective-omega map.
pub const OMEGA_EFF_MAX: f64 = 2.73;

/// Effective number of reactive configurations implied by the chain
/// construction parameters.
///
/// Linear chains count accessibility-weighted bonds: up to four
/// chain-end bonds (two per terminus) at the end accessibility, the
/// rest at the bulk accessibility. Crosslinked chains add one
/// crosslink-accessibility contribution per crosslink bond.
///
/// # Arguments
/// * `n_monomers` - Repeat units per chain (>= 2)
/// * `architecture` - Chain architecture
/// * `params` - Bond construction parameters
pub fn estimate_omega(
    n_monomers: usize,
    architecture: ChainArchitecture,
    params: &BondParams,
) -> Result<f64, String> {
    if n_monomers < 2 {
        return Err(format!(
            "a chain needs at least one bond (n_monomers >= 2), got {}",
            n_monomers
        ));
    }

    let n_bonds = n_monomers - 1;
    let n_end = n_bonds.min(4);
    let n_bulk = n_bonds - n_end;
    let backbone = n_end as f64 * params.end_accessibility
        + n_bulk as f64 * params.bulk_accessibility;

    match architecture {
        ChainArchitecture::Linear => Ok(backbone),
        ChainArchitecture::Crosslinked => {
            let n_crosslinks = (params.crosslink_density * n_monomers as f64).round();
            Ok(backbone + n_crosslinks * CROSSLINK_ACCESSIBILITY)
        }
    }
}

/// Map raw omega onto the effective-omega scale used by the regression:
/// `clamp(alpha * omega, 2.0, 2.73)`.
pub fn effective_omega(omega: f64) -> f64 {
    (OMEGA_EFF_ALPHA * omega).clamp(OMEGA_EFF_MIN, OMEGA_EFF_MAX)
}

/// Closed-form causality prediction `C = omega^(-ln 2 / d)` for pathway
/// dimensionality `d`.
pub fn predicted_causality(omega: f64, dimension: f64) -> f64 {
    omega.powf(-std::f64::consts::LN_2 / dimension)
}

/// Convert an observed CV (as a fraction, not percent) to the causality
/// scale: `C = 1 / (1 + CV)`.
pub fn causality_from_cv(cv_fraction: f64) -> f64 {
    1.0 / (1.0 + cv_fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_omega() {
        let params = BondParams {
            end_accessibility: 0.9,
            bulk_accessibility: 0.01,
            ..BondParams::default()
        };
        // 9 bonds: 4 chain-end + 5 bulk.
        let omega = estimate_omega(10, ChainArchitecture::Linear, &params).unwrap();
        assert!((omega - (4.0 * 0.9 + 5.0 * 0.01)).abs() < 1e-12);
    }

    #[test]
    fn test_short_chain_omega_caps_end_bonds() {
        let params = BondParams {
            end_accessibility: 0.5,
            bulk_accessibility: 0.2,
            ..BondParams::default()
        };
        // 2 bonds, both chain-end; no bulk term.
        let omega = estimate_omega(3, ChainArchitecture::Linear, &params).unwrap();
        assert!((omega - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_crosslinked_omega_adds_crosslink_weight() {
        let params = BondParams {
            end_accessibility: 0.9,
            bulk_accessibility: 0.1,
            crosslink_density: 0.25,
            ..BondParams::default()
        };
        let linear = estimate_omega(20, ChainArchitecture::Linear, &params).unwrap();
        let crosslinked =
            estimate_omega(20, ChainArchitecture::Crosslinked, &params).unwrap();
        // round(0.25 * 20) = 5 crosslinks at 0.1 accessibility.
        assert!((crosslinked - (linear + 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_omega_rejects_bondless_chain() {
        assert!(estimate_omega(1, ChainArchitecture::Linear, &BondParams::default()).is_err());
    }

    #[test]
    fn test_effective_omega_clamps() {
        assert_eq!(effective_omega(1.0), OMEGA_EFF_MIN);
        assert_eq!(effective_omega(10_000.0), OMEGA_EFF_MAX);
        let mid = effective_omega(45.0);
        assert!((mid - 0.055 * 45.0).abs() < 1e-12);
    }

    #[test]
    fn test_causality_helpers() {
        // Omega = 2 at d = 3 gives C = 2^(-ln2/3).
        let c = predicted_causality(2.0, 3.0);
        assert!((c - 2f64.powf(-std::f64::consts::LN_2 / 3.0)).abs() < 1e-12);
        assert!(c > 0.0 && c < 1.0);

        assert_eq!(causality_from_cv(0.0), 1.0);
        assert!((causality_from_cv(0.25) - 0.8).abs() < 1e-12);
    }
}
