//! Bond and chain model for polymer degradation.
//!
//! A chain is an ordered collection of breakable bonds plus scalar mass
//! state. Bonds are immutable once built and are consumed (removed, not
//! mutated) when broken.

/// Activation energy for chain-end bonds (kJ/mol).
pub const CHAIN_END_ACTIVATION_ENERGY: f64 = 80.0;
/// Activation energy for bulk backbone bonds (kJ/mol).
pub const BULK_ACTIVATION_ENERGY: f64 = 100.0;
/// Activation energy for crosslink bonds (kJ/mol).
pub const CROSSLINK_ACTIVATION_ENERGY: f64 = 120.0;
/// Steric accessibility assigned to crosslink bonds.
pub const CROSSLINK_ACCESSIBILITY: f64 = 0.1;

/// Closed set of bond types.
///
/// Every variant has a defined scission behavior in
/// [`Chain::apply_scission`]; adding a variant forces that match to be
/// updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BondType {
    /// Terminal backbone bond; scission unzips one monomer.
    ChainEnd,
    /// Interior backbone bond; scission cuts the chain at a random point.
    Bulk,
    /// Inter-chain constraint; does not contribute to mass accounting.
    Crosslink,
    /// Branch-point bond.
    Branch,
}

impl BondType {
    /// String tag used by the binding layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            BondType::ChainEnd => "chain_end",
            BondType::Bulk => "bulk",
            BondType::Crosslink => "crosslink",
            BondType::Branch => "branch",
        }
    }
}

/// One breakable linkage in a chain.
#[derive(Clone, Debug)]
pub struct Bond {
    /// Position index within the chain (unique per chain, not globally).
    pub id: usize,
    pub bond_type: BondType,
    /// Arrhenius activation energy (kJ/mol), non-negative.
    pub activation_energy: f64,
    /// Multiplicative rate weight in [0, 1] for steric/diffusion exposure.
    pub accessibility: f64,
}

/// A degradable polymer chain.
///
/// `molecular_weight` is monotonically non-increasing over the chain's
/// lifetime. Once `is_degraded` latches true the chain contributes zero
/// rate and is never selected again.
#[derive(Clone, Debug)]
pub struct Chain {
    /// Unique within an ensemble.
    pub id: usize,
    pub bonds: Vec<Bond>,
    pub molecular_weight: f64,
    pub monomer_mass: f64,
    pub is_degraded: bool,
}

fn check_accessibility(name: &str, value: f64) -> Result<(), String> {
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{} must be in [0, 1], got {}", name, value));
    }
    Ok(())
}

impl Chain {
    /// Build a linear chain of `n_monomers` repeat units.
    ///
    /// Produces `n_monomers - 1` backbone bonds. The first two and last
    /// two bonds are chain-end type; all interior bonds are bulk type.
    ///
    /// # Arguments
    /// * `id` - Chain identifier within the ensemble
    /// * `n_monomers` - Number of repeat units (>= 2)
    /// * `monomer_mass` - Mass of one repeat unit (> 0)
    /// * `end_accessibility` - Accessibility of chain-end bonds, in [0, 1]
    /// * `bulk_accessibility` - Accessibility of bulk bonds, in [0, 1]
    pub fn linear(
        id: usize,
        n_monomers: usize,
        monomer_mass: f64,
        end_accessibility: f64,
        bulk_accessibility: f64,
    ) -> Result<Self, String> {
        if n_monomers < 2 {
            return Err(format!(
                "a chain needs at least one bond (n_monomers >= 2), got {}",
                n_monomers
            ));
        }
        if monomer_mass <= 0.0 {
            return Err(format!("monomer_mass must be positive, got {}", monomer_mass));
        }
        check_accessibility("end_accessibility", end_accessibility)?;
        check_accessibility("bulk_accessibility", bulk_accessibility)?;

        let n_bonds = n_monomers - 1;
        let bonds = (0..n_bonds)
            .map(|i| {
                // The two bonds at each terminus are exposed chain ends.
                if i < 2 || i >= n_bonds.saturating_sub(2) {
                    Bond {
                        id: i,
                        bond_type: BondType::ChainEnd,
                        activation_energy: CHAIN_END_ACTIVATION_ENERGY,
                        accessibility: end_accessibility,
                    }
                } else {
                    Bond {
                        id: i,
                        bond_type: BondType::Bulk,
                        activation_energy: BULK_ACTIVATION_ENERGY,
                        accessibility: bulk_accessibility,
                    }
                }
            })
            .collect();

        Ok(Self {
            id,
            bonds,
            molecular_weight: n_monomers as f64 * monomer_mass,
            monomer_mass,
            is_degraded: false,
        })
    }

    /// Build a crosslinked chain: a linear backbone plus
    /// `round(crosslink_density * n_monomers)` crosslink bonds.
    ///
    /// Crosslink bonds carry their own activation energy and
    /// accessibility and do not enter the mass accounting; the initial
    /// molecular weight is the same as the linear chain's.
    pub fn crosslinked(
        id: usize,
        n_monomers: usize,
        crosslink_density: f64,
        monomer_mass: f64,
        end_accessibility: f64,
        bulk_accessibility: f64,
    ) -> Result<Self, String> {
        if !(0.0..=1.0).contains(&crosslink_density) {
            return Err(format!(
                "crosslink_density must be in [0, 1], got {}",
                crosslink_density
            ));
        }

        let mut chain = Self::linear(
            id,
            n_monomers,
            monomer_mass,
            end_accessibility,
            bulk_accessibility,
        )?;

        let n_crosslinks = (crosslink_density * n_monomers as f64).round() as usize;
        let base = chain.bonds.len();
        chain.bonds.extend((0..n_crosslinks).map(|i| Bond {
            id: base + i,
            bond_type: BondType::Crosslink,
            activation_energy: CROSSLINK_ACTIVATION_ENERGY,
            accessibility: CROSSLINK_ACCESSIBILITY,
        }));

        Ok(chain)
    }

    /// Number of remaining bonds.
    #[inline]
    pub fn n_bonds(&self) -> usize {
        self.bonds.len()
    }

    /// Break the bond at `bond_index` and apply the mass-update rule for
    /// its type, consuming the bond.
    ///
    /// `split_draw` is a Uniform(0,1) sample used by the random-cut rule
    /// (`mw *= 2 * min(u, 1-u)`): the chain is cut at a uniform point
    /// and only the larger fragment is tracked.
    ///
    /// Marks the chain degraded once `molecular_weight` falls strictly
    /// below `2 * monomer_mass` or the last bond is consumed.
    ///
    /// # Returns
    /// The broken bond.
    pub fn apply_scission(&mut self, bond_index: usize, split_draw: f64) -> Bond {
        let bond = self.bonds.remove(bond_index);

        match bond.bond_type {
            BondType::ChainEnd => {
                // End-unzipping: lose exactly one monomer.
                self.molecular_weight -= self.monomer_mass;
            }
            BondType::Bulk | BondType::Crosslink | BondType::Branch => {
                let fraction = 2.0 * split_draw.min(1.0 - split_draw);
                self.molecular_weight *= fraction;
            }
        }

        if self.molecular_weight < 2.0 * self.monomer_mass || self.bonds.is_empty() {
            self.is_degraded = true;
        }

        bond
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chain(id={}, bonds={}, mw={:.1}{})",
            self.id,
            self.bonds.len(),
            self.molecular_weight,
            if self.is_degraded { ", degraded" } else { "" }
        )
    }
}
