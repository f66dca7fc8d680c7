//! Descriptive metadata of an extinction map

use serde::{Deserialize, Serialize};

/// Whether the stored quantity is a total extinction or a colour excess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtinctionQuantity {
    /// A_λ: total extinction at the reference wavelength
    TotalExtinction,
    /// E(λ1 - λ2): colour excess between two bands
    ColorExcess,
}

impl ExtinctionQuantity {
    /// Classify a quantity tag such as `A_Ks` or `E(B-V)` by its first letter.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim_start().chars().next() {
            Some('A') => Some(Self::TotalExtinction),
            Some('E') => Some(Self::ColorExcess),
            _ => None,
        }
    }
}

/// Basic parameters used to hand a map's output to an extinction law
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapProperties {
    pub name: String,
    /// Reference wavelength in micrometres
    pub ref_wavelength_um: f64,
    /// Quantity tag as stored by the map, e.g. `A_Ks`
    pub quantity_tag: String,
    pub quantity: ExtinctionQuantity,
}

impl MapProperties {
    /// Returns `None` when the tag is neither an `A…` nor an `E…` quantity.
    pub fn new(name: &str, ref_wavelength_um: f64, quantity_tag: &str) -> Option<Self> {
        let quantity = ExtinctionQuantity::from_tag(quantity_tag)?;
        Some(Self {
            name: name.to_string(),
            ref_wavelength_um,
            quantity_tag: quantity_tag.to_string(),
            quantity,
        })
    }

    pub fn is_total_extinction(&self) -> bool {
        self.quantity == ExtinctionQuantity::TotalExtinction
    }
}
