//! Strongly-typed identifiers for network-owned domains and contractors.

use std::fmt;

/// Identifies a domain (enclosure) owned by a contractor network.
///
/// Domains are created through the network and assigned sequential IDs.
/// `DomainId(n)` is the n-th domain created in that network; it stays
/// valid for the network's whole lifetime since domains are never removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainId(pub u32);

impl DomainId {
    /// Position of this domain in the owning arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}

impl From<u32> for DomainId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies one registration of a contractor in a network.
///
/// Registering the same contractor object twice yields two distinct IDs,
/// one per scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContractorId(pub u32);

impl ContractorId {
    /// Position of this contractor in the owning arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ContractorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ContractorId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_with_prefix() {
        assert_eq!(DomainId(3).to_string(), "d3");
        assert_eq!(ContractorId(7).to_string(), "c7");
    }

    #[test]
    fn ids_index_matches_raw_value() {
        assert_eq!(DomainId::from(12).index(), 12);
        assert_eq!(ContractorId::from(0).index(), 0);
    }

    #[test]
    fn ids_order_by_creation() {
        assert!(DomainId(1) < DomainId(2));
        assert!(ContractorId(4) > ContractorId(0));
    }
}
