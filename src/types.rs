use derive_more::{Display, From, Into};

/// Cluster index within the cluster heap, data clusters start at 2
#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub struct ClusterID(u32);

impl ClusterID {
    pub const FIRST: Self = Self(2);
    /// Exclusive upper bound of addressable cluster indices
    pub const LIMIT: Self = Self(0x0FFF_FFFF);

    /// Whether this index may be dereferenced into the cluster heap
    pub fn valid(&self) -> bool {
        Self::FIRST <= *self && *self < Self::LIMIT
    }

    /// Zero based position within the cluster heap
    pub(crate) fn offset(self) -> u32 {
        self.0 - Self::FIRST.0
    }
}

impl<I: Into<u32>> core::ops::Add<I> for ClusterID {
    type Output = Self;

    fn add(self, rhs: I) -> Self {
        Self(self.0.wrapping_add(rhs.into()))
    }
}
