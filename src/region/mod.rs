/// Boot region, volume configuration parameters
pub(crate) mod boot;

/// FAT region, one 32-bit entry per cluster
pub(crate) mod fat;

/// Data region, directory entry layouts
pub(crate) mod data;
