use crate::error::Error;
use crate::region::boot::BootSector;
use crate::types::ClusterID;

/// Volume geometry decoded from boot sector, all offsets in bytes from image start
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub sector_size_shift: u8,
    pub sectors_per_cluster_shift: u8,
    pub fat_offset: u64,
    pub fat_length: u64,
    pub cluster_heap_offset: u64,
    pub cluster_count: u32,
    pub root: ClusterID,
}

impl Geometry {
    pub fn parse(image: &[u8]) -> Result<Self, Error> {
        Self::from_boot_sector(&BootSector::parse(image)?, image.len())
    }

    pub(crate) fn from_boot_sector(boot: &BootSector, length: usize) -> Result<Self, Error> {
        let sector_size_shift = boot.bytes_per_sector_shift;
        let sectors_per_cluster_shift = boot.sectors_per_cluster_shift;
        if sector_size_shift as u32 + sectors_per_cluster_shift as u32 >= u32::BITS {
            let reason = "cluster size exceeds 32 bits";
            return Err(Error::MalformedBootSector { length, reason });
        }
        let sectors = |count: u32| (count as u64) << sector_size_shift;
        Ok(Self {
            sector_size_shift,
            sectors_per_cluster_shift,
            fat_offset: sectors(boot.fat_offset.to_ne()),
            fat_length: sectors(boot.fat_length.to_ne()),
            cluster_heap_offset: sectors(boot.cluster_heap_offset.to_ne()),
            cluster_count: boot.cluster_count.to_ne(),
            root: boot.first_cluster_of_root_directory.to_ne().into(),
        })
    }

    pub fn sector_size(&self) -> u32 {
        1 << self.sector_size_shift
    }

    pub fn sectors_per_cluster(&self) -> u32 {
        1 << self.sectors_per_cluster_shift
    }

    pub fn cluster_size_shift(&self) -> u8 {
        self.sector_size_shift + self.sectors_per_cluster_shift
    }

    pub fn cluster_size(&self) -> u32 {
        1 << self.cluster_size_shift()
    }

    /// Byte offset of a data cluster, `None` below the first data cluster
    pub fn cluster_offset(&self, cluster_id: ClusterID) -> Option<u64> {
        if cluster_id < ClusterID::FIRST {
            return None;
        }
        let index = cluster_id.offset() as u64;
        Some(self.cluster_heap_offset.saturating_add(index << self.cluster_size_shift()))
    }

    /// Byte offset of the FAT entry for given cluster
    pub fn fat_entry_offset(&self, cluster_id: ClusterID) -> u64 {
        self.fat_offset + u32::from(cluster_id) as u64 * 4
    }
}
