// Main boot sector

use core::mem::size_of;

use bitfield::bitfield;

use crate::endian::{self, Little as LE, Plain};
use crate::error::Error;

bitfield! {
    #[derive(Copy, Clone, Debug, Default)]
    pub struct VolumeFlags(u16);
    pub media_failure, _: 2, 2;
    pub volume_dirty, _: 1, 1;
    pub active_fat, _: 0, 0;
}

#[derive(Copy, Clone, Debug)]
#[repr(C)]
pub(crate) struct BootSector {
    pub jump_boot: [u8; 3],
    pub filesystem_name: [u8; 8],
    _must_be_zero: [u8; 53],
    pub partition_offset: LE<u64>,
    pub volume_length: LE<u64>,
    pub fat_offset: LE<u32>,          // unit sector
    pub fat_length: LE<u32>,          // unit sector
    pub cluster_heap_offset: LE<u32>, // unit sector
    pub cluster_count: LE<u32>,
    pub first_cluster_of_root_directory: LE<u32>,
    pub volume_serial_number: LE<u32>,
    pub filesystem_revision: LE<u16>,
    pub volume_flags: LE<u16>,
    pub bytes_per_sector_shift: u8, // [9..=12] on conforming volumes
    pub sectors_per_cluster_shift: u8,
    pub number_of_fats: u8,
    pub drive_select: u8,
    pub percent_inuse: u8,
    _reserved: [u8; 7],
    pub bootcode: [u8; 390],
    pub boot_signature: [u8; 2],
}

unsafe impl Plain for BootSector {}

pub(crate) const BOOT_SECTOR_SIZE: usize = size_of::<BootSector>();

impl BootSector {
    pub fn parse(image: &[u8]) -> Result<Self, Error> {
        let length = image.len();
        let reason = "shorter than boot sector";
        endian::read(image).ok_or(Error::MalformedBootSector { length, reason })
    }

    pub fn is_exfat(&self) -> bool {
        self.jump_boot == hex!("EB 76 90") && &self.filesystem_name == b"EXFAT   "
    }

    pub fn volume_flags(&self) -> VolumeFlags {
        VolumeFlags(self.volume_flags.to_ne())
    }
}
