use bitfield::bitfield;

bitfield! {
    /// General secondary flags
    #[derive(Copy, Clone, Debug, Default, PartialEq)]
    pub struct Flags(u8);
    pub allocation_possible, _: 0, 0;
    pub no_fat_chain, _: 1, 1;
}

impl Flags {
    /// Stream lies on consecutive clusters and its FAT entries are not maintained
    pub fn contiguous(&self) -> bool {
        self.no_fat_chain() > 0
    }
}
