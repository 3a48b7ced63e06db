pub(crate) mod generic;
pub(crate) mod primary;
pub(crate) mod secondary;

pub(crate) const ENTRY_SIZE: usize = 32;
pub(crate) type RawEntry = [u8; ENTRY_SIZE];

#[cfg(test)]
mod test {
    use core::mem::size_of;

    use super::ENTRY_SIZE;
    use super::primary::FileDirectory;
    use super::secondary::{Filename, Secondary, StreamExtension};

    type Stream = Secondary<StreamExtension>;

    #[test]
    fn test_entry_size() {
        use memoffset::offset_of;

        assert_eq!(size_of::<FileDirectory>(), ENTRY_SIZE);
        assert_eq!(size_of::<Stream>(), ENTRY_SIZE);
        assert_eq!(size_of::<Filename>(), ENTRY_SIZE);
        assert_eq!(offset_of!(FileDirectory, secondary_count), 1);
        assert_eq!(offset_of!(FileDirectory, file_attributes), 4);
        assert_eq!(offset_of!(Stream, first_cluster), 0x14);
        assert_eq!(offset_of!(Stream, data_length), 0x18);
        assert_eq!(offset_of!(Filename, filename), 2);
    }
}
