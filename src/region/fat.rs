use crate::types::ClusterID;

/// Returned in place of a FAT entry lying past the end of image
pub const SENTINEL: u32 = 0xFFFFFFFF;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Entry {
    Next(ClusterID),
    /// Media descriptor range and end-of-chain
    Last,
    /// Unlinked, terminates chain as well
    Free,
}

impl From<u32> for Entry {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::Free,
            0xFFFFFFF8..=0xFFFFFFFF => Self::Last,
            _ => Self::Next(value.into()),
        }
    }
}

/// Whether a raw FAT entry value terminates a cluster chain
pub fn is_end_of_chain(value: u32) -> bool {
    !matches!(Entry::from(value), Entry::Next(_))
}

#[cfg(test)]
mod test {
    use super::{Entry, SENTINEL, is_end_of_chain};

    #[test]
    fn test_end_of_chain() {
        assert!(is_end_of_chain(0));
        assert!(is_end_of_chain(SENTINEL));
        assert!(is_end_of_chain(0xFFFFFFF8));
        assert!(is_end_of_chain(0xFFFFFFFC));
        assert!(!is_end_of_chain(0xFFFFFFF7));
        assert!(!is_end_of_chain(1));
        assert!(!is_end_of_chain(3));
        assert_eq!(Entry::from(7), Entry::Next(7.into()));
    }
}
