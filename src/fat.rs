use crate::fs::Geometry;
use crate::region::fat::SENTINEL;
use crate::types::ClusterID;

/// File allocation table view over the image
#[derive(Copy, Clone)]
pub(crate) struct FAT<'a> {
    image: &'a [u8],
    geometry: &'a Geometry,
}

impl<'a> FAT<'a> {
    pub fn new(image: &'a [u8], geometry: &'a Geometry) -> Self {
        Self { image, geometry }
    }

    /// Raw FAT entry of `cluster_id`, `None` when the entry lies past image end
    pub fn lookup(&self, cluster_id: ClusterID) -> Option<u32> {
        let offset = self.geometry.fat_entry_offset(cluster_id);
        let start = usize::try_from(offset).ok()?;
        let bytes = self.image.get(start..start.checked_add(4)?)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Raw FAT entry of `cluster_id`, a truncated FAT reads as `SENTINEL`
    pub fn next_cluster(&self, cluster_id: ClusterID) -> u32 {
        self.lookup(cluster_id).unwrap_or_else(|| {
            trace!("FAT entry of cluster {} beyond image end", cluster_id);
            SENTINEL
        })
    }
}

#[cfg(test)]
mod test {
    use super::FAT;
    use crate::fs::Geometry;
    use crate::region::fat::{Entry, SENTINEL};

    fn geometry() -> Geometry {
        Geometry {
            sector_size_shift: 9,
            sectors_per_cluster_shift: 0,
            fat_offset: 16,
            fat_length: 512,
            cluster_heap_offset: 512,
            cluster_count: 4,
            root: 2.into(),
        }
    }

    #[test]
    fn test_next_cluster() {
        let geometry = geometry();
        let mut image = [0u8; 36];
        image[16 + 8..16 + 12].copy_from_slice(&3u32.to_le_bytes());
        image[16 + 12..16 + 16].copy_from_slice(&0xFFFFFFF8u32.to_le_bytes());
        let fat = FAT::new(&image, &geometry);
        let entry = |id: u32| Entry::from(fat.next_cluster(id.into()));
        assert_eq!(fat.next_cluster(2.into()), 3);
        assert_eq!(entry(2), Entry::Next(3.into()));
        assert_eq!(entry(3), Entry::Last);
        assert_eq!(entry(4), Entry::Free);
        // Entry of cluster 5 spans bytes 36..40, past the end
        assert_eq!(fat.lookup(5.into()), None);
        assert_eq!(fat.next_cluster(5.into()), SENTINEL);
        assert_eq!(entry(5), Entry::Last);
    }
}
