use crate::error::Error;
use crate::fs::Geometry;
use crate::types::ClusterID;

/// Cluster heap view over the image
#[derive(Copy, Clone)]
pub(crate) struct ClusterHeap<'a> {
    image: &'a [u8],
    geometry: &'a Geometry,
}

impl<'a> ClusterHeap<'a> {
    pub fn new(image: &'a [u8], geometry: &'a Geometry) -> Self {
        Self { image, geometry }
    }

    /// Number of whole clusters the image actually holds
    pub fn capacity(&self) -> u32 {
        let length = self.image.len() as u64;
        let heap_length = length.saturating_sub(self.geometry.cluster_heap_offset);
        (heap_length >> self.geometry.cluster_size_shift()).min(u32::MAX as u64) as u32
    }

    /// Bytes covered by whole clusters
    pub fn length(&self) -> u64 {
        (self.capacity() as u64) << self.geometry.cluster_size_shift()
    }

    /// Bytes of one whole cluster, never reads past image end
    pub fn cluster(&self, cluster_id: ClusterID) -> Result<&'a [u8], Error> {
        let out_of_range = Error::OutOfRange(cluster_id);
        if !cluster_id.valid() {
            return Err(out_of_range);
        }
        let offset = self.geometry.cluster_offset(cluster_id).ok_or(out_of_range)?;
        let start = usize::try_from(offset).map_err(|_| out_of_range)?;
        let end = start.checked_add(self.geometry.cluster_size() as usize).ok_or(out_of_range)?;
        self.image.get(start..end).ok_or(out_of_range)
    }
}
