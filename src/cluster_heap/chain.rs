use alloc::vec;
use alloc::vec::Vec;

use super::clusters::ClusterHeap;
use crate::error::Error;
use crate::fat::FAT;
use crate::region::fat::Entry;
use crate::types::ClusterID;

/// How a stream advances from one cluster to the next
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// Follow the FAT
    #[default]
    FAT,
    /// Consecutive clusters, FAT not consulted
    Contiguous,
}

/// Where a stream lives in the cluster heap
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stream {
    pub first_cluster: ClusterID,
    pub layout: Layout,
    /// Known length in bytes, `None` reads until end of chain
    pub length: Option<u64>,
}

impl Stream {
    pub fn new(first_cluster: ClusterID, length: Option<u64>) -> Self {
        Self { first_cluster, layout: Layout::FAT, length }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChainStatus {
    /// End of chain or length limit reached
    Complete,
    /// Image ends before the chain does
    Truncated,
    /// First cluster could not be read at all
    OutOfRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    pub bytes: Vec<u8>,
    pub status: ChainStatus,
}

impl Chain {
    pub fn is_complete(&self) -> bool {
        self.status == ChainStatus::Complete
    }
}

/// One bit per cluster the image can hold
struct Visited(Vec<u64>);

impl Visited {
    fn new(capacity: u32) -> Self {
        Self(vec![0; (capacity as usize + 63) / 64])
    }

    /// Returns false if already marked
    fn mark(&mut self, cluster_id: ClusterID) -> bool {
        let index = cluster_id.offset() as usize;
        let (word, bit) = (index / 64, 1u64 << (index % 64));
        match self.0.get_mut(word) {
            Some(value) if *value & bit > 0 => false,
            Some(value) => {
                *value |= bit;
                true
            }
            None => true,
        }
    }
}

pub(crate) fn read(heap: &ClusterHeap, fat: &FAT, stream: &Stream) -> Result<Chain, Error> {
    let limit = stream.length;
    let mut bytes = Vec::new();
    if limit == Some(0) {
        return Ok(Chain { bytes, status: ChainStatus::Complete });
    }
    if let Some(limit) = limit {
        bytes.reserve(limit.min(heap.length()) as usize);
    }
    let mut visited = Visited::new(heap.capacity());
    let mut cluster_id = stream.first_cluster;
    let status = loop {
        if !cluster_id.valid() {
            if cluster_id == stream.first_cluster {
                debug!("Stream starts on invalid cluster {}", cluster_id);
                break ChainStatus::OutOfRange;
            }
            trace!("Chain leaves valid cluster range with {}", cluster_id);
            break ChainStatus::Complete;
        }
        let data = match heap.cluster(cluster_id) {
            Ok(data) => data,
            Err(_) if bytes.is_empty() => break ChainStatus::OutOfRange,
            Err(_) => {
                warn!("Cluster {} beyond image end, chain truncated", cluster_id);
                break ChainStatus::Truncated;
            }
        };
        if stream.layout == Layout::FAT && !visited.mark(cluster_id) {
            warn!("Cluster chain loops back to cluster {}", cluster_id);
            return Err(Error::CyclicChain(cluster_id));
        }
        let size = match limit {
            Some(limit) => data.len().min((limit - bytes.len() as u64) as usize),
            None => data.len(),
        };
        bytes.extend_from_slice(&data[..size]);
        if limit.map(|limit| bytes.len() as u64 >= limit).unwrap_or(false) {
            break ChainStatus::Complete;
        }
        cluster_id = match stream.layout {
            Layout::Contiguous => cluster_id + 1u32,
            Layout::FAT => match fat.lookup(cluster_id).map(Entry::from) {
                Some(Entry::Next(next)) => next,
                Some(_) => break ChainStatus::Complete,
                None => {
                    warn!("FAT entry of cluster {} beyond image end", cluster_id);
                    break ChainStatus::Truncated;
                }
            },
        };
    };
    trace!("Read {} bytes from cluster {}, {:?}", bytes.len(), stream.first_cluster, status);
    Ok(Chain { bytes, status })
}
