use displaydoc::Display;
use thiserror::Error;

use crate::types::ClusterID;

#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Malformed boot sector: {reason} (image length {length})
    MalformedBootSector { length: usize, reason: &'static str },
    /// Cluster {0} out of image range
    OutOfRange(ClusterID),
    /// Cluster chain revisits cluster {0}
    CyclicChain(ClusterID),
}
