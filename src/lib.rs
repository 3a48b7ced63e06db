#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

#[macro_use]
extern crate hex_literal;
#[macro_use]
extern crate log;

mod cluster_heap;
mod endian;
pub mod error;
mod fat;
pub mod filepath;
mod fs;
mod region;
pub mod types;
mod walk;

use alloc::vec::Vec;

pub use cluster_heap::chain::{Chain, ChainStatus, Layout, Stream};
pub use cluster_heap::directory::decode as decode_directory;
pub use cluster_heap::entryset::EntrySet;
use cluster_heap::{chain, clusters::ClusterHeap, directory};
use error::Error;
use fat::FAT;
pub use fs::Geometry;
use region::boot::BootSector;
pub use region::boot::VolumeFlags;
pub use region::data::entryset::generic::Flags;
pub use region::data::entryset::primary::{
    DateTime, FileAttributes, FileDirectory, Timestamp, UTCOffset,
};
pub use region::data::entryset::secondary::{Secondary, StreamExtension};
pub use region::fat::{SENTINEL, is_end_of_chain};
use types::ClusterID;
pub use walk::{Walk, WalkEntry};

/// Resolved path, the root directory has no entry set of its own
enum Node {
    Root,
    Entry(EntrySet),
}

/// Read-only exFAT volume over an in-memory image
pub struct ExFAT<B> {
    image: B,
    boot_sector: BootSector,
    geometry: Geometry,
}

impl<B: AsRef<[u8]>> ExFAT<B> {
    pub fn new(image: B) -> Result<Self, Error> {
        let bytes = image.as_ref();
        let boot_sector = BootSector::parse(bytes)?;
        if !boot_sector.is_exfat() {
            warn!("No exFAT signature in boot sector, decoding anyway");
        }
        let geometry = Geometry::from_boot_sector(&boot_sector, bytes.len())?;
        debug!("FAT offset {} length {}", geometry.fat_offset, geometry.fat_length);
        let cluster_size = geometry.cluster_size();
        debug!("Cluster heap offset {} cluster size {}", geometry.cluster_heap_offset, cluster_size);
        debug!("Root directory on cluster {}", geometry.root);
        if geometry.cluster_heap_offset > bytes.len() as u64 {
            warn!("Cluster heap starts beyond image end {}", bytes.len());
        }
        Ok(Self { image, boot_sector, geometry })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn image(&self) -> &[u8] {
        self.image.as_ref()
    }

    pub fn into_inner(self) -> B {
        self.image
    }

    pub fn serial_number(&self) -> u32 {
        self.boot_sector.volume_serial_number.to_ne()
    }

    pub fn volume_flags(&self) -> VolumeFlags {
        self.boot_sector.volume_flags()
    }

    pub fn is_dirty(&self) -> bool {
        self.volume_flags().volume_dirty() > 0
    }

    pub fn percent_inuse(&self) -> u8 {
        self.boot_sector.percent_inuse
    }

    /// Jump boot and filesystem name match exFAT, informational only
    pub fn has_exfat_signature(&self) -> bool {
        self.boot_sector.is_exfat()
    }

    fn fat(&self) -> FAT<'_> {
        FAT::new(self.image.as_ref(), &self.geometry)
    }

    fn heap(&self) -> ClusterHeap<'_> {
        ClusterHeap::new(self.image.as_ref(), &self.geometry)
    }

    /// Raw FAT entry following `cluster_id`, see [`is_end_of_chain`]
    pub fn next_cluster(&self, cluster_id: ClusterID) -> u32 {
        self.fat().next_cluster(cluster_id)
    }

    /// Bytes of a single cluster
    pub fn cluster(&self, cluster_id: ClusterID) -> Result<&[u8], Error> {
        self.heap().cluster(cluster_id)
    }

    /// Read a FAT chain from `first`, stop after `limit` bytes if given
    pub fn read_chain(&self, first: ClusterID, limit: Option<u64>) -> Result<Chain, Error> {
        self.read_stream(&Stream::new(first, limit))
    }

    pub fn read_stream(&self, stream: &Stream) -> Result<Chain, Error> {
        chain::read(&self.heap(), &self.fat(), stream)
    }

    pub(crate) fn entries(&self, stream: &Stream) -> Result<Vec<EntrySet>, Error> {
        let chain = self.read_stream(stream)?;
        if chain.status == ChainStatus::Truncated {
            warn!("Directory on cluster {} truncated", stream.first_cluster);
        }
        Ok(directory::decode(&chain.bytes))
    }

    pub fn root_directory(&self) -> Result<Vec<EntrySet>, Error> {
        self.entries(&Stream::new(self.geometry.root, None))
    }

    /// Entries of a directory, empty if `entryset` is a file
    pub fn read_directory(&self, entryset: &EntrySet) -> Result<Vec<EntrySet>, Error> {
        if !entryset.is_directory() {
            return Ok(Vec::new());
        }
        self.entries(&entryset.stream())
    }

    /// File content bounded by its data length
    pub fn read_entry(&self, entryset: &EntrySet) -> Result<Chain, Error> {
        self.read_stream(&entryset.stream())
    }

    fn resolve(&self, path: &str) -> Result<Option<Node>, Error> {
        let mut node = Node::Root;
        for name in filepath::segments(path) {
            let entries = match &node {
                Node::Root => self.root_directory()?,
                Node::Entry(entryset) if entryset.is_directory() => {
                    self.entries(&entryset.stream())?
                }
                Node::Entry(_) => return Ok(None),
            };
            match entries.into_iter().find(|entryset| entryset.name() == name) {
                Some(entryset) => node = Node::Entry(entryset),
                None => return Ok(None),
            }
        }
        trace!("Resolved {}", path);
        Ok(Some(node))
    }

    fn resolve_directory(&self, path: &str) -> Result<Option<Stream>, Error> {
        Ok(match self.resolve(path)? {
            Some(Node::Root) => Some(Stream::new(self.geometry.root, None)),
            Some(Node::Entry(entryset)) if entryset.is_directory() => Some(entryset.stream()),
            _ => None,
        })
    }

    /// Entry set a path names, `None` for the root directory and missing paths
    pub fn lookup(&self, path: &str) -> Result<Option<EntrySet>, Error> {
        Ok(match self.resolve(path)? {
            Some(Node::Entry(entryset)) => Some(entryset),
            _ => None,
        })
    }

    /// Directory listing, empty when `path` does not name a directory
    pub fn list(&self, path: &str) -> Vec<EntrySet> {
        let result = self.resolve_directory(path).and_then(|stream| match stream {
            Some(stream) => self.entries(&stream),
            None => Ok(Vec::new()),
        });
        result.unwrap_or_else(|e| {
            warn!("List {}: {}", path, e);
            Vec::new()
        })
    }

    pub fn exists(&self, path: &str) -> bool {
        match self.resolve(path) {
            Ok(node) => node.is_some(),
            Err(e) => {
                warn!("Lookup {}: {}", path, e);
                false
            }
        }
    }

    /// File content, `None` unless `path` names a file
    pub fn read_file(&self, path: &str) -> Option<Vec<u8>> {
        let result = self.lookup(path).and_then(|option| match option {
            Some(entryset) if !entryset.is_directory() => self.read_entry(&entryset).map(Some),
            _ => Ok(None),
        });
        match result {
            Ok(Some(chain)) => {
                if !chain.is_complete() {
                    warn!("{} read short, {:?}", path, chain.status);
                }
                Some(chain.bytes)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Read {}: {}", path, e);
                None
            }
        }
    }

    /// Pre-order traversal below `path`, file content is read on demand
    pub fn walk(&self, path: &str) -> Walk<'_, B> {
        let stream = self.resolve_directory(path).unwrap_or_else(|e| {
            warn!("Walk {}: {}", path, e);
            None
        });
        Walk::new(self, filepath::normalize(path), stream)
    }
}
