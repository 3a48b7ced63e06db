use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::{self, Vec};

use crate::cluster_heap::chain::Stream;
use crate::cluster_heap::entryset::EntrySet;
use crate::filepath;
use crate::types::ClusterID;
use crate::ExFAT;

enum Frame {
    /// Directory not read yet
    Pending { path: String, stream: Stream },
    Listed { path: String, entries: vec::IntoIter<EntrySet> },
}

/// Depth-first pre-order traversal, driven by an explicit stack
pub struct Walk<'a, B> {
    exfat: &'a ExFAT<B>,
    stack: Vec<Frame>,
    entered: BTreeSet<ClusterID>,
}

impl<'a, B: AsRef<[u8]>> Walk<'a, B> {
    pub(crate) fn new(exfat: &'a ExFAT<B>, path: String, stream: Option<Stream>) -> Self {
        let mut walk = Self { exfat, stack: Vec::new(), entered: BTreeSet::new() };
        if let Some(stream) = stream {
            walk.enter(path, stream);
        }
        walk
    }

    fn enter(&mut self, path: String, stream: Stream) {
        let cluster_id = stream.first_cluster;
        if cluster_id.valid() && !self.entered.insert(cluster_id) {
            warn!("{} loops back to cluster {}, not descending", path, cluster_id);
            return;
        }
        self.stack.push(Frame::Pending { path, stream });
    }
}

impl<'a, B: AsRef<[u8]>> Iterator for Walk<'a, B> {
    type Item = WalkEntry<'a, B>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let (path, entries) = match frame {
                Frame::Pending { path, stream } => {
                    let entries = self.exfat.entries(stream).unwrap_or_else(|e| {
                        warn!("Walk {}: {}", path, e);
                        Vec::new()
                    });
                    let path = core::mem::take(path);
                    *frame = Frame::Listed { path, entries: entries.into_iter() };
                    continue;
                }
                Frame::Listed { path, entries } => (path, entries),
            };
            let Some(entryset) = entries.next() else {
                self.stack.pop();
                continue;
            };
            let path = filepath::join(path, entryset.name());
            if entryset.is_directory() {
                self.enter(path.clone(), entryset.stream());
            }
            return Some(WalkEntry { exfat: self.exfat, path, entryset });
        }
    }
}

/// Item of [`Walk`], content of files is read only when asked for
pub struct WalkEntry<'a, B> {
    exfat: &'a ExFAT<B>,
    path: String,
    entryset: EntrySet,
}

impl<'a, B: AsRef<[u8]>> WalkEntry<'a, B> {
    /// Absolute path, always `/` prefixed
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        self.entryset.name()
    }

    pub fn is_directory(&self) -> bool {
        self.entryset.is_directory()
    }

    pub fn size(&self) -> u64 {
        self.entryset.data_length()
    }

    pub fn entryset(&self) -> &EntrySet {
        &self.entryset
    }

    /// File content, `None` for directories or unreadable chains
    pub fn read(&self) -> Option<Vec<u8>> {
        if self.is_directory() {
            return None;
        }
        match self.exfat.read_entry(&self.entryset) {
            Ok(chain) => {
                if !chain.is_complete() {
                    warn!("{} read short, {:?}", self.path, chain.status);
                }
                Some(chain.bytes)
            }
            Err(e) => {
                warn!("Read {}: {}", self.path, e);
                None
            }
        }
    }
}
