use alloc::string::String;

use super::chain::{Layout, Stream};
use crate::region::data::entryset::primary::{FileAttributes, FileDirectory};
use crate::region::data::entryset::secondary::{Secondary, StreamExtension};
use crate::types::ClusterID;

/// A file or directory record, a File entry together with its secondary entries
#[derive(Clone, Debug)]
pub struct EntrySet {
    pub(crate) name: String,
    pub file_directory: FileDirectory,
    /// Missing when the entry set is cut short
    pub stream_extension: Option<Secondary<StreamExtension>>,
}

impl EntrySet {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_attributes(&self) -> FileAttributes {
        self.file_directory.file_attributes()
    }

    pub fn is_directory(&self) -> bool {
        self.file_attributes().directory() > 0
    }

    pub fn first_cluster(&self) -> ClusterID {
        self.stream_extension.map(|ext| ext.first_cluster()).unwrap_or_default().into()
    }

    /// Allocated length, the size of file content
    pub fn data_length(&self) -> u64 {
        self.stream_extension.map(|ext| ext.data_length()).unwrap_or_default()
    }

    pub fn valid_data_length(&self) -> u64 {
        let option = self.stream_extension.map(|ext| ext.custom_defined.valid_data_length);
        option.map(|length| length.to_ne()).unwrap_or_default()
    }

    pub fn layout(&self) -> Layout {
        match self.stream_extension {
            Some(ext) if ext.general_secondary_flags().contiguous() => Layout::Contiguous,
            _ => Layout::FAT,
        }
    }

    /// Content stream, directories on a FAT chain are read until end of chain
    pub(crate) fn stream(&self) -> Stream {
        let layout = self.layout();
        let length = match (self.is_directory(), layout) {
            (true, Layout::FAT) => None,
            _ => Some(self.data_length()),
        };
        Stream { first_cluster: self.first_cluster(), layout, length }
    }
}
