use alloc::string::String;
use alloc::vec::Vec;
use core::char::{REPLACEMENT_CHARACTER, decode_utf16};
use core::slice::ChunksExact;

use super::entryset::EntrySet;
use crate::endian;
use crate::region::data::entry_type::{EntryType, RawEntryType};
use crate::region::data::entryset::primary::FileDirectory;
use crate::region::data::entryset::secondary::{Filename, Secondary, StreamExtension};
use crate::region::data::entryset::{ENTRY_SIZE, RawEntry};

/// Raw 32-byte entries of a directory, a trailing partial entry is dropped
pub(crate) struct EntryIter<'a>(ChunksExact<'a, u8>);

impl<'a> EntryIter<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self(bytes.chunks_exact(ENTRY_SIZE))
    }
}

impl<'a> Iterator for EntryIter<'a> {
    type Item = &'a RawEntry;

    fn next(&mut self) -> Option<&'a RawEntry> {
        self.0.next().and_then(|chunk| chunk.try_into().ok())
    }
}

fn decode_name(mut units: Vec<u16>) -> String {
    while units.last() == Some(&0) {
        units.pop();
    }
    decode_utf16(units).map(|ch| ch.unwrap_or(REPLACEMENT_CHARACTER)).collect()
}

/// Decode directory content into entry sets, in on-disk order
pub fn decode(bytes: &[u8]) -> Vec<EntrySet> {
    let mut iter = EntryIter::new(bytes);
    let mut entrysets = Vec::new();
    while let Some(entry) = iter.next() {
        let entry_type = RawEntryType::from(entry[0]);
        if entry_type.is_unused() {
            continue;
        }
        if !entry_type.is(EntryType::FileDirectory) {
            let in_use = entry_type.in_use();
            trace!("Skip entry type {:?}, in use {}", entry_type.entry_type(), in_use);
            continue;
        }
        let Some(file_directory) = endian::read::<FileDirectory>(entry) else { continue };
        let secondary_count = file_directory.secondary_count as usize;
        let mut stream_extension: Option<Secondary<StreamExtension>> = None;
        let mut units: Vec<u16> = Vec::with_capacity(secondary_count * 15);
        let mut consumed = 0;
        for entry in iter.by_ref().take(secondary_count) {
            consumed += 1;
            let entry_type = RawEntryType::from(entry[0]);
            if entry_type.is(EntryType::StreamExtension) {
                stream_extension = endian::read(entry);
            } else if entry_type.is(EntryType::Filename) {
                let filename: Option<Filename> = endian::read(entry);
                units.extend(filename.iter().flat_map(|filename| filename.units()));
            } else {
                trace!("Ignore secondary entry type {:?}", entry_type);
            }
        }
        if consumed < secondary_count {
            debug!("Entry set cut short, {} of {} secondary entries", consumed, secondary_count);
        }
        let name = decode_name(units);
        entrysets.push(EntrySet { name, file_directory, stream_extension });
    }
    entrysets
}
