#![allow(dead_code)]

use hex_literal::hex;

pub const SECTOR_SHIFT: u8 = 9;
pub const END: u32 = 0xFFFFFFFF;

/// Lays out boot sector, FAT and cluster heap of a single-FAT exFAT image
pub struct ImageBuilder {
    cluster_shift: u8,
    fat: Vec<u32>,
    heap: Vec<Vec<u8>>,
}

impl ImageBuilder {
    pub fn new(sectors_per_cluster_shift: u8) -> Self {
        let fat = vec![0xFFFFFFF8, END];
        Self { cluster_shift: SECTOR_SHIFT + sectors_per_cluster_shift, fat, heap: Vec::new() }
    }

    pub fn cluster_size(&self) -> usize {
        1 << self.cluster_shift
    }

    fn allocate(&mut self, fill: u8) -> u32 {
        self.heap.push(vec![fill; self.cluster_size()]);
        self.fat.push(0);
        self.fat.len() as u32 - 1
    }

    fn fill(&mut self, cluster: u32, chunk: &[u8]) {
        self.heap[cluster as usize - 2][..chunk.len()].copy_from_slice(chunk);
    }

    pub fn link(&mut self, cluster: u32, next: u32) {
        self.fat[cluster as usize] = next;
    }

    fn chain(&mut self, data: &[u8], gap: bool) -> u32 {
        let size = self.cluster_size();
        let mut first = 0;
        let mut last = 0;
        for (i, chunk) in data.chunks(size).enumerate() {
            if gap && i > 0 {
                self.allocate(0xEE);
            }
            let cluster = self.allocate(0);
            self.fill(cluster, chunk);
            match last {
                0 => first = cluster,
                _ => self.link(last, cluster),
            }
            last = cluster;
        }
        if last != 0 {
            self.link(last, END);
        }
        first
    }

    /// Consecutive clusters linked through the FAT, 0 for empty data
    pub fn put(&mut self, data: &[u8]) -> u32 {
        self.chain(data, false)
    }

    /// Chain with an unused cluster between every two data clusters
    pub fn put_fragmented(&mut self, data: &[u8]) -> u32 {
        self.chain(data, true)
    }

    /// Consecutive clusters without FAT entries, as a NoFatChain stream
    pub fn put_contiguous(&mut self, data: &[u8]) -> u32 {
        let mut first = 0;
        for chunk in data.chunks(self.cluster_size()) {
            let cluster = self.allocate(0);
            self.fill(cluster, chunk);
            if first == 0 {
                first = cluster;
            }
        }
        first
    }

    /// Directory content, padded to at least one cluster
    pub fn directory(&mut self, entries: &[Entry]) -> u32 {
        let mut bytes: Vec<u8> = entries.iter().flat_map(|entry| entry.bytes()).collect();
        if bytes.is_empty() {
            bytes.resize(self.cluster_size(), 0);
        }
        self.put(&bytes)
    }

    pub fn build(&self, root: u32) -> Vec<u8> {
        let sector_size = 1usize << SECTOR_SHIFT;
        let fat_sectors = (self.fat.len() * 4).div_ceil(sector_size).max(1);
        let heap_sector = 1 + fat_sectors;
        let mut image = vec![0u8; heap_sector * sector_size + self.heap.len() * self.cluster_size()];

        image[..11].copy_from_slice(&hex!("EB 76 90 45 58 46 41 54 20 20 20"));
        image[0x50..0x54].copy_from_slice(&1u32.to_le_bytes());
        image[0x54..0x58].copy_from_slice(&(fat_sectors as u32).to_le_bytes());
        image[0x58..0x5C].copy_from_slice(&(heap_sector as u32).to_le_bytes());
        image[0x5C..0x60].copy_from_slice(&(self.heap.len() as u32).to_le_bytes());
        image[0x60..0x64].copy_from_slice(&root.to_le_bytes());
        image[0x64..0x68].copy_from_slice(&0x1234ABCDu32.to_le_bytes());
        image[0x6C] = SECTOR_SHIFT;
        image[0x6D] = self.cluster_shift - SECTOR_SHIFT;
        image[0x6E] = 1;
        image[0x70] = 42;
        image[0x1FE..0x200].copy_from_slice(&hex!("55 AA"));

        for (i, &next) in self.fat.iter().enumerate() {
            let offset = sector_size + i * 4;
            image[offset..offset + 4].copy_from_slice(&next.to_le_bytes());
        }
        for (i, cluster) in self.heap.iter().enumerate() {
            let offset = heap_sector * sector_size + i * self.cluster_size();
            image[offset..offset + cluster.len()].copy_from_slice(cluster);
        }
        image
    }
}

/// A File entry set: primary, stream extension and file name entries
pub struct Entry {
    pub name: String,
    pub directory: bool,
    pub first_cluster: u32,
    pub size: u64,
    pub contiguous: bool,
}

impl Entry {
    pub fn bytes(&self) -> Vec<u8> {
        let units: Vec<u16> = self.name.encode_utf16().collect();
        let names: Vec<&[u16]> = units.chunks(15).collect();

        let mut primary = [0u8; 32];
        primary[0] = 0x85;
        primary[1] = 1 + names.len() as u8;
        primary[4] = if self.directory { 0x10 } else { 0x20 };

        let mut stream = [0u8; 32];
        stream[0] = 0xC0;
        stream[1] = if self.contiguous { 0x03 } else { 0x01 };
        stream[3] = units.len() as u8;
        stream[8..16].copy_from_slice(&self.size.to_le_bytes());
        stream[0x14..0x18].copy_from_slice(&self.first_cluster.to_le_bytes());
        stream[0x18..0x20].copy_from_slice(&self.size.to_le_bytes());

        let mut bytes = Vec::with_capacity((2 + names.len()) * 32);
        bytes.extend_from_slice(&primary);
        bytes.extend_from_slice(&stream);
        for chunk in names {
            let mut entry = [0u8; 32];
            entry[0] = 0xC1;
            for (i, unit) in chunk.iter().enumerate() {
                entry[2 + i * 2..4 + i * 2].copy_from_slice(&unit.to_le_bytes());
            }
            bytes.extend_from_slice(&entry);
        }
        bytes
    }
}

pub fn file(name: &str, first_cluster: u32, size: usize) -> Entry {
    let name = name.to_string();
    Entry { name, directory: false, first_cluster, size: size as u64, contiguous: false }
}

pub fn directory(name: &str, first_cluster: u32) -> Entry {
    Entry { name: name.to_string(), directory: true, first_cluster, size: 0, contiguous: false }
}

pub fn pattern(length: usize, seed: u8) -> Vec<u8> {
    (0..length).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect()
}

/// Root holding `hello.txt` (4 bytes) and `Documents/a.bin` (a cluster plus 10 bytes)
pub struct Sample {
    pub image: Vec<u8>,
    pub cluster_size: usize,
    pub hello: Vec<u8>,
    pub a_bin: Vec<u8>,
}

pub fn sample() -> Sample {
    let mut builder = ImageBuilder::new(0);
    let cluster_size = builder.cluster_size();
    let hello = b"hey!".to_vec();
    let a_bin = pattern(cluster_size + 10, 7);
    let hello_cluster = builder.put(&hello);
    let a_bin_cluster = builder.put_fragmented(&a_bin);
    let documents = builder.directory(&[file("a.bin", a_bin_cluster, a_bin.len())]);
    let root = builder.directory(&[
        file("hello.txt", hello_cluster, hello.len()),
        directory("Documents", documents),
    ]);
    Sample { image: builder.build(root), cluster_size, hello, a_bin }
}
