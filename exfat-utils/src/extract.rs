use std::fs;
use std::path::Path;

use exfat::{ExFAT, filepath};

use crate::error::Error;

pub fn extract(exfat: &ExFAT<Vec<u8>>, path: &str, destination: &Path) -> Result<(), Error> {
    crate::expect_directory(exfat, path)?;
    fs::create_dir_all(destination)?;
    let base = filepath::segments(path).count();
    for entry in exfat.walk(path) {
        let segments: Vec<&str> = filepath::segments(entry.path()).skip(base).collect();
        if segments.iter().any(|&segment| segment == "." || segment == "..") {
            log::warn!("Skip {}, escapes destination", entry.path());
            continue;
        }
        let target = destination.join(segments.join("/"));
        if entry.is_directory() {
            fs::create_dir_all(&target)?;
            continue;
        }
        match entry.read() {
            Some(bytes) => fs::write(&target, bytes)?,
            None => {
                log::warn!("Skip {}, unreadable", entry.path());
                continue;
            }
        }
        log::info!("{} -> {}", entry.path(), target.display());
    }
    Ok(())
}
