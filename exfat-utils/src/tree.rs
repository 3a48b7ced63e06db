use exfat::{ExFAT, filepath};

use crate::error::Error;

pub fn tree(exfat: &ExFAT<Vec<u8>>, path: &str) -> Result<(), Error> {
    crate::expect_directory(exfat, path)?;
    let base = filepath::segments(path).count();
    println!("{}", filepath::normalize(path));
    let (mut directories, mut files) = (0, 0);
    for entry in exfat.walk(path) {
        let depth = filepath::segments(entry.path()).count() - base;
        let indent = "    ".repeat(depth);
        if entry.is_directory() {
            directories += 1;
            println!("{}{}/", indent, entry.name());
        } else {
            files += 1;
            println!("{}{} ({})", indent, entry.name(), entry.size());
        }
    }
    println!("\n{} directories, {} files", directories, files);
    Ok(())
}
