use exfat::{EntrySet, ExFAT, filepath};

use crate::error::Error;

fn print(entryset: &EntrySet) {
    let attrs = entryset.file_attributes();
    print!("{}", if attrs.directory() > 0 { "d" } else { "-" });
    print!("{}", if attrs.read_only() > 0 { "r" } else { "-" });
    print!("{}", if attrs.system() > 0 { "s" } else { "-" });
    print!("{}", if attrs.hidden() > 0 { "h" } else { "-" });
    print!("{}", if attrs.archive() > 0 { "a" } else { "-" });
    print!(" {:12}", entryset.data_length());
    let modified_at = entryset.file_directory.last_modified_timestamp();
    match modified_at.with_offset() {
        Some(datetime) => {
            let localtime = datetime.with_timezone(&chrono::Local);
            print!(" {}", localtime.format("%Y-%m-%d %H:%M:%S"));
        }
        None => print!(" {:19}", "-"),
    }
    match entryset.is_directory() {
        true => println!(" {}/", entryset.name()),
        false => println!(" {}", entryset.name()),
    }
}

pub fn list(exfat: &ExFAT<Vec<u8>>, path: &str) -> Result<(), Error> {
    let entries = match exfat.lookup(path)? {
        Some(entryset) if !entryset.is_directory() => vec![entryset],
        Some(entryset) => exfat.read_directory(&entryset)?,
        None if filepath::segments(path).next().is_none() => exfat.root_directory()?,
        None => return Err(Error::NoSuchFileOrDirectory(path.into())),
    };
    entries.iter().for_each(print);
    Ok(())
}
