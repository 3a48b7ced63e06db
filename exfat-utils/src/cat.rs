use std::io;
use std::io::Write;

use exfat::ExFAT;

use crate::error::Error;

pub fn cat(exfat: &ExFAT<Vec<u8>>, path: &str, hex: bool) -> Result<(), Error> {
    let entryset = match exfat.lookup(path)? {
        Some(entryset) if entryset.is_directory() => return Err(Error::IsADirectory(path.into())),
        Some(entryset) => entryset,
        None if exfat.exists(path) => return Err(Error::IsADirectory(path.into())),
        None => return Err(Error::NoSuchFileOrDirectory(path.into())),
    };
    let chain = exfat.read_entry(&entryset)?;
    if !chain.is_complete() {
        let (length, expected) = (chain.bytes.len(), entryset.data_length());
        log::warn!("{} read short ({:?}), {} of {} bytes", path, chain.status, length, expected);
    }
    let mut stdout = io::stdout().lock();
    match hex {
        true => writeln!(stdout, "{}", pretty_hex::pretty_hex(&chain.bytes))?,
        false => stdout.write_all(&chain.bytes)?,
    }
    Ok(())
}
