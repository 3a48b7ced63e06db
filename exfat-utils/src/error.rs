use derive_more::Display;
use thiserror::Error;

#[derive(Debug, Display, Error)]
pub enum Error {
    #[display("{_0}")]
    ExFAT(#[from] exfat::error::Error),
    #[display("IO: {_0}")]
    IO(#[from] std::io::Error),
    #[display("{_0}: No such file or directory")]
    NoSuchFileOrDirectory(String),
    #[display("{_0}: Not a directory")]
    NotADirectory(String),
    #[display("{_0}: Is a directory")]
    IsADirectory(String),
}
