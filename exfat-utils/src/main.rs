mod cat;
mod error;
mod extract;
mod list;
mod tree;

use std::path::PathBuf;

use clap::Parser;
use exfat::{ExFAT, filepath};

use error::Error;

#[derive(Debug, clap::Args)]
struct List {
    /// Specify path to list, default to root directory
    #[clap(default_value = "/")]
    path: String,
}

#[derive(Debug, clap::Args)]
struct Cat {
    /// Specify path to concatenate
    path: String,
    /// Print as hex dump
    #[clap(long)]
    hex: bool,
}

#[derive(Debug, clap::Args)]
struct Tree {
    /// Specify directory to walk, default to root directory
    #[clap(default_value = "/")]
    path: String,
}

#[derive(Debug, clap::Args)]
struct Extract {
    /// Host directory to write into
    destination: PathBuf,
    /// Specify directory to extract, default to root directory
    #[clap(short, long, default_value = "/")]
    path: String,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// List file and directory in specified path
    #[clap(name = "ls")]
    List(List),
    /// Concatenate file and print on the standard output
    Cat(Cat),
    /// Print directory tree
    Tree(Tree),
    /// Copy directory tree out of the image
    Extract(Extract),
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long)]
    quiet: bool,
    #[clap(short, action = clap::ArgAction::Count)]
    verbosity: u8,
    /// Image file formatted with exfat
    #[clap(short, long)]
    image: PathBuf,
    #[clap(subcommand)]
    action: Action,
}

pub(crate) fn expect_directory(exfat: &ExFAT<Vec<u8>>, path: &str) -> Result<(), Error> {
    if filepath::segments(path).next().is_none() {
        return Ok(());
    }
    match exfat.lookup(path)? {
        Some(entryset) if entryset.is_directory() => Ok(()),
        Some(_) => Err(Error::NotADirectory(path.into())),
        None => Err(Error::NoSuchFileOrDirectory(path.into())),
    }
}

fn run(args: Args) -> Result<(), Error> {
    let image = std::fs::read(&args.image)?;
    let exfat = ExFAT::new(image)?;
    if exfat.is_dirty() {
        log::warn!("Volume is marked dirty");
    }
    match args.action {
        Action::List(args) => list::list(&exfat, &args.path),
        Action::Cat(args) => cat::cat(&exfat, &args.path, args.hex),
        Action::Tree(args) => tree::tree(&exfat, &args.path),
        Action::Extract(args) => extract::extract(&exfat, &args.path, &args.destination),
    }
}

fn main() {
    let args = Args::parse();
    let level = match (args.quiet, args.verbosity) {
        (true, _) => log::LevelFilter::Off,
        (_, 0) => log::LevelFilter::Info,
        (_, 1) => log::LevelFilter::Debug,
        (_, _) => log::LevelFilter::Trace,
    };
    log::set_max_level(level);
    env_logger::builder().filter(None, level).target(env_logger::Target::Stderr).init();

    if let Err(error) = run(args) {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
