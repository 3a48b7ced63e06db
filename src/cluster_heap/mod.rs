pub(crate) mod chain;
pub(crate) mod clusters;
pub(crate) mod directory;
pub(crate) mod entryset;
