pub(crate) mod entry_type;
pub(crate) mod entryset;
