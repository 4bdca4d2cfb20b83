pub(crate) mod chains;
pub(crate) mod flags;
pub(crate) mod machine;
