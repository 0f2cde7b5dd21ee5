pub(crate) mod adapter;
pub(crate) mod color;
pub(crate) mod festival;
pub(crate) mod relationship;
