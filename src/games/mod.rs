//! Game implementations.

pub(crate) mod wordchain;
