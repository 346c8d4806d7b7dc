//! Portfolio views derived from the entry list.

pub mod allocation;
pub mod summary;
