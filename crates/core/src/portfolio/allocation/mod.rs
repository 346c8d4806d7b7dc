//! Portfolio allocation module: breakdowns by asset type and by platform.

mod allocation_model;
mod allocation_service;

pub use allocation_model::*;
pub use allocation_service::*;
