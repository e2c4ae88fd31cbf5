//! Wire contracts shared by the farmacia frontend and backend.

pub mod domain;
pub mod shared;
