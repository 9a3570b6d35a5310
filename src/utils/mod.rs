//! Project-specific utilities live here.

pub mod dates;
pub mod id_list;
