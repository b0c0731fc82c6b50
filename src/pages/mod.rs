pub mod network_map;
pub mod not_found;
