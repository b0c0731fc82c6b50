//! Topology documents: wire model, sanitization and loading.

mod error;
mod loader;
mod model;
mod sanitize;

pub use error::TopologyError;
pub use loader::{HttpSource, TopologySource, load, load_and_publish, parse};
pub use model::{Link, Node, NodeId, Topology};
pub use sanitize::sanitize;
