//! Browser entry point for the network map.

// Dependencies are linked through the library crate; the binary only mounts it.
#![allow(unused_crate_dependencies)]

use leptos::mount::mount_to_body;
use network_map::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App)
}
