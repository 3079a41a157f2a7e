//! Integration tests for datapath.
//!
//! One test binary, one module per area:
//! - paths: reading and writing nested data through string and built paths
//! - blog: a post listing built from records, grouped, sorted and serialized

#![allow(missing_docs)]

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("datapath=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod blog;
mod paths;
