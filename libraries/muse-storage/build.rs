//! Build script for muse-storage.
//!
//! This script ensures the crate is rebuilt when database migrations change.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
