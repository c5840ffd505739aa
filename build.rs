extern crate vergen;

use vergen::{generate_cargo_keys, ConstantsFlags};

fn main() {
    let flags = ConstantsFlags::SHA | ConstantsFlags::REBUILD_ON_HEAD_CHANGE;
    // Generate the 'cargo:' key output. Source tarballs have no git
    // metadata, so fall back to a placeholder sha instead of failing.
    if let Err(e) = generate_cargo_keys(flags) {
        println!("cargo:warning=vergen: {}", e);
        println!("cargo:rustc-env=VERGEN_SHA=unknown");
    }
}
