// Mirrors static/ into dist/ so the site can be deployed as-is.
use std::path::Path;

use fs_extra::dir::{self, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let static_dir = Path::new("static");
    if !static_dir.exists() {
        return;
    }

    let out_dir = Path::new("dist");
    if let Err(e) = dir::create_all(out_dir, true) {
        println!("cargo:warning=could not prepare dist/: {e}");
        return;
    }
    let options = CopyOptions::new().overwrite(true).content_only(true);
    if let Err(e) = dir::copy(static_dir, out_dir, &options) {
        println!("cargo:warning=could not copy static/ to dist/: {e}");
    }
}
