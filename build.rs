use anyhow::Result;
use fs_extra::{copy_items, dir::CopyOptions};
use std::env;

fn main() -> Result<()> {
    // rebuild whenever an asset changes
    for entry in glob::glob("res/**/*")? {
        println!("cargo:rerun-if-changed={}", entry?.display());
    }

    let out_dir = env::var("OUT_DIR")?;
    let mut copy_options = CopyOptions::new();
    copy_options.overwrite = true;
    let paths_to_copy = vec!["res/"];
    copy_items(&paths_to_copy, out_dir, &copy_options)?;

    Ok(())
}
