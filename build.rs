use std::fs;

fn main() {
    // Frontend assets are embedded with include_str!, so rebuild whenever a
    // file under app/ changes.
    let has_web_frontend = std::env::var("CARGO_FEATURE_WEB_FRONTEND").is_ok();

    if has_web_frontend {
        if let Ok(entries) = fs::read_dir("app") {
            for entry in entries.flatten() {
                println!("cargo:rerun-if-changed={}", entry.path().display());
            }
        }
    }
}
