//! Host-side helper: `cargo run` builds the wasm bundle into `static/pkg`
//! and serves `static/` locally so the backdrop can be checked in a browser.

use std::env;
use std::process::{self, Command};

const DEFAULT_PORT: &str = "8000";

fn main() {
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return;
    }

    println!("Building wasm bundle …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(st) => {
            eprintln!("wasm-pack failed ({st}).");
            process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/); serving whatever is in static/pkg.");
        }
    }

    let port = env::var("BACKDROP_PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
    println!("Serving static/ at http://127.0.0.1:{port} (Ctrl-C to stop)");
    let status = Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .status();
    match status {
        Ok(st) if st.success() => {}
        Ok(st) => eprintln!("http server exited with {st}"),
        Err(e) => {
            eprintln!("could not start python3 http.server: {e}");
            process::exit(1);
        }
    }
}
