//! Host-side helper: `cargo run` builds the wasm package into `static/pkg`
//! and serves `static/` on a local HTTP port.
//!
//! `QUAD_PORT` overrides the port (default 8000). Set `QUAD_SKIP_WASM_PACK`
//! to serve whatever is already in `static/pkg`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::process::{Command, Stdio};
    use std::{env, process};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = env::var("QUAD_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

    if env::var_os("QUAD_SKIP_WASM_PACK").is_none() {
        log::info!("building wasm package");
        match Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .status()
        {
            Ok(st) if st.success() => {}
            Ok(st) => {
                log::error!("wasm-pack exited with {st}");
                process::exit(1);
            }
            Err(err) => {
                log::warn!("wasm-pack unavailable ({err}); serving existing static/pkg");
            }
        }
    }

    log::info!("serving static/ at http://127.0.0.1:{port}");
    let status = Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
        .stdout(Stdio::null())
        .status();

    match status {
        Ok(st) if st.success() => {}
        Ok(st) => {
            log::error!("http server exited with {st}");
            process::exit(1);
        }
        Err(err) => {
            log::error!("failed to start http server: {err}");
            process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
