//! `seabed-view <ground.toml> [options.toml]`
//!
//! Opens a native window over the given ground description with the
//! bounded map camera. Set `RUST_LOG=info` to see the derived pan fence.

use std::path::PathBuf;
use std::process::ExitCode;

use seabed_view::options::Options;
use seabed_view::Viewer;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let Some(ground) = args.next().map(PathBuf::from) else {
        log::error!("Usage: seabed-view <ground.toml> [options.toml]");
        return ExitCode::FAILURE;
    };

    let options = match args.next().map(PathBuf::from) {
        Some(path) => match Options::load(&path) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Options::default(),
    };

    let viewer = Viewer::builder()
        .with_ground(ground)
        .with_options(options)
        .build();
    if let Err(e) = viewer.run() {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
