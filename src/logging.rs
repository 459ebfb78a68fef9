//! Debug-build logging
//!
//! The terminal belongs to the TUI, so log records go to a file next to the
//! config file. Release builds never install a logger.

use std::path::PathBuf;

/// Log file location
pub fn log_path() -> Option<PathBuf> {
    crate::config::config_path()
        .and_then(|config| config.parent().map(|dir| dir.join("posipick.log")))
}

/// Install the file logger; `RUST_LOG` overrides the default `posipick=debug`
#[cfg(debug_assertions)]
pub fn init() {
    use std::fs::OpenOptions;
    use std::io::Write;

    let Some(path) = log_path() else {
        return;
    };
    if let Some(dir) = path.parent()
        && std::fs::create_dir_all(dir).is_err()
    {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("posipick=debug"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder.target(env_logger::Target::Pipe(Box::new(file)));
    // Already initialised (tests, embedding hosts)
    let _ = builder.try_init();
}

#[cfg(not(debug_assertions))]
pub fn init() {}
