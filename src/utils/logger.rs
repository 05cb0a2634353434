use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Route `log` output to `path` when the terminal belongs to the display,
/// otherwise to stderr.
///
/// Level comes from `RUST_LOG` (default `info` in a file, `warn` on
/// stderr); `VOLLEY_COURT_DEBUG` forces `debug`.
pub fn init(path: Option<&Path>) -> Result<()> {
    let (target, default_level) = match path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            (env_logger::Target::Pipe(Box::new(file)), "info")
        }
        None => (env_logger::Target::Stderr, "warn"),
    };

    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if std::env::var_os("VOLLEY_COURT_DEBUG").is_some() {
        builder.filter_level(log::LevelFilter::Debug);
    }

    builder
        .target(target)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .try_init()
        .context("Logger already initialized")?;

    Ok(())
}
