use std::ffi::OsString;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Count `-v`/`--verbose` occurrences in raw argv (program name first).
///
/// Logging has to be live before plugins register, which is before clap has
/// parsed anything. Only bare `-v`, `-vv`... and `--verbose` are counted;
/// [`LogLevel::set_verbosity`] corrects the level once parsing is done.
pub fn verbosity_hint(argv: &[OsString]) -> u8 {
    let mut count: u8 = 0;
    for arg in argv.iter().skip(1).filter_map(|a| a.to_str()) {
        if arg == "--" {
            break;
        }
        if arg == "--verbose" {
            count = count.saturating_add(1);
        } else if let Some(shorts) = arg.strip_prefix('-') {
            if !shorts.is_empty() && shorts.chars().all(|c| c == 'v') {
                let n = u8::try_from(shorts.len()).unwrap_or(u8::MAX);
                count = count.saturating_add(n);
            }
        }
    }
    count
}

/// Handle on the installed subscriber's filter.
pub struct LogLevel {
    handle: Option<reload::Handle<EnvFilter, Registry>>,
    from_env: bool,
}

impl LogLevel {
    /// Swap in the filter for `verbosity`. No-op when `RUST_LOG` chose the
    /// filter or when another subscriber was already installed.
    pub fn set_verbosity(&self, verbosity: u8) {
        if self.from_env {
            return;
        }
        let Some(handle) = &self.handle else {
            return;
        };
        if let Err(err) = handle.reload(EnvFilter::new(default_filter(verbosity))) {
            tracing::warn!(%err, "Could not adjust log level");
        }
    }
}

/// Install the global `tracing` subscriber, logging to stderr.
///
/// Respects `RUST_LOG`; otherwise the level comes from `verbosity` and can
/// be changed later through the returned [`LogLevel`].
pub fn init_tracing(verbosity: u8) -> LogLevel {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_filter(verbosity)), false),
    };
    let (filter, handle) = reload::Layer::new(filter);
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
    match installed {
        Ok(()) => LogLevel {
            handle: Some(handle),
            from_env,
        },
        Err(err) => {
            tracing::debug!(%err, "Keeping the existing tracing subscriber");
            LogLevel {
                handle: None,
                from_env,
            }
        }
    }
}
