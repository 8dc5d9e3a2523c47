//! # rpdk-cli
//!
//! The `cfn` front-end. It owns the parent option groups, registers every
//! bundled language plugin and hands the parsed configuration to the
//! generation engine.
//!
//! | Subcommand | Plugin |
//! |---------|-------------|
//! | `cfn typescript` | [`rpdk_typescript::TypeScriptPlugin`] |
//!
//! ## Architecture
//!
//! - [`parents`]: option groups inherited by every subcommand
//! - [`engine`]: JSON hand-off to the external generator
//! - [`logging`]: `tracing` subscriber setup

pub mod engine;
pub mod logging;
pub mod parents;

use std::ffi::OsString;
use std::io::Write;

use rpdk_core::{
    DispatchError, Dispatcher, Frontend, LanguagePlugin, ParseError, RegistryError,
};
use rpdk_typescript::TypeScriptPlugin;

use engine::HandoffEngine;

const ABOUT: &str = "Scaffold CloudFormation resource providers in your language of choice";

/// Everything that can stop a `cfn` invocation.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Parse(ParseError::Usage(err)) => err.exit_code(),
            CliError::Parse(_) => 2,
            CliError::Registry(_) | CliError::Dispatch(_) => 1,
        }
    }
}

/// The plugins shipped with this binary, in help order.
pub fn plugins() -> Vec<Box<dyn LanguagePlugin>> {
    vec![Box::new(TypeScriptPlugin)]
}

/// Build the front-end: parent groups first, then plugin registration.
pub fn frontend() -> Result<Frontend, RegistryError> {
    let mut builder = Frontend::builder("cfn", ABOUT).version(env!("CARGO_PKG_VERSION"));
    for group in parents::parent_groups() {
        builder = builder.parent(group)?;
    }
    for plugin in plugins() {
        builder.register(plugin.as_ref())?;
    }
    Ok(builder.build())
}

/// Route every bundled language to a hand-off engine writing to `out`.
pub fn dispatcher<W: Write + 'static>(out: W) -> Dispatcher {
    Dispatcher::new().route(
        rpdk_typescript::LANGUAGE,
        HandoffEngine::new(out, engine::typescript_settings),
    )
}

/// Parse `argv` (program name first) and dispatch the configuration.
///
/// Logging is installed before any plugin registers, at the level `-v`
/// suggests, and adjusted once argv is parsed.
pub fn run<I, T, W>(argv: I, out: W) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write + 'static,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let log_level = logging::init_tracing(logging::verbosity_hint(&argv));
    let frontend =
        frontend().inspect_err(|err| tracing::error!(%err, "Plugin registration failed"))?;
    let config = frontend.parse_from(argv)?;
    log_level.set_verbosity(config.get_or::<u8>(parents::VERBOSE, 0));
    tracing::debug!(?config, "Resolved configuration");
    dispatcher(out).dispatch(&config)?;
    Ok(())
}
