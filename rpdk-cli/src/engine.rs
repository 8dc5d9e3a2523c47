//! Hand-off to the external generator.
//!
//! `cfn` does not render templates itself. The engine here writes the
//! parsed configuration, plus the language plugin's persisted settings, as
//! one JSON document that the generator consumes.

use std::cell::RefCell;
use std::io::Write;

use anyhow::Context;
use rpdk_core::{GenerationEngine, ParsedConfig};
use rpdk_typescript::TypeScriptSettings;
use serde::Serialize;

/// Extracts a language's persisted settings from a configuration.
pub type SettingsFn = fn(&ParsedConfig) -> anyhow::Result<serde_json::Value>;

#[derive(Serialize)]
struct Handoff<'a> {
    config: &'a ParsedConfig,
    settings: serde_json::Value,
}

/// Writes `{"config": .., "settings": ..}` as pretty JSON to `out`.
pub struct HandoffEngine<W> {
    out: RefCell<W>,
    settings: SettingsFn,
}

impl<W: Write> HandoffEngine<W> {
    pub fn new(out: W, settings: SettingsFn) -> Self {
        Self {
            out: RefCell::new(out),
            settings,
        }
    }
}

impl<W: Write> GenerationEngine for HandoffEngine<W> {
    fn generate(&self, config: &ParsedConfig) -> anyhow::Result<()> {
        let settings = (self.settings)(config).context("invalid language settings")?;
        let mut out = self.out.borrow_mut();
        serde_json::to_writer_pretty(&mut *out, &Handoff { config, settings })
            .context("failed to write hand-off document")?;
        writeln!(out)?;
        out.flush()?;
        tracing::info!("Configuration handed off to generator");
        Ok(())
    }
}

pub fn typescript_settings(config: &ParsedConfig) -> anyhow::Result<serde_json::Value> {
    let settings = TypeScriptSettings::from_config(config)?;
    tracing::info!(
        use_docker = settings.use_docker,
        npm_install = settings.runs_npm_install(),
        "TypeScript settings"
    );
    Ok(serde_json::to_value(settings)?)
}
