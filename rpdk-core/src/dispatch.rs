use std::collections::BTreeMap;

use crate::config::ParsedConfig;

/// Consumer of a parsed configuration, one per target language.
pub trait GenerationEngine {
    fn generate(&self, config: &ParsedConfig) -> anyhow::Result<()>;
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("configuration has no language discriminator")]
    MissingLanguage,

    #[error("no generation engine is routed for language '{0}'")]
    NoEngine(String),

    #[error("generation for '{language}' failed: {source:#}")]
    Engine {
        language: String,
        source: anyhow::Error,
    },
}

/// Routes a configuration to the engine registered for its `language`.
#[derive(Default)]
pub struct Dispatcher {
    engines: BTreeMap<String, Box<dyn GenerationEngine>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route `language` to `engine`, replacing any earlier route.
    pub fn route(mut self, language: &str, engine: impl GenerationEngine + 'static) -> Self {
        self.engines.insert(language.to_string(), Box::new(engine));
        self
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }

    /// Hand `config` to its engine. The configuration is consumed once.
    pub fn dispatch(&self, config: &ParsedConfig) -> Result<(), DispatchError> {
        let language = config.language().ok_or(DispatchError::MissingLanguage)?;
        let engine = self
            .engines
            .get(language)
            .ok_or_else(|| DispatchError::NoEngine(language.to_string()))?;
        tracing::info!(language, "Dispatching to generation engine");
        engine.generate(config).map_err(|source| DispatchError::Engine {
            language: language.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.engines.keys().collect::<Vec<_>>())
            .finish()
    }
}
