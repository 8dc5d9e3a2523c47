use rpdk_core::{ConfigError, ParsedConfig, LANGUAGE_KEY};
use serde::Serialize;

use crate::{LANGUAGE, SKIP_NPM_INSTALL, USE_DOCKER};

/// Which docker flag, if any, the user passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DockerChoice {
    #[default]
    Unset,
    Docker,
    NoDocker,
}

impl DockerChoice {
    pub fn from_config(config: &ParsedConfig) -> Self {
        match config.selection(USE_DOCKER) {
            Some("use-docker") => DockerChoice::Docker,
            Some("no-docker") => DockerChoice::NoDocker,
            _ => DockerChoice::Unset,
        }
    }

    /// Only an explicit `--use-docker` turns packaging in docker on.
    pub fn use_docker(self) -> bool {
        matches!(self, DockerChoice::Docker)
    }
}

/// Settings the generation engine persists for a TypeScript project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeScriptSettings {
    #[serde(skip)]
    pub docker: DockerChoice,
    pub use_docker: bool,
    pub skip_npm_install: bool,
}

impl TypeScriptSettings {
    /// Read the settings back out of a configuration parsed through the
    /// `typescript` subcommand.
    pub fn from_config(config: &ParsedConfig) -> Result<Self, ConfigError> {
        let language: String = config.get(LANGUAGE_KEY)?;
        if language != LANGUAGE {
            return Err(ConfigError::TypeMismatch {
                key: LANGUAGE_KEY.to_string(),
                expected: LANGUAGE,
            });
        }
        Ok(Self {
            docker: DockerChoice::from_config(config),
            use_docker: config.get(USE_DOCKER)?,
            skip_npm_install: config.get(SKIP_NPM_INSTALL)?,
        })
    }

    pub fn runs_npm_install(&self) -> bool {
        !self.skip_npm_install
    }
}
