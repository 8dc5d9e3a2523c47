//! # rpdk-typescript
//!
//! TypeScript language plugin. Registers the `typescript` subcommand:
//!
//! ```text
//! cfn typescript [-d | --use-docker | --no-docker] [--skip-npm-install]
//! ```
//!
//! `--use-docker` and `--no-docker` form one choice group writing
//! `use_docker` (default `false`). `--skip-npm-install` defaults to `false`,
//! meaning the engine runs `npm install` unless told otherwise.
//!
//! [`TypeScriptSettings`] is the typed view the generation engine reads
//! back out of a parsed configuration.

mod settings;

use rpdk_core::{
    ChoiceGroup, LanguagePlugin, OptionSpec, ParentOptionGroup, RegistryError,
    SubcommandDescriptor, SubcommandRegistry,
};

pub use settings::{DockerChoice, TypeScriptSettings};

/// Subcommand name and `language` discriminator.
pub const LANGUAGE: &str = "typescript";

pub const USE_DOCKER: &str = "use_docker";
pub const SKIP_NPM_INSTALL: &str = "skip_npm_install";

const DESCRIPTION: &str = "This sub command generates IDE and build files for TypeScript";

const USE_DOCKER_HELP: &str = "Use docker for TypeScript platform-independent packaging. \
This is recommended if you're using native dependencies.";

#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptPlugin;

impl LanguagePlugin for TypeScriptPlugin {
    fn language(&self) -> &'static str {
        LANGUAGE
    }

    fn register<'r>(
        &self,
        registry: &'r mut SubcommandRegistry,
        parents: &[ParentOptionGroup],
    ) -> Result<&'r SubcommandDescriptor, RegistryError> {
        let docker = ChoiceGroup::new(USE_DOCKER, false)
            .member(
                OptionSpec::switch(USE_DOCKER, "use-docker")
                    .short('d')
                    .help(USE_DOCKER_HELP),
                true,
            )
            .member(
                OptionSpec::switch(USE_DOCKER, "no-docker")
                    .help("See --use-docker for more information."),
                false,
            );

        registry
            .add_subcommand(LANGUAGE, DESCRIPTION, parents)?
            .language(LANGUAGE)
            .choice_group(docker)?
            .option(
                OptionSpec::switch(SKIP_NPM_INSTALL, "skip-npm-install")
                    .help("Skip running npm install after init-ing the project."),
            )?
            .default(SKIP_NPM_INSTALL, false)?
            .finish()
    }
}
