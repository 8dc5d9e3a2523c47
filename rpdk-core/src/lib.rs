//! # rpdk-core
//!
//! Shared plumbing for the `cfn` resource-provider scaffolding CLI.
//!
//! Each target language ships as a [`LanguagePlugin`]. At startup the
//! front-end hands every plugin the shared [`SubcommandRegistry`] and its
//! [`ParentOptionGroup`]s; the plugin adds one subcommand with its own flags
//! and defaults. Once registration is done the [`Frontend`] parses argv into
//! a flat [`ParsedConfig`], which a [`Dispatcher`] routes to the generation
//! engine named by the `language` discriminator.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`option`] | Flag definitions, parent groups, choice groups |
//! | [`registry`] | Registry, subcommand builder and descriptor |
//! | [`plugin`] | The [`LanguagePlugin`] contract |
//! | [`frontend`] | Registration/parsing phases and argv resolution |
//! | [`config`] | [`ParsedConfig`] and typed value reads |
//! | [`dispatch`] | [`GenerationEngine`] routing |

pub mod config;
pub mod dispatch;
pub mod error;
pub mod frontend;
pub mod option;
pub mod plugin;
pub mod registry;

pub use config::{ConfigError, ConfigValue, FromConfigValue, ParsedConfig};
pub use dispatch::{DispatchError, Dispatcher, GenerationEngine};
pub use error::{ParseError, RegistryError};
pub use frontend::{Frontend, FrontendBuilder};
pub use option::{ChoiceGroup, ChoiceMember, OptionKind, OptionSpec, ParentOptionGroup, Selection};
pub use plugin::LanguagePlugin;
pub use registry::{SubcommandBuilder, SubcommandDescriptor, SubcommandRegistry};

/// Configuration key of the dispatch discriminator.
pub const LANGUAGE_KEY: &str = "language";
