//! The registration contract every target-language plugin satisfies.
//!
//! The front-end holds no language-specific knowledge. It hands each plugin
//! the shared [`SubcommandRegistry`] and its parent option groups, and the
//! plugin describes its own subcommand.
//!
//! # Example
//!
//! ```
//! use rpdk_core::{
//!     LanguagePlugin, OptionSpec, ParentOptionGroup, RegistryError, SubcommandDescriptor,
//!     SubcommandRegistry,
//! };
//!
//! pub struct Python;
//!
//! impl LanguagePlugin for Python {
//!     fn language(&self) -> &'static str {
//!         "python"
//!     }
//!
//!     fn register<'r>(
//!         &self,
//!         registry: &'r mut SubcommandRegistry,
//!         parents: &[ParentOptionGroup],
//!     ) -> Result<&'r SubcommandDescriptor, RegistryError> {
//!         registry
//!             .add_subcommand("python", "Python project files", parents)?
//!             .language(self.language())
//!             .option(OptionSpec::switch("use_docker", "use-docker"))?
//!             .finish()
//!     }
//! }
//!
//! let mut registry = SubcommandRegistry::new();
//! let descriptor = Python.register(&mut registry, &[]).unwrap();
//! assert_eq!(descriptor.language(), "python");
//! ```

use crate::error::RegistryError;
use crate::option::ParentOptionGroup;
use crate::registry::{SubcommandDescriptor, SubcommandRegistry};

/// A target-language plugin.
pub trait LanguagePlugin {
    /// The fixed value of the `language` discriminator for this plugin.
    fn language(&self) -> &'static str;

    /// Create this plugin's subcommand in `registry`.
    ///
    /// Implementations must set the discriminator to [`language`](Self::language)
    /// and must not redefine any flag owned by `parents`. The descriptor is
    /// returned so the front-end can do shared bookkeeping;
    /// [`FrontendBuilder::register`](crate::FrontendBuilder::register) rejects
    /// one whose discriminator differs from `language()`.
    fn register<'r>(
        &self,
        registry: &'r mut SubcommandRegistry,
        parents: &[ParentOptionGroup],
    ) -> Result<&'r SubcommandDescriptor, RegistryError>;
}
