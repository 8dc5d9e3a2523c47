//! The CLI front-end: owns the registry and the parent option groups,
//! runs plugin registration, then parses argv into a [`ParsedConfig`].
//!
//! The two phases are separate types. [`FrontendBuilder`] is the only place
//! the registry can be written; [`Frontend`] only reads it.

use std::ffi::OsString;

use clap::parser::ValueSource;
use clap::{ArgMatches, Command};

use crate::config::{ConfigValue, ParsedConfig};
use crate::error::{ParseError, RegistryError};
use crate::option::{OptionKind, OptionSpec, ParentOptionGroup, Selection};
use crate::plugin::LanguagePlugin;
use crate::registry::{SubcommandDescriptor, SubcommandRegistry};

/// Registration phase of the front-end.
#[derive(Debug)]
pub struct FrontendBuilder {
    program: &'static str,
    about: &'static str,
    version: Option<&'static str>,
    parents: Vec<ParentOptionGroup>,
    registry: SubcommandRegistry,
    languages: Vec<&'static str>,
}

impl FrontendBuilder {
    pub fn version(mut self, version: &'static str) -> Self {
        self.version = Some(version);
        self
    }

    /// Append a parent option group inherited by every subcommand.
    ///
    /// Its flags must not reuse a name or dest already taken by an earlier
    /// group or by the group itself. `-h/--help` belong to clap.
    pub fn parent(mut self, group: ParentOptionGroup) -> Result<Self, RegistryError> {
        for (i, option) in group.options.iter().enumerate() {
            let collision = |owner: &str| RegistryError::ParentCollision {
                group: group.name.to_string(),
                flag: option.display_name(),
                owner: owner.to_string(),
            };
            if option.is_clap_reserved() {
                return Err(collision("clap"));
            }
            let earlier = self
                .parents
                .iter()
                .flat_map(|g| g.options.iter().map(move |o| (o, g.name)))
                .chain(group.options[..i].iter().map(|o| (o, group.name)));
            for (other, owner) in earlier {
                if option.shares_name_with(other) || option.dest == other.dest {
                    return Err(collision(owner));
                }
            }
        }
        self.parents.push(group);
        Ok(self)
    }

    /// Let `plugin` add its subcommand.
    ///
    /// The parent groups are lent read-only; the registry is lent mutably.
    /// The returned descriptor is also recorded for the help footer. A
    /// descriptor whose discriminator is not `plugin.language()` is taken
    /// back out of the registry and reported as
    /// [`RegistryError::LanguageMismatch`].
    pub fn register(
        &mut self,
        plugin: &dyn LanguagePlugin,
    ) -> Result<&SubcommandDescriptor, RegistryError> {
        let name = plugin.register(&mut self.registry, &self.parents)?.name();
        let descriptor = self.registry.require_language(name, plugin.language())?;
        self.languages.push(descriptor.language());
        tracing::debug!(
            plugin = plugin.language(),
            subcommand = descriptor.name(),
            "Language plugin registered"
        );
        Ok(descriptor)
    }

    /// Freeze the registry and move to the parsing phase.
    pub fn build(self) -> Frontend {
        Frontend {
            program: self.program,
            about: self.about,
            version: self.version,
            parents: self.parents,
            registry: self.registry,
            languages: self.languages,
        }
    }
}

/// Parsing phase of the front-end. Read-only.
#[derive(Debug)]
pub struct Frontend {
    program: &'static str,
    about: &'static str,
    version: Option<&'static str>,
    parents: Vec<ParentOptionGroup>,
    registry: SubcommandRegistry,
    languages: Vec<&'static str>,
}

impl Frontend {
    pub fn builder(program: &'static str, about: &'static str) -> FrontendBuilder {
        FrontendBuilder {
            program,
            about,
            version: None,
            parents: Vec::new(),
            registry: SubcommandRegistry::new(),
            languages: Vec::new(),
        }
    }

    pub fn registry(&self) -> &SubcommandRegistry {
        &self.registry
    }

    pub fn parents(&self) -> &[ParentOptionGroup] {
        &self.parents
    }

    /// Languages in registration order.
    pub fn languages(&self) -> &[&'static str] {
        &self.languages
    }

    /// The clap command tree: one subcommand per descriptor, each carrying
    /// every parent option followed by its own flags.
    pub fn command(&self) -> Command {
        let mut root = Command::new(self.program)
            .about(self.about)
            .subcommand_required(true)
            .arg_required_else_help(true);
        if let Some(version) = self.version {
            root = root.version(version);
        }
        if !self.languages.is_empty() {
            root = root.after_help(format!(
                "Supported languages: {}",
                self.languages.join(", ")
            ));
        }
        for descriptor in self.registry.iter() {
            root = root.subcommand(self.subcommand(descriptor));
        }
        root
    }

    fn subcommand(&self, descriptor: &SubcommandDescriptor) -> Command {
        let parent_args = self
            .parents
            .iter()
            .flat_map(|group| group.options.iter().map(OptionSpec::to_arg));
        let own_args = descriptor.options().iter().map(OptionSpec::to_arg);
        let choice_args = descriptor
            .choice_groups()
            .iter()
            .flat_map(|group| group.members.iter().map(|m| m.flag.to_arg()));
        Command::new(descriptor.name())
            .about(descriptor.description())
            .args(parent_args)
            .args(own_args)
            .args(choice_args)
    }

    /// Parse `argv` (program name first) into a configuration.
    ///
    /// Either the whole configuration is produced or an error is; nothing
    /// partial is returned.
    pub fn parse_from<I, T>(&self, argv: I) -> Result<ParsedConfig, ParseError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(argv)?;
        let (name, sub) = matches.subcommand().ok_or(ParseError::MissingSubcommand)?;
        let descriptor = self
            .registry
            .get(name)
            .ok_or_else(|| ParseError::UnknownSubcommand(name.to_string()))?;

        let mut config = ParsedConfig::empty();
        let options = self
            .parents
            .iter()
            .flat_map(|group| &group.options)
            .chain(descriptor.options());
        for option in options {
            config.set(option.dest, resolve_option(option, sub, descriptor));
        }

        for group in descriptor.choice_groups() {
            let selection = group
                .resolve(|flag| supplied(sub, flag))
                .map_err(|flags| ParseError::ConflictingFlags { flags })?;
            if let Selection::Selected(member) = selection {
                config.record_selection(group.dest, member.flag.long);
            }
            config.set(group.dest, selection.value(group));
        }

        for (key, value) in descriptor.defaults() {
            config.set_if_absent(key, value.clone());
        }

        tracing::debug!(subcommand = name, "Parsed command line");
        Ok(config)
    }
}

fn supplied(matches: &ArgMatches, flag: &OptionSpec) -> bool {
    matches.value_source(flag.long) == Some(ValueSource::CommandLine)
}

fn resolve_option(
    option: &OptionSpec,
    matches: &ArgMatches,
    descriptor: &SubcommandDescriptor,
) -> ConfigValue {
    let fallback = || descriptor.default_for(option.dest).cloned();
    match &option.kind {
        OptionKind::Switch => {
            if supplied(matches, option) {
                ConfigValue::Bool(true)
            } else {
                fallback().unwrap_or(ConfigValue::Bool(false))
            }
        }
        OptionKind::Count => ConfigValue::Integer(i64::from(matches.get_count(option.long))),
        OptionKind::Value { .. } => match matches.get_one::<String>(option.long) {
            Some(value) => ConfigValue::String(value.clone()),
            None => fallback().unwrap_or(ConfigValue::Null),
        },
    }
}
