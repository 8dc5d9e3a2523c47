use std::collections::BTreeMap;

use crate::config::ConfigValue;
use crate::error::RegistryError;
use crate::option::{ChoiceGroup, OptionSpec, ParentOptionGroup};
use crate::LANGUAGE_KEY;

/// The set of subcommands known to the front-end, keyed by unique name.
///
/// Written during the registration phase only. Insertion order is kept so
/// help output lists languages in the order their plugins registered.
#[derive(Debug, Default)]
pub struct SubcommandRegistry {
    entries: Vec<SubcommandDescriptor>,
}

impl SubcommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new subcommand entry.
    ///
    /// `parents` are the front-end's option groups; every flag the builder
    /// accepts is checked against them. Nothing is inserted until
    /// [`SubcommandBuilder::finish`] succeeds.
    pub fn add_subcommand<'r, 'p>(
        &'r mut self,
        name: &'static str,
        description: &'static str,
        parents: &'p [ParentOptionGroup],
    ) -> Result<SubcommandBuilder<'r, 'p>, RegistryError> {
        if self.contains(name) {
            return Err(RegistryError::DuplicateSubcommand(name.to_string()));
        }
        Ok(SubcommandBuilder {
            registry: self,
            parents,
            name,
            description,
            language: None,
            options: Vec::new(),
            choice_groups: Vec::new(),
            defaults: BTreeMap::new(),
        })
    }

    /// Check that `name` was registered with discriminator `expected`.
    ///
    /// A mismatching entry is removed again, so the registry looks as if
    /// the registration never happened.
    pub(crate) fn require_language(
        &mut self,
        name: &str,
        expected: &'static str,
    ) -> Result<&SubcommandDescriptor, RegistryError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.name == name)
            .ok_or_else(|| RegistryError::NotInRegistry(name.to_string()))?;
        let found = self.entries[index].language;
        if found != expected {
            self.entries.remove(index);
            return Err(RegistryError::LanguageMismatch {
                subcommand: name.to_string(),
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(&self.entries[index])
    }

    pub fn get(&self, name: &str) -> Option<&SubcommandDescriptor> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubcommandDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A registered subcommand. Immutable once inside the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct SubcommandDescriptor {
    name: &'static str,
    description: &'static str,
    language: &'static str,
    options: Vec<OptionSpec>,
    choice_groups: Vec<ChoiceGroup>,
    defaults: BTreeMap<String, ConfigValue>,
}

impl SubcommandDescriptor {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Value written to the `language` discriminator.
    pub fn language(&self) -> &'static str {
        self.language
    }

    /// Flags defined by the subcommand itself, excluding choice groups.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn choice_groups(&self) -> &[ChoiceGroup] {
        &self.choice_groups
    }

    /// Defaults for fields the user did not supply, including `language`.
    pub fn defaults(&self) -> &BTreeMap<String, ConfigValue> {
        &self.defaults
    }

    pub fn default_for(&self, dest: &str) -> Option<&ConfigValue> {
        self.defaults.get(dest)
    }

    /// Every `--long` flag this subcommand adds on top of its parents.
    pub fn flag_names(&self) -> Vec<String> {
        self.options
            .iter()
            .chain(
                self.choice_groups
                    .iter()
                    .flat_map(|group| group.members.iter().map(|m| &m.flag)),
            )
            .map(OptionSpec::display_name)
            .collect()
    }
}

/// Collects a subcommand's flags and defaults, checking each flag against
/// the parent groups and the flags added so far.
#[derive(Debug)]
pub struct SubcommandBuilder<'r, 'p> {
    registry: &'r mut SubcommandRegistry,
    parents: &'p [ParentOptionGroup],
    name: &'static str,
    description: &'static str,
    language: Option<&'static str>,
    options: Vec<OptionSpec>,
    choice_groups: Vec<ChoiceGroup>,
    defaults: BTreeMap<String, ConfigValue>,
}

impl<'r> SubcommandBuilder<'r, '_> {
    /// Set the dispatch discriminator written into every configuration
    /// parsed through this subcommand.
    pub fn language(mut self, language: &'static str) -> Self {
        self.language = Some(language);
        self.defaults
            .insert(LANGUAGE_KEY.to_string(), ConfigValue::from(language));
        self
    }

    /// Default for `dest` when the user does not supply it.
    ///
    /// The `language` key belongs to [`language`](Self::language) and is
    /// rejected here.
    pub fn default(
        mut self,
        dest: &str,
        value: impl Into<ConfigValue>,
    ) -> Result<Self, RegistryError> {
        if dest == LANGUAGE_KEY {
            return Err(self.collision(dest, "language discriminator"));
        }
        self.defaults.insert(dest.to_string(), value.into());
        Ok(self)
    }

    pub fn option(mut self, spec: OptionSpec) -> Result<Self, RegistryError> {
        self.check_dest(spec.dest, &spec.display_name())?;
        self.check_names(&spec, &[])?;
        self.options.push(spec);
        Ok(self)
    }

    pub fn choice_group(mut self, group: ChoiceGroup) -> Result<Self, RegistryError> {
        self.check_dest(group.dest, group.dest)?;
        for (i, member) in group.members.iter().enumerate() {
            let earlier: Vec<&OptionSpec> =
                group.members[..i].iter().map(|m| &m.flag).collect();
            self.check_names(&member.flag, &earlier)?;
        }
        self.choice_groups.push(group);
        Ok(self)
    }

    /// Insert the descriptor into the registry.
    pub fn finish(self) -> Result<&'r SubcommandDescriptor, RegistryError> {
        let SubcommandBuilder {
            registry,
            name,
            description,
            language,
            options,
            choice_groups,
            defaults,
            ..
        } = self;
        let language =
            language.ok_or_else(|| RegistryError::MissingDiscriminator(name.to_string()))?;
        let descriptor = SubcommandDescriptor {
            name,
            description,
            language,
            options,
            choice_groups,
            defaults,
        };
        tracing::debug!(
            subcommand = descriptor.name,
            language = descriptor.language,
            flags = ?descriptor.flag_names(),
            "Registered subcommand"
        );
        registry.entries.push(descriptor);
        let index = registry.entries.len() - 1;
        Ok(&registry.entries[index])
    }

    /// Every flag already claimed, paired with its owner.
    fn claimed(&self) -> Vec<(&OptionSpec, &'static str)> {
        let mut claimed = Vec::new();
        for group in self.parents {
            claimed.extend(group.options.iter().map(|o| (o, group.name)));
        }
        claimed.extend(self.options.iter().map(|o| (o, self.name)));
        for group in &self.choice_groups {
            claimed.extend(group.members.iter().map(|m| (&m.flag, self.name)));
        }
        claimed
    }

    fn collision(&self, flag: &str, owner: &str) -> RegistryError {
        RegistryError::FlagCollision {
            subcommand: self.name.to_string(),
            flag: flag.to_string(),
            owner: owner.to_string(),
        }
    }

    fn check_dest(&self, dest: &str, flag: &str) -> Result<(), RegistryError> {
        if dest == LANGUAGE_KEY {
            return Err(self.collision(flag, "language discriminator"));
        }
        match self.claimed().into_iter().find(|(o, _)| o.dest == dest) {
            Some((_, owner)) => Err(self.collision(flag, owner)),
            None => Ok(()),
        }
    }

    fn check_names(&self, spec: &OptionSpec, siblings: &[&OptionSpec]) -> Result<(), RegistryError> {
        let flag = spec.display_name();
        if spec.is_clap_reserved() {
            return Err(self.collision(&flag, "clap"));
        }
        if let Some((_, owner)) = self
            .claimed()
            .into_iter()
            .find(|(o, _)| spec.shares_name_with(o))
        {
            return Err(self.collision(&flag, owner));
        }
        if siblings.iter().any(|o| spec.shares_name_with(o)) {
            return Err(self.collision(&flag, self.name));
        }
        Ok(())
    }
}
