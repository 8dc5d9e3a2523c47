//! Declarative flag definitions shared by the front-end and language plugins.
//!
//! Options are described as plain data and turned into clap [`Arg`]s only
//! when the front-end assembles its command tree. Keeping them declarative
//! lets the registry check for collisions and lets the parser resolve values
//! without knowing which plugin defined them.

use clap::{Arg, ArgAction};

use crate::config::ConfigValue;

/// Flag names clap claims on every subcommand.
const CLAP_RESERVED_LONG: &[&str] = &["help"];
const CLAP_RESERVED_SHORT: &[char] = &['h'];

/// How an option consumes the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    /// Boolean flag, `true` when present.
    Switch,
    /// Counts occurrences, e.g. `-vv`.
    Count,
    /// Takes one value.
    Value {
        value_name: &'static str,
        default: Option<&'static str>,
    },
}

/// A single flag definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Configuration key the resolved value is stored under.
    pub dest: &'static str,
    pub long: &'static str,
    pub short: Option<char>,
    pub help: &'static str,
    pub kind: OptionKind,
}

impl OptionSpec {
    pub fn switch(dest: &'static str, long: &'static str) -> Self {
        Self {
            dest,
            long,
            short: None,
            help: "",
            kind: OptionKind::Switch,
        }
    }

    pub fn count(dest: &'static str, long: &'static str) -> Self {
        Self {
            dest,
            long,
            short: None,
            help: "",
            kind: OptionKind::Count,
        }
    }

    pub fn value(dest: &'static str, long: &'static str, value_name: &'static str) -> Self {
        Self {
            dest,
            long,
            short: None,
            help: "",
            kind: OptionKind::Value {
                value_name,
                default: None,
            },
        }
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }

    /// Default for a [`OptionKind::Value`] option. Ignored for other kinds.
    pub fn default_value(mut self, value: &'static str) -> Self {
        if let OptionKind::Value { default, .. } = &mut self.kind {
            *default = Some(value);
        }
        self
    }

    /// `--long` form, used in user-facing messages.
    pub fn display_name(&self) -> String {
        format!("--{}", self.long)
    }

    /// Same long name, or same short name when both have one.
    pub(crate) fn shares_name_with(&self, other: &OptionSpec) -> bool {
        self.long == other.long || (self.short.is_some() && self.short == other.short)
    }

    /// Names clap adds to every command itself.
    pub(crate) fn is_clap_reserved(&self) -> bool {
        CLAP_RESERVED_LONG.contains(&self.long)
            || self.short.is_some_and(|s| CLAP_RESERVED_SHORT.contains(&s))
    }

    /// The clap argument for this option. The long name doubles as the
    /// clap id so that choice members sharing a `dest` stay distinct.
    pub(crate) fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.long).long(self.long).help(self.help);
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        match &self.kind {
            OptionKind::Switch => arg.action(ArgAction::SetTrue),
            OptionKind::Count => arg.action(ArgAction::Count),
            OptionKind::Value {
                value_name,
                default,
            } => {
                arg = arg.action(ArgAction::Set).value_name(*value_name);
                match default {
                    Some(default) => arg.default_value(*default),
                    None => arg,
                }
            }
        }
    }
}

/// A named set of options defined once by the front-end and inherited by
/// every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentOptionGroup {
    pub name: &'static str,
    pub options: Vec<OptionSpec>,
}

impl ParentOptionGroup {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            options: Vec::new(),
        }
    }

    pub fn option(mut self, spec: OptionSpec) -> Self {
        self.options.push(spec);
        self
    }
}

/// One flag of a [`ChoiceGroup`] and the value it writes into the group's dest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceMember {
    pub flag: OptionSpec,
    pub value: ConfigValue,
}

/// A set of switches of which at most one may be supplied.
///
/// Every member writes into the same `dest`. When none is supplied the
/// group's default applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceGroup {
    pub dest: &'static str,
    pub members: Vec<ChoiceMember>,
    pub default: ConfigValue,
}

impl ChoiceGroup {
    pub fn new(dest: &'static str, default: impl Into<ConfigValue>) -> Self {
        Self {
            dest,
            members: Vec::new(),
            default: default.into(),
        }
    }

    /// Add a member switch. Its `dest` is overwritten with the group's.
    pub fn member(mut self, mut flag: OptionSpec, value: impl Into<ConfigValue>) -> Self {
        flag.dest = self.dest;
        flag.kind = OptionKind::Switch;
        self.members.push(ChoiceMember {
            flag,
            value: value.into(),
        });
        self
    }

    /// Resolve which member, if any, was supplied.
    ///
    /// Returns every supplied member's display name as the error when more
    /// than one is present.
    pub fn resolve<'g>(
        &'g self,
        supplied: impl Fn(&OptionSpec) -> bool,
    ) -> Result<Selection<'g>, Vec<String>> {
        let picked: Vec<&ChoiceMember> = self
            .members
            .iter()
            .filter(|member| supplied(&member.flag))
            .collect();
        match picked.as_slice() {
            [] => Ok(Selection::Unset),
            [one] => Ok(Selection::Selected(one)),
            many => Err(many.iter().map(|m| m.flag.display_name()).collect()),
        }
    }
}

/// Outcome of resolving a [`ChoiceGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'g> {
    Unset,
    Selected(&'g ChoiceMember),
}

impl Selection<'_> {
    /// The value to store for a group: the member's value or the group default.
    pub fn value(&self, group: &ChoiceGroup) -> ConfigValue {
        match self {
            Selection::Unset => group.default.clone(),
            Selection::Selected(member) => member.value.clone(),
        }
    }
}
