/// Failures while plugins register their subcommands.
///
/// These are programming errors in a plugin or in the front-end wiring and
/// are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("subcommand '{0}' is already registered")]
    DuplicateSubcommand(String),

    #[error("flag '{flag}' of subcommand '{subcommand}' collides with one owned by '{owner}'")]
    FlagCollision {
        subcommand: String,
        flag: String,
        owner: String,
    },

    #[error("subcommand '{0}' did not set a language discriminator")]
    MissingDiscriminator(String),

    /// The descriptor's discriminator is not the registering plugin's language.
    #[error("subcommand '{subcommand}' sets language '{found}' but its plugin is '{expected}'")]
    LanguageMismatch {
        subcommand: String,
        expected: String,
        found: String,
    },

    #[error("plugin returned subcommand '{0}', which is not in the registry")]
    NotInRegistry(String),

    #[error("flag '{flag}' of parent group '{group}' collides with one owned by '{owner}'")]
    ParentCollision {
        group: String,
        flag: String,
        owner: String,
    },
}

/// Failures while turning argv into a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// More than one member of a choice group was supplied.
    #[error("{}", conflict_message(.flags))]
    ConflictingFlags { flags: Vec<String> },

    /// Anything clap rejects, including `--help` and `--version` requests.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("no subcommand named '{0}' is registered")]
    UnknownSubcommand(String),

    #[error("no subcommand was given")]
    MissingSubcommand,
}

fn conflict_message(flags: &[String]) -> String {
    match flags {
        [first, rest @ ..] if !rest.is_empty() => {
            let others: Vec<String> = rest.iter().map(|f| format!("'{f}'")).collect();
            format!(
                "the argument '{first}' cannot be used with {}",
                others.join(", ")
            )
        }
        _ => format!("conflicting arguments: {}", flags.join(", ")),
    }
}
