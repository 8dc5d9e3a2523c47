use rpdk_core::{
    Frontend, LanguagePlugin, OptionSpec, ParentOptionGroup, ParseError, ParsedConfig,
    RegistryError, SubcommandRegistry,
};
use rpdk_typescript::{DockerChoice, TypeScriptPlugin, TypeScriptSettings};
use serde_json::json;

fn frontend() -> Frontend {
    let mut builder = Frontend::builder("tool", "test tool");
    builder.register(&TypeScriptPlugin).unwrap();
    builder.build()
}

fn parse(args: &[&str]) -> Result<ParsedConfig, ParseError> {
    frontend().parse_from(std::iter::once("tool").chain(args.iter().copied()))
}

// ── Registration ────────────────────────────────────────────────────

#[test]
fn registers_typescript_subcommand() {
    let mut registry = SubcommandRegistry::new();
    let descriptor = TypeScriptPlugin.register(&mut registry, &[]).unwrap();
    assert_eq!(descriptor.name(), "typescript");
    assert_eq!(descriptor.language(), TypeScriptPlugin.language());
    assert_eq!(
        descriptor.description(),
        "This sub command generates IDE and build files for TypeScript"
    );
    assert_eq!(
        descriptor.flag_names(),
        vec!["--skip-npm-install", "--use-docker", "--no-docker"]
    );
}

#[test]
fn registering_twice_is_duplicate() {
    let mut registry = SubcommandRegistry::new();
    TypeScriptPlugin.register(&mut registry, &[]).unwrap();
    let err = TypeScriptPlugin.register(&mut registry, &[]).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateSubcommand(ref n) if n == "typescript"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn parent_owning_a_plugin_flag_is_collision() {
    let parents = vec![ParentOptionGroup::new("debugging")
        .option(OptionSpec::switch("debug", "debug").short('d'))];
    let mut registry = SubcommandRegistry::new();
    let err = TypeScriptPlugin.register(&mut registry, &parents).unwrap_err();
    match err {
        RegistryError::FlagCollision { flag, owner, .. } => {
            assert_eq!(flag, "--use-docker");
            assert_eq!(owner, "debugging");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(registry.is_empty());
}

#[test]
fn parent_groups_are_left_untouched() {
    let parents = vec![ParentOptionGroup::new("logging")
        .option(OptionSpec::count("verbose", "verbose").short('v'))];
    let before = parents.clone();
    let mut registry = SubcommandRegistry::new();
    TypeScriptPlugin.register(&mut registry, &parents).unwrap();
    assert_eq!(parents, before);
}

// ── Docker choice group ─────────────────────────────────────────────

#[test]
fn neither_docker_flag_defaults_to_false() {
    let config = parse(&["typescript"]).unwrap();
    assert!(!config.get::<bool>("use_docker").unwrap());
    assert_eq!(DockerChoice::from_config(&config), DockerChoice::Unset);
}

#[test]
fn use_docker_alone_is_true() {
    let config = parse(&["typescript", "--use-docker"]).unwrap();
    assert!(config.get::<bool>("use_docker").unwrap());
    assert_eq!(DockerChoice::from_config(&config), DockerChoice::Docker);
}

#[test]
fn short_d_is_use_docker() {
    let config = parse(&["typescript", "-d"]).unwrap();
    assert!(config.get::<bool>("use_docker").unwrap());
}

#[test]
fn no_docker_alone_is_false() {
    let config = parse(&["typescript", "--no-docker"]).unwrap();
    assert!(!config.get::<bool>("use_docker").unwrap());
    assert_eq!(DockerChoice::from_config(&config), DockerChoice::NoDocker);
    assert!(!config.contains_key("no_docker"));
}

#[test]
fn both_docker_flags_conflict() {
    let err = parse(&["typescript", "--use-docker", "--no-docker"]).unwrap_err();
    match &err {
        ParseError::ConflictingFlags { flags } => {
            assert_eq!(flags, &vec!["--use-docker".to_string(), "--no-docker".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("--use-docker"));
    assert!(message.contains("--no-docker"));
}

#[test]
fn conflict_is_independent_of_order() {
    let err = parse(&["typescript", "--no-docker", "-d"]).unwrap_err();
    assert!(matches!(err, ParseError::ConflictingFlags { .. }));
}

// ── skip-npm-install ────────────────────────────────────────────────

#[test]
fn skip_npm_install_defaults_to_false() {
    let config = parse(&["typescript"]).unwrap();
    assert!(!config.get::<bool>("skip_npm_install").unwrap());
}

#[test]
fn skip_npm_install_when_supplied() {
    let config = parse(&["typescript", "--skip-npm-install"]).unwrap();
    assert!(config.get::<bool>("skip_npm_install").unwrap());
}

// ── Whole configurations ────────────────────────────────────────────

#[test]
fn bare_subcommand_scenario() {
    let config = parse(&["typescript"]).unwrap();
    assert_eq!(
        serde_json::to_value(&config).unwrap(),
        json!({"language": "typescript", "use_docker": false, "skip_npm_install": false})
    );
}

#[test]
fn docker_and_skip_scenario() {
    let config = parse(&["typescript", "--use-docker", "--skip-npm-install"]).unwrap();
    assert_eq!(
        serde_json::to_value(&config).unwrap(),
        json!({"language": "typescript", "use_docker": true, "skip_npm_install": true})
    );
}

// ── Typed settings ──────────────────────────────────────────────────

#[test]
fn settings_read_back() {
    let config = parse(&["typescript", "--no-docker", "--skip-npm-install"]).unwrap();
    let settings = TypeScriptSettings::from_config(&config).unwrap();
    assert_eq!(settings.docker, DockerChoice::NoDocker);
    assert!(!settings.use_docker);
    assert!(!settings.runs_npm_install());
    assert_eq!(
        serde_json::to_value(settings).unwrap(),
        json!({"use_docker": false, "skip_npm_install": true})
    );
}

#[test]
fn settings_reject_other_language() {
    let mut config = ParsedConfig::empty();
    config.set("language", "java");
    config.set("use_docker", false);
    config.set("skip_npm_install", false);
    assert!(TypeScriptSettings::from_config(&config).is_err());
}
