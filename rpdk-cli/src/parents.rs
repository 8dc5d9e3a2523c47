//! Option groups defined once here and inherited by every language
//! subcommand.

use rpdk_core::{OptionSpec, ParentOptionGroup};

pub const VERBOSE: &str = "verbose";
pub const TYPE_NAME: &str = "type_name";
pub const FORCE: &str = "force";

pub fn parent_groups() -> Vec<ParentOptionGroup> {
    vec![logging_group(), project_group()]
}

fn logging_group() -> ParentOptionGroup {
    ParentOptionGroup::new("logging").option(
        OptionSpec::count(VERBOSE, "verbose")
            .short('v')
            .help("Increase the output verbosity. Can be specified multiple times."),
    )
}

fn project_group() -> ParentOptionGroup {
    ParentOptionGroup::new("project")
        .option(
            OptionSpec::value(TYPE_NAME, "type-name", "NAME")
                .help("The resource type name, e.g. Organization::Service::Resource."),
        )
        .option(OptionSpec::switch(FORCE, "force").help("Force files to be overwritten."))
}
