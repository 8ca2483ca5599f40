use crate::adapter::Adapter;
use crate::configuration::CONFIGURATION_FILE_NAME;
use crate::context::VERSION_MACRO_NAME;
use crate::version::get_version;

pub fn print_help(adapter: &dyn Adapter) {
    adapter.print(&format!(
        "📖  docver ({}) - Resolves the version shown in generated documentation\n",
        get_version()
    ));
    let help_text = format!(
        r#"
USAGE:
    docver [OPTIONS]

OPTIONS:
    --help              Show this help message and exit
    --version           Display docver's own version information and exit
    --resolve           Print the resolved documentation version
    --expand FILE...    Expand macros in the given template files and print the result
    --validate          Validate the configuration file
    --expand-config     Display the configuration with all environment references resolved

EXAMPLES:
    # Print the documentation version
    docver --resolve

    # Expand a documentation page
    docver --expand docs/index.md > site/index.md

VERSION RESOLUTION:
    The version is taken from the first of these that yields a value:
      1. 'git describe --tags'
      2. 'extra.local.tag' in the configuration file
      3. the placeholder '{VERSION_MACRO_NAME}'
    Builds after a tag, e.g. 'v1.2.3-4-gabcd1234', are marked with a '-SNAPSHOT' suffix.

TEMPLATES:
    ${{{VERSION_MACRO_NAME}}}    the resolved documentation version
    ${{env:NAME}}           the value of environment variable NAME
    $${{                    a literal '${{'

CONFIGURATION:
    docver looks for a configuration file named '{CONFIGURATION_FILE_NAME}' in the current
    directory and its parents. The file is optional. Example:

        extra {{
            local {{
                tag "${{env:CI_LATEST_TAG}}"
            }}
        }}

LOGGING:
    Set DOCVER_LOG to one of 'error', 'warn', 'info', 'debug' or 'trace' (default 'warn').
"#
    );

    adapter.print(&help_text);
}
