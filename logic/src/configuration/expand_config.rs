use crate::configuration::{BuildConfiguration, ConfigurationNode};
use crate::types::Env;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static ENV_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{\s*env\s*:\s*([^}]*?)\s*\}").expect("Env reference regex could not compile")
});

/// Expands `${env:NAME}` references in every configuration value
///
/// Any other `${...}` text belongs to whoever owns that value and is kept as is.
pub fn expand_configuration_template_expressions(
    configuration: &mut BuildConfiguration,
    env: &Env,
) {
    expand_node(&mut configuration.root, env);
}

fn expand_node(node: &mut ConfigurationNode, env: &Env) {
    for child in node.children.values_mut() {
        if let Some(value) = &mut child.value {
            *value = expand_env_references(value, env);
        }
        expand_node(child, env);
    }
}

fn expand_env_references(value: &str, env: &Env) -> String {
    ENV_REFERENCE
        .replace_all(value, |captures: &Captures| {
            let name = &captures[1];
            env.iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
                .unwrap_or_default()
        })
        .into_owned()
}
