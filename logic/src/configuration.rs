use crate::adapter::Adapter;
use crate::configuration::expand_config::expand_configuration_template_expressions;
use crate::configuration::parse_config::parse_configuration_from_kdl;
use crate::types::FilePath;
use docver_base::logging::debug;
use docver_base::result::{Context, DocverResult};
use std::collections::BTreeMap;

pub mod expand_config;
pub mod parse_config;

pub const CONFIGURATION_FILE_NAME: &str = "docver.kdl";

/// Where a CI pipeline may hand over the tag it is building
pub const FALLBACK_TAG_PATH: [&str; 3] = ["extra", "local", "tag"];

/// Externally owned build configuration, a tree of named values
///
/// docver only ever reads [`FALLBACK_TAG_PATH`] from it, everything else is carried along untouched.
#[derive(Debug, Default)]
pub struct BuildConfiguration {
    pub(crate) root: ConfigurationNode,
}

#[derive(Debug, Default)]
pub struct ConfigurationNode {
    pub value: Option<String>,
    pub children: BTreeMap<String, ConfigurationNode>,
}

impl BuildConfiguration {
    pub fn lookup(&self, path: &[&str]) -> Option<&str> {
        let mut node = &self.root;
        for key in path {
            node = node.children.get(*key)?;
        }
        node.value.as_deref()
    }

    pub fn fallback_tag(&self) -> Option<&str> {
        self.lookup(&FALLBACK_TAG_PATH)
    }

    /// All values as `dotted.path = "value"` pairs, in key order
    pub fn flatten(&self) -> Vec<(String, String)> {
        fn visit(node: &ConfigurationNode, prefix: &str, result: &mut Vec<(String, String)>) {
            for (key, child) in &node.children {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                if let Some(value) = &child.value {
                    result.push((path.clone(), value.clone()));
                }
                visit(child, &path, result);
            }
        }
        let mut result = vec![];
        visit(&self.root, "", &mut result);
        result
    }

    pub fn as_test_string(&self) -> String {
        let mut test_string = String::new();
        for (path, value) in self.flatten() {
            test_string.push_str(&format!("{path} = {value:?}\n"));
        }
        test_string
    }
}

/// Loads and expands the configuration file from the base directory; a missing file is an empty configuration
pub fn load_configuration(adapter: &dyn Adapter) -> DocverResult<BuildConfiguration> {
    let config_path = FilePath::from(CONFIGURATION_FILE_NAME);
    if !adapter.file_exists(&config_path)? {
        debug!("No configuration file '{config_path}' found, using empty configuration");
        return Ok(BuildConfiguration::default());
    }
    let config_string = std::io::read_to_string(adapter.read_file(&config_path)?)
        .with_context(|| format!("Failed to read configuration file '{config_path}'"))?;
    let mut configuration = parse_configuration_from_kdl(config_path.as_str(), &config_string)?;
    expand_configuration_template_expressions(&mut configuration, &adapter.env());
    Ok(configuration)
}
