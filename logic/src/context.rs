use crate::adapter::Adapter;
use crate::configuration::BuildConfiguration;
use crate::resolver::{ResolvedVersion, VersionSource, resolve_version};
use crate::template_expander::{EnvReplacer, TemplateExpander};
use crate::types::Env;

/// Name under which templates reach the version, i.e. `${chimney_version}`
pub const VERSION_MACRO_NAME: &str = "chimney_version";

/// State of one documentation build
///
/// The version is resolved once on creation and only read afterwards.
#[derive(Debug)]
pub struct DocumentationContext {
    resolved_version: ResolvedVersion,
    env: Env,
}

impl DocumentationContext {
    pub fn initialize(adapter: &dyn Adapter, configuration: &BuildConfiguration) -> Self {
        Self {
            resolved_version: resolve_version(adapter, configuration),
            env: adapter.env(),
        }
    }

    pub fn version(&self) -> &str {
        &self.resolved_version.version
    }

    pub fn version_source(&self) -> VersionSource {
        self.resolved_version.source
    }

    pub fn register_macros<'a>(&'a self, expander: &mut TemplateExpander<'a>) {
        let version = self.version();
        expander.add_replacer(VERSION_MACRO_NAME, move || version.to_string());
        expander.add_replacer("env", EnvReplacer::new(self.env.clone()));
    }

    pub fn template_expander(&self) -> TemplateExpander<'_> {
        let mut expander = TemplateExpander::default();
        self.register_macros(&mut expander);
        expander
    }
}
