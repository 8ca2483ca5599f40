use crate::adapter::{Adapter, ExecutionRequest};
use crate::configuration::BuildConfiguration;
use crate::describe::{DescribeShape, normalize_version};
use docver_base::logging::{debug, info};
use std::fmt::Display;

/// Shown when neither source control nor configuration know the version
pub const PLACEHOLDER_VERSION: &str = "chimney_version";

pub const DESCRIBE_BINARY: &str = "git";
pub const DESCRIBE_ARGS: [&str; 2] = ["describe", "--tags"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    SourceControl,
    Configuration,
    Placeholder,
}

impl Display for VersionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            VersionSource::SourceControl => "source control",
            VersionSource::Configuration => "configuration",
            VersionSource::Placeholder => "placeholder",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: String,
    pub source: VersionSource,
}

/// Resolves the documentation version, first non-empty source wins
///
/// Never fails: every unavailable source falls through to the next one, down to [`PLACEHOLDER_VERSION`].
pub fn resolve_version(
    adapter: &dyn Adapter,
    configuration: &BuildConfiguration,
) -> ResolvedVersion {
    let (raw_version, source) = describe_from_source_control(adapter)
        .map(|version| (version, VersionSource::SourceControl))
        .or_else(|| {
            tag_from_configuration(configuration)
                .map(|version| (version, VersionSource::Configuration))
        })
        .unwrap_or_else(|| (PLACEHOLDER_VERSION.to_string(), VersionSource::Placeholder));
    if DescribeShape::classify(&raw_version).is_snapshot() {
        debug!("'{raw_version}' is a build after its tag, marking it as snapshot");
    }
    let version = normalize_version(&raw_version);
    info!("Resolved documentation version '{version}' from {source}");
    ResolvedVersion { version, source }
}

pub fn describe_from_source_control(adapter: &dyn Adapter) -> Option<String> {
    let request = ExecutionRequest::new(DESCRIBE_BINARY, &DESCRIBE_ARGS);
    let command_line = request.command_line();
    let output = match adapter.execute(request) {
        Ok(output) => output,
        Err(err) => {
            debug!("Could not run '{command_line}': {err:#}");
            return None;
        }
    };
    if !output.success() {
        debug!(
            "'{command_line}' failed with exit code {}",
            output.exit_code
        );
        return None;
    }
    non_empty(output.stdout.replace('\n', "").trim())
}

pub fn tag_from_configuration(configuration: &BuildConfiguration) -> Option<String> {
    let tag = configuration.fallback_tag();
    if tag.is_none() {
        debug!("No fallback tag configured");
    }
    tag.and_then(non_empty)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
