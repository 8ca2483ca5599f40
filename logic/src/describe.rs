use regex::Regex;
use std::sync::LazyLock;

pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

// Anchored at the start only: anything after the eight hash characters is ignored
static TAG_WITH_G_PREFIXED_OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^.+-[0-9]+-g[0-9a-z]{8}").expect("Describe regex could not compile")
});
static TAG_WITH_OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^.+-[0-9]+-[0-9a-z]{8}").expect("Describe regex could not compile")
});

/// Shape of a `git describe --tags` style version string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescribeShape {
    /// Exactly on a tag, or not a describe string at all
    ExactTag,
    /// `<tag>-<commits>-<hash>`, a build made after the tag
    TagWithOffset { has_g_prefix: bool },
}

impl DescribeShape {
    pub fn classify(version: &str) -> Self {
        if TAG_WITH_G_PREFIXED_OFFSET.is_match(version) {
            DescribeShape::TagWithOffset { has_g_prefix: true }
        } else if TAG_WITH_OFFSET.is_match(version) {
            DescribeShape::TagWithOffset {
                has_g_prefix: false,
            }
        } else {
            DescribeShape::ExactTag
        }
    }

    pub fn is_snapshot(&self) -> bool {
        matches!(self, DescribeShape::TagWithOffset { .. })
    }
}

/// Marks post-tag builds as snapshots
///
/// With a `g` prefixed hash the last character is replaced by the suffix, which keeps an
/// eight character hash at the same length as the seven character hash git usually prints.
pub fn normalize_version(version: &str) -> String {
    match DescribeShape::classify(version) {
        DescribeShape::ExactTag => version.to_string(),
        DescribeShape::TagWithOffset { has_g_prefix: true } => {
            let mut chars = version.chars();
            chars.next_back();
            format!("{}{SNAPSHOT_SUFFIX}", chars.as_str())
        }
        DescribeShape::TagWithOffset {
            has_g_prefix: false,
        } => format!("{version}{SNAPSHOT_SUFFIX}"),
    }
}
