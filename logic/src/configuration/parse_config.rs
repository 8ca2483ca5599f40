use crate::configuration::{BuildConfiguration, ConfigurationNode};
use docver_base::logging::info;
use docver_base::result::{Context, DocverError, DocverResult, MietteReportError};
use kdl::{KdlDocument, KdlNode, KdlValue};
use tracing::info_span;

pub fn parse_configuration_from_kdl(
    filename: &str,
    kdl: &str,
) -> DocverResult<BuildConfiguration> {
    info!("Parsing configuration file '{filename}'");
    let _span = info_span!("Parse configuration from KDL", filename).entered();
    let document = match kdl.parse::<KdlDocument>() {
        Ok(document) => document,
        Err(kdl_error) => {
            let report = miette::Report::new(kdl_error);
            return Err(DocverError::new(MietteReportError::from(report)))
                .with_context(|| format!("Failed to parse configuration file '{filename}'"));
        }
    };
    let mut configuration = BuildConfiguration::default();
    merge_nodes(&mut configuration.root, document.nodes());
    Ok(configuration)
}

/// Repeated node names are merged, a later value overrides an earlier one
fn merge_nodes(parent: &mut ConfigurationNode, nodes: &[KdlNode]) {
    for kdl_node in nodes {
        let node = parent
            .children
            .entry(kdl_node.name().value().to_string())
            .or_default();
        if let Some(value) = kdl_node.entry(0).and_then(|entry| scalar(entry.value())) {
            node.value = Some(value);
        }
        if let Some(children) = kdl_node.children() {
            merge_nodes(node, children.nodes());
        }
    }
}

fn scalar(value: &KdlValue) -> Option<String> {
    if let Some(string) = value.as_string() {
        Some(string.to_string())
    } else if let Some(integer) = value.as_integer() {
        Some(integer.to_string())
    } else if let Some(float) = value.as_float() {
        Some(float.to_string())
    } else {
        value.as_bool().map(|flag| flag.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::configuration::CONFIGURATION_FILE_NAME;
    use crate::configuration::parse_config::parse_configuration_from_kdl;
    use docver_base::result::{DocverResult, MietteReportError};
    use expect_test::{Expect, expect};

    fn test_parse(kdl: &str, expected: Expect) -> DocverResult<()> {
        let config = parse_configuration_from_kdl(CONFIGURATION_FILE_NAME, kdl)?;
        expected.assert_eq(&config.as_test_string());
        Ok(())
    }

    macro_rules! test_parse(
        ($name:ident, $kdl:expr, $expected:expr) => {
            #[test]
            fn $name() -> DocverResult<()> {
                test_parse($kdl, $expected)
            }
            });

    test_parse!(empty, "", expect![""]);

    test_parse!(empty_extra, "extra", expect![""]);

    test_parse!(
        fallback_tag,
        r#"extra {
            local {
                tag "v9.9.9"
            }
        }"#,
        expect![[r#"
            extra.local.tag = "v9.9.9"
        "#]]
    );

    test_parse!(
        scalar_types,
        r#"site_name "Chimney"
        extra {
            major 1
            ratio 0.5
            draft #true
            nothing #null
        }"#,
        expect![[r#"
            extra.draft = "true"
            extra.major = "1"
            extra.ratio = "0.5"
            site_name = "Chimney"
        "#]]
    );

    test_parse!(
        repeated_nodes_are_merged,
        r#"extra {
            local {
                tag "v1.0.0"
            }
        }
        extra {
            local {
                tag "v2.0.0"
            }
            version "2"
        }"#,
        expect![[r#"
            extra.local.tag = "v2.0.0"
            extra.version = "2"
        "#]]
    );

    test_parse!(
        value_and_children,
        r#"theme "material" {
            palette "indigo"
        }"#,
        expect![[r#"
            theme = "material"
            theme.palette = "indigo"
        "#]]
    );

    #[test]
    fn fail_misquote() {
        let error = parse_configuration_from_kdl(CONFIGURATION_FILE_NAME, r#""open quote only"#)
            .expect_err("Expected error");
        expect!["Failed to parse configuration file 'docver.kdl'"].assert_eq(&error.to_string());
        assert!(
            error
                .chain()
                .any(|cause| cause.downcast_ref::<MietteReportError>().is_some())
        );
    }
}
