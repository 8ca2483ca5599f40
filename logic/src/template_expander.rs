use crate::template_string::{TemplateString, TemplateStringPart};
use crate::types::Env;
use docver_base::result::{Context, DocverError, DocverResult, HelpError};
use std::collections::BTreeMap;

/// Macro namespace used to expand templates
#[derive(Default)]
pub struct TemplateExpander<'a> {
    pub replacer: BTreeMap<String, Box<dyn SubstitutionReplacer + 'a>>,
}

pub trait SubstitutionReplacer {
    fn replace(&self, arguments: &[String]) -> String;
}

impl<T: Fn() -> String> SubstitutionReplacer for T {
    fn replace(&self, _arguments: &[String]) -> String {
        self()
    }
}

/// Replaces `${env:NAME}` with the value of an environment variable, or nothing if it is unset
pub struct EnvReplacer {
    env: Env,
}

impl EnvReplacer {
    pub fn new(env: Env) -> Self {
        Self { env }
    }
}

impl SubstitutionReplacer for EnvReplacer {
    fn replace(&self, arguments: &[String]) -> String {
        let Some(name) = arguments.first() else {
            return String::new();
        };
        self.env
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }
}

impl<'a> TemplateExpander<'a> {
    pub fn add_replacer(
        &mut self,
        key: impl Into<String>,
        replacer: impl SubstitutionReplacer + 'a,
    ) {
        self.replacer.insert(key.into(), Box::new(replacer));
    }

    pub fn macro_names(&self) -> Vec<&str> {
        self.replacer.keys().map(String::as_str).collect()
    }

    pub fn expand(&self, template: TemplateString) -> DocverResult<String> {
        let mut result = String::new();
        for part in template.parts() {
            match part {
                TemplateStringPart::PlainText(text) => {
                    result.push_str(text);
                }
                TemplateStringPart::Substitution(substitution) => {
                    if let Some(replacer) = self.replacer.get(&substitution.directive) {
                        result.push_str(&replacer.replace(&substitution.arguments));
                    } else {
                        let help = HelpError::new(format!(
                            "Known macros are: {}",
                            self.macro_names().join(", ")
                        ));
                        return Err(DocverError::new(help)).with_context(|| {
                            format!("Unknown macro '{}'", substitution.directive)
                        });
                    }
                }
            }
        }
        Ok(result)
    }

    pub fn expand_str(&self, template: &str) -> DocverResult<String> {
        self.expand(TemplateString::try_from(template)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template_string::TemplateString;
    use expect_test::expect;

    #[test]
    fn test_template_expander() {
        let version = "1.0.0".to_string();
        let borrowed_version = &version;
        let mut expander = TemplateExpander::default();
        expander.add_replacer("chimney_version", || borrowed_version.to_string());
        let actual = expander
            .expand(TemplateString::try_from("foo${chimney_version}bar").unwrap())
            .unwrap();
        assert_eq!(actual, "foo1.0.0bar");
    }

    #[test]
    fn test_env_replacer() {
        let mut expander = TemplateExpander::default();
        expander.add_replacer(
            "env",
            EnvReplacer::new(vec![("CI_LATEST_TAG".to_string(), "v1.0.0".to_string())]),
        );
        let actual = expander
            .expand_str("[${env:CI_LATEST_TAG}][${env:UNSET}][${env}]")
            .unwrap();
        assert_eq!(actual, "[v1.0.0][][]");
    }

    #[test]
    fn test_unknown_macro() {
        let mut expander = TemplateExpander::default();
        expander.add_replacer("chimney_version", || "1.0.0".to_string());
        expander.add_replacer("env", EnvReplacer::new(vec![]));
        let error = expander.expand_str("${scala_version}").unwrap_err();
        expect!["Unknown macro 'scala_version'"].assert_eq(&error.to_string());
        let help = error
            .chain()
            .find_map(|cause| cause.downcast_ref::<HelpError>())
            .expect("help error in chain");
        expect!["Known macros are: chimney_version, env"].assert_eq(&help.help_message);
    }
}
