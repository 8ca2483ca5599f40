use docver_base::result::{DocverError, DocverResult, bail};

/// Text with embedded `${directive}` or `${directive:arg1,arg2}` substitutions
#[derive(Debug, Default)]
pub struct TemplateString {
    pub parts: Vec<TemplateStringPart>,
}

impl TemplateString {
    pub fn parts(&self) -> &Vec<TemplateStringPart> {
        &self.parts
    }
}

#[derive(Debug)]
pub enum TemplateStringPart {
    PlainText(String),
    Substitution(TemplateStringSubstitution),
}

impl TemplateStringPart {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText(text.into())
    }

    pub fn substitution(directive: impl Into<String>, arguments: Vec<String>) -> Self {
        Self::Substitution(TemplateStringSubstitution {
            directive: directive.into(),
            arguments,
        })
    }
}

#[derive(Debug)]
pub struct TemplateStringSubstitution {
    pub directive: String,
    pub arguments: Vec<String>,
}

impl TemplateString {
    pub fn as_test_string(&self) -> String {
        use std::fmt::Write;
        let mut test_string = String::new();
        for part in &self.parts {
            match part {
                TemplateStringPart::PlainText(text) => {
                    writeln!(test_string, "Plain '{text}'").unwrap();
                }
                TemplateStringPart::Substitution(substitution) => {
                    writeln!(test_string, "Directive '{}'", substitution.directive).unwrap();
                    for argument in &substitution.arguments {
                        writeln!(test_string, "\tArgument '{argument}'").unwrap();
                    }
                }
            }
        }
        test_string
    }
}

impl TryFrom<&str> for TemplateString {
    type Error = DocverError;
    fn try_from(value: &str) -> DocverResult<Self> {
        let mut parts = vec![];
        let mut plain = String::new();
        let mut rest = value;
        let mut offset = 0;
        while let Some(start) = rest.find("${") {
            if rest[..start].ends_with('$') {
                // "$${" is a literal "${"
                plain.push_str(&rest[..start - 1]);
                plain.push_str("${");
                rest = &rest[start + 2..];
                offset += start + 2;
                continue;
            }
            plain.push_str(&rest[..start]);
            let body_start = start + 2;
            let Some(body_length) = rest[body_start..].find('}') else {
                bail!(
                    "Unterminated substitution starting at offset {}",
                    offset + start
                );
            };
            let substitution_string = &rest[body_start..body_start + body_length];
            let (directive, arguments) = match substitution_string.split_once(':') {
                Some((directive, arguments)) => (
                    directive.trim(),
                    arguments
                        .split(',')
                        .map(|argument| argument.trim().to_string())
                        .collect(),
                ),
                None => (substitution_string.trim(), vec![]),
            };
            if directive.is_empty() {
                bail!("Empty substitution at offset {}", offset + start);
            }
            if !plain.is_empty() {
                parts.push(TemplateStringPart::plain(std::mem::take(&mut plain)));
            }
            parts.push(TemplateStringPart::substitution(directive, arguments));
            let consumed = body_start + body_length + 1;
            rest = &rest[consumed..];
            offset += consumed;
        }
        plain.push_str(rest);
        if !plain.is_empty() {
            parts.push(TemplateStringPart::plain(plain));
        }
        Ok(Self { parts })
    }
}
