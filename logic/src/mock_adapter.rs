use crate::adapter::{Adapter, ExecutionOutput, ExecutionRequest};
use crate::configuration::CONFIGURATION_FILE_NAME;
use crate::types::{Env, FilePath};
use docver_base::result::{DocverResult, bail};
use expect_test::Expect;
use indent::indent_all_with;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone)]
pub struct MockAdapter {
    inner: Arc<RwLock<MockAdapterInner>>,
}

struct MockAdapterInner {
    files: BTreeMap<String, String>,
    args: Vec<String>,
    env: Env,
    effects_string: String,
    describe_result: MockDescribeResult,
}

#[derive(Clone)]
pub enum MockDescribeResult {
    Output(String),
    ExitCode(i32),
    SpawnFailure(String),
}

impl MockAdapter {
    pub fn new() -> Self {
        let mut files = BTreeMap::new();
        files.insert(
            CONFIGURATION_FILE_NAME.to_string(),
            r#"
                site_name "Chimney"
                extra {
                    local {
                        tag "${env:CI_LATEST_TAG}"
                    }
                }
            "#
            .to_string(),
        );
        Self {
            inner: Arc::new(RwLock::new(MockAdapterInner {
                files,
                env: vec![("NO_COLOR".to_string(), "1".to_string())],
                args: Vec::new(),
                effects_string: String::new(),
                describe_result: MockDescribeResult::Output("v1.2.3\n".to_string()),
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, MockAdapterInner> {
        self.inner
            .read()
            .expect("Unable to acquire read lock for mock adapter")
    }

    fn write(&self) -> RwLockWriteGuard<'_, MockAdapterInner> {
        self.inner
            .write()
            .expect("Unable to acquire write lock for mock adapter")
    }

    fn log_effect(&self, effect: impl AsRef<str>) {
        let mut inner = self.write();
        inner.effects_string.push_str(effect.as_ref());
        inner.effects_string.push('\n');
    }

    pub fn set_args(&self, args: &[&str]) {
        let mut all_args = vec!["./docver".to_string()];
        all_args.extend(args.iter().map(|s| s.to_string()));
        self.write().args = all_args;
    }

    pub fn set_env(&self, key: &str, value: &str) {
        self.write().env.push((key.to_string(), value.to_string()));
    }

    pub fn set_file(&self, path: &str, content: impl Into<String>) {
        self.write().files.insert(path.to_string(), content.into());
    }

    pub fn set_configuration(&self, configuration: impl Into<String>) {
        self.set_file(CONFIGURATION_FILE_NAME, configuration);
    }

    pub fn remove_configuration(&self) {
        self.write().files.remove(CONFIGURATION_FILE_NAME);
    }

    pub fn set_describe_result(&self, describe_result: MockDescribeResult) {
        self.write().describe_result = describe_result;
    }

    pub fn set_describe_output(&self, output: &str) {
        self.set_describe_result(MockDescribeResult::Output(output.to_string()));
    }

    pub fn verify_effects(&self, expected: Expect) {
        expected.assert_eq(&self.read().effects_string);
    }

    pub fn get_effects(&self) -> String {
        self.read().effects_string.clone()
    }
}

impl Adapter for MockAdapter {
    fn args(&self) -> Vec<String> {
        self.read().args.clone()
    }

    fn env(&self) -> Env {
        self.read().env.clone()
    }

    fn print(&self, message: &str) {
        self.log_effect(format!("PRINT:\n{}", indent_all_with("\t", message)));
    }

    fn file_exists(&self, path: &FilePath) -> DocverResult<bool> {
        Ok(self.read().files.contains_key(path.as_str()))
    }

    fn read_file(&self, path: &FilePath) -> DocverResult<Box<dyn Read>> {
        self.log_effect(format!("READ FILE: {path}"));
        let Some(content) = self.read().files.get(path.as_str()).cloned() else {
            bail!("No such file: '{path}'");
        };
        Ok(Box::new(Cursor::new(content)))
    }

    fn read_input_file(&self, path: &str) -> DocverResult<Box<dyn Read>> {
        self.log_effect(format!("READ INPUT FILE: {path}"));
        let Some(content) = self.read().files.get(path).cloned() else {
            bail!("No such file: '{path}'");
        };
        Ok(Box::new(Cursor::new(content)))
    }

    fn exit(&self, exit_code: i32) {
        self.log_effect(format!("EXIT: {exit_code}"));
    }

    fn execute(&self, request: ExecutionRequest) -> DocverResult<ExecutionOutput> {
        self.log_effect(format!("EXECUTE: {}", request.command_line()));
        let describe_result = self.read().describe_result.clone();
        match describe_result {
            MockDescribeResult::Output(stdout) => Ok(ExecutionOutput {
                exit_code: 0,
                stdout,
            }),
            MockDescribeResult::ExitCode(exit_code) => Ok(ExecutionOutput {
                exit_code,
                stdout: String::new(),
            }),
            MockDescribeResult::SpawnFailure(message) => bail!("{message}"),
        }
    }
}

impl std::fmt::Debug for MockAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockAdapter")
    }
}
