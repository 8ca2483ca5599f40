use docver_base::result::{Context, DocverResult};
use docver_logic::adapter::{Adapter, ExecutionOutput, ExecutionRequest};
use docver_logic::types::{Env, FilePath};
use std::env;
use std::fmt::Debug;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

pub struct RealAdapter {
    base_path: PathBuf,
}

impl RealAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        path.to_path(&self.base_path)
    }
}

impl Adapter for RealAdapter {
    fn args(&self) -> Vec<String> {
        env::args().collect()
    }

    fn env(&self) -> Env {
        env::vars().collect()
    }

    fn print(&self, message: &str) {
        print!("{message}");
        let _ = std::io::stdout().flush();
    }

    fn file_exists(&self, path: &FilePath) -> DocverResult<bool> {
        let physical_path = self.resolve_path(path);
        Ok(physical_path.is_file())
    }

    fn read_file(&self, path: &FilePath) -> DocverResult<Box<dyn Read>> {
        let physical_path = self.resolve_path(path);
        Ok(Box::new(File::open(&physical_path).with_context(|| {
            format!("Failed to read file {physical_path:?}")
        })?))
    }

    fn read_input_file(&self, path: &str) -> DocverResult<Box<dyn Read>> {
        let physical_path = PathBuf::from(path);
        Ok(Box::new(File::open(&physical_path).with_context(|| {
            format!("Failed to read file {physical_path:?}")
        })?))
    }

    fn exit(&self, exit_code: i32) {
        std::process::exit(exit_code);
    }

    fn execute(&self, request: ExecutionRequest) -> DocverResult<ExecutionOutput> {
        let output = Command::new(&request.binary)
            .args(&request.args)
            .current_dir(&self.base_path)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to execute '{}'", request.command_line()))?;
        Ok(ExecutionOutput {
            exit_code: output.status.code().unwrap_or(255),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

impl Debug for RealAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RealAdapter")
    }
}
