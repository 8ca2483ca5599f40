use crate::types::{Env, FilePath};
use docver_base::result::DocverResult;
use std::fmt::Debug;
use std::io::Read;
use std::rc::Rc;

/// Boundary between docver's logic and the outside world
///
/// Every side effect (arguments, environment, files, processes, output) goes through this trait,
/// so that the logic can be exercised against a mock in tests.
pub trait Adapter: Debug + 'static {
    fn args(&self) -> Vec<String>;
    fn env(&self) -> Env;
    fn print(&self, message: &str);
    fn file_exists(&self, path: &FilePath) -> DocverResult<bool>;
    fn read_file(&self, path: &FilePath) -> DocverResult<Box<dyn Read>>;
    /// Reads a file named on the command line, relative paths start at the working directory
    fn read_input_file(&self, path: &str) -> DocverResult<Box<dyn Read>>;
    fn exit(&self, exit_code: i32);
    /// Runs a process in the base directory and captures its standard output
    fn execute(&self, request: ExecutionRequest) -> DocverResult<ExecutionOutput>;
}

pub type AdapterBox = Rc<dyn Adapter>;

#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub binary: String,
    pub args: Vec<String>,
}

impl ExecutionRequest {
    pub fn new(binary: impl Into<String>, args: &[&str]) -> Self {
        Self {
            binary: binary.into(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    pub fn command_line(&self) -> String {
        let mut command_line = self.binary.clone();
        for arg in &self.args {
            command_line.push(' ');
            command_line.push_str(arg);
        }
        command_line
    }
}

#[derive(Debug, Clone)]
pub struct ExecutionOutput {
    pub exit_code: i32,
    pub stdout: String,
}

impl ExecutionOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
