use op2aws_core::{CommandArguments, Error, Result};
#[cfg(test)]
use std::collections::HashMap;
use std::process::Output;

/// Trait for executing external commands
/// This abstraction allows for testing without mocking by providing
/// different implementations for production and test environments
pub trait CommandExecutor {
    /// Execute a command with the given arguments and capture its output.
    /// Only a failure to spawn is an error; a non-zero exit is reported
    /// through the returned status.
    fn execute(&self, cmd: &str, args: &CommandArguments) -> Result<Output>;
}

/// Production implementation that executes real commands
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn execute(&self, cmd: &str, args: &CommandArguments) -> Result<Output> {
        match std::process::Command::new(cmd)
            .args(args.as_slice())
            .output()
        {
            Ok(output) => Ok(output),
            Err(e) => Err(Error::command_execution(
                cmd,
                args.clone().into_inner(),
                format!("failed to execute command: {e}"),
                None,
            )),
        }
    }
}

/// Test implementation that simulates command execution
/// This provides deterministic behavior for testing
#[cfg(test)]
pub struct TestCommandExecutor {
    responses: std::sync::Mutex<HashMap<String, TestResponse>>,
    calls: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
#[derive(Clone)]
pub struct TestResponse {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub status_code: i32,
}

#[cfg(test)]
impl TestCommandExecutor {
    pub fn new() -> Self {
        Self {
            responses: std::sync::Mutex::new(HashMap::new()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn key(cmd: &str, args: &[String]) -> String {
        format!("{} {}", cmd, args.join(" "))
    }

    pub fn add_response(&self, cmd: &str, args: &[&str], response: TestResponse) {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut responses = self.responses.lock().unwrap();
        responses.insert(Self::key(cmd, &args), response);
    }

    pub fn add_simple_response(&self, cmd: &str, args: &[&str], stdout: &str) {
        self.add_response(
            cmd,
            args,
            TestResponse {
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
                status_code: 0,
            },
        );
    }

    pub fn add_error_response(&self, cmd: &str, args: &[&str], stderr: &str) {
        self.add_response(
            cmd,
            args,
            TestResponse {
                stdout: Vec::new(),
                stderr: stderr.as_bytes().to_vec(),
                status_code: 1,
            },
        );
    }

    /// Command lines received so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl CommandExecutor for TestCommandExecutor {
    fn execute(&self, cmd: &str, args: &CommandArguments) -> Result<Output> {
        let key = Self::key(cmd, args.as_slice());
        self.calls.lock().unwrap().push(key.clone());
        let responses = self.responses.lock().unwrap();

        match responses.get(&key) {
            Some(response) => Ok(Output {
                status: exit_status::from_code(response.status_code),
                stdout: response.stdout.clone(),
                stderr: response.stderr.clone(),
            }),
            None => Err(Error::command_execution(
                cmd,
                args.clone().into_inner(),
                "no test response configured",
                None,
            )),
        }
    }
}
