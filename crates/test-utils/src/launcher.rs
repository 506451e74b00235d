use std::collections::HashMap;
use std::process::Stdio;
use std::sync::{Arc, Mutex};

use compose_harness::errors::Result;
use compose_harness::exec::{ComposeCommand, ProcessLauncher};
use tokio::process::{Child, Command};

/// A launcher that runs `sh -c <script>` instead of the compose tool.
///
/// Scripts are looked up by the full command text (`"ps web"`), then by the
/// subcommand (`"ps"`), then the fallback script (`true` by default). Every
/// launched command is recorded in order.
pub struct ShellLauncher {
    tool: String,
    scripts: HashMap<String, String>,
    fallback: String,
    launched: Arc<Mutex<Vec<String>>>,
}

impl ShellLauncher {
    pub fn new() -> Self {
        Self {
            tool: "docker-compose".to_string(),
            scripts: HashMap::new(),
            fallback: "true".to_string(),
            launched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn tool(mut self, name: &str) -> Self {
        self.tool = name.to_string();
        self
    }

    pub fn on(mut self, command: &str, script: &str) -> Self {
        self.scripts.insert(command.to_string(), script.to_string());
        self
    }

    pub fn otherwise(mut self, script: &str) -> Self {
        self.fallback = script.to_string();
        self
    }

    /// Shared log of launched commands, as `Display`ed.
    pub fn launched(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.launched)
    }

    fn script_for(&self, command: &ComposeCommand) -> &str {
        self.scripts
            .get(&command.to_string())
            .or_else(|| command.subcommand().and_then(|s| self.scripts.get(s)))
            .unwrap_or(&self.fallback)
    }
}

impl Default for ShellLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLauncher for ShellLauncher {
    fn tool_name(&self) -> &str {
        &self.tool
    }

    fn launch(&self, command: &ComposeCommand) -> Result<Child> {
        self.launched.lock().unwrap().push(command.to_string());

        let child = Command::new("sh")
            .arg("-c")
            .arg(self.script_for(command))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        Ok(child)
    }
}
