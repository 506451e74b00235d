// src/exec/command.rs

use std::fmt;

/// One invocation of the external tool, e.g. `["up", "-d"]`.
///
/// The argument list is fixed at construction. `Display` joins the arguments
/// with single spaces, which is the form used in error messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComposeCommand {
    args: Vec<String>,
}

impl ComposeCommand {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The first argument, i.e. the subcommand name.
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

impl fmt::Display for ComposeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args.join(" "))
    }
}

impl<const N: usize> From<[&str; N]> for ComposeCommand {
    fn from(args: [&str; N]) -> Self {
        Self::new(args)
    }
}
