//! Command contract and the invocation line built from it.

use std::fmt;

use serde::Serialize;

use crate::CheckError;

/// Uniform contract of every invokable option record.
///
/// `check` must be a pure function of the record's fields; `values` never
/// fails and leaves out fields `check` would have reported.
pub trait Command {
    /// External command name (e.g. `DESIGNER`).
    fn command(&self) -> &str;

    /// Validates the record, reporting every violated rule at once.
    fn check(&self) -> Result<(), CheckError>;

    /// Rendered argument tokens.
    fn values(&self) -> Vec<String>;
}

impl<C: Command + ?Sized> Command for &C {
    fn command(&self) -> &str {
        (**self).command()
    }

    fn check(&self) -> Result<(), CheckError> {
        (**self).check()
    }

    fn values(&self) -> Vec<String> {
        (**self).values()
    }
}

impl<C: Command + ?Sized> Command for Box<C> {
    fn command(&self) -> &str {
        (**self).command()
    }

    fn check(&self) -> Result<(), CheckError> {
        (**self).check()
    }

    fn values(&self) -> Vec<String> {
        (**self).values()
    }
}

/// A checked command ready to hand to a process runner.
///
/// The connection tokens (which infobase or data store the process works
/// against) come from the caller and are placed between the command name
/// and the rendered values.
///
/// # Examples
///
/// ```
/// use v8_args_core::{CheckError, Command, Invocation};
///
/// struct ClearCache;
///
/// impl Command for ClearCache {
///     fn command(&self) -> &str { "DESIGNER" }
///     fn check(&self) -> Result<(), CheckError> { Ok(()) }
///     fn values(&self) -> Vec<String> { vec!["/ConfigurationRepositoryClearCache".into()] }
/// }
///
/// let line = Invocation::new(&ClearCache).unwrap().with_connection(["/F ./ib"]);
/// assert_eq!(line.to_string(), "DESIGNER /F ./ib /ConfigurationRepositoryClearCache");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    command: String,
    connection: Vec<String>,
    values: Vec<String>,
}

impl Invocation {
    /// Checks `command` and captures its rendered tokens.
    ///
    /// # Errors
    ///
    /// Returns the aggregated [`CheckError`] when any rule fails; nothing is
    /// rendered in that case.
    pub fn new(command: &dyn Command) -> Result<Self, CheckError> {
        command.check()?;
        Ok(Self {
            command: command.command().to_string(),
            connection: Vec::new(),
            values: command.values(),
        })
    }

    /// Sets the connection tokens rendered right after the command name.
    pub fn with_connection<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.connection = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Arguments after the command name: connection first, then values.
    pub fn args(&self) -> Vec<String> {
        self.connection
            .iter()
            .chain(&self.values)
            .cloned()
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command)?;
        for token in self.connection.iter().chain(&self.values) {
            write!(f, " {token}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Checker, Violation};

    struct Agent {
        host_key_auto: bool,
        host_key: String,
    }

    impl Command for Agent {
        fn command(&self) -> &str {
            "DESIGNER"
        }

        fn check(&self) -> Result<(), CheckError> {
            let mut checker = Checker::new();
            checker.ensure(self.host_key_auto || !self.host_key.is_empty(), || {
                Violation::check("ssh host key must be set")
            });
            checker.finish()
        }

        fn values(&self) -> Vec<String> {
            let mut out = vec!["/AgentMode".to_string()];
            if self.host_key_auto {
                out.push("/AgentSSHHostKeyAuto".to_string());
            }
            out
        }
    }

    #[test]
    fn test_invocation_refuses_failed_check() {
        let agent = Agent {
            host_key_auto: false,
            host_key: String::new(),
        };
        let err = Invocation::new(&agent).unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn test_invocation_line() {
        let agent = Agent {
            host_key_auto: true,
            host_key: String::new(),
        };
        let line = Invocation::new(&agent)
            .unwrap()
            .with_connection(["/F", "./ib"]);
        assert_eq!(line.command(), "DESIGNER");
        assert_eq!(line.args(), ["/F", "./ib", "/AgentMode", "/AgentSSHHostKeyAuto"]);
        assert_eq!(line.to_string(), "DESIGNER /F ./ib /AgentMode /AgentSSHHostKeyAuto");
    }

    #[test]
    fn test_boxed_command_delegates() {
        let boxed: Box<dyn Command> = Box::new(Agent {
            host_key_auto: true,
            host_key: String::new(),
        });
        assert_eq!(boxed.command(), "DESIGNER");
        assert!(boxed.check().is_ok());
        assert_eq!(boxed.values(), ["/AgentMode", "/AgentSSHHostKeyAuto"]);
    }
}
