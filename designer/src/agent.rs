//! Designer agent mode (`/AgentMode`).

use std::net::{IpAddr, SocketAddr};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use v8_args_core::{
    CheckError, Checker, Command, FieldDescriptor, OptionRecord, Schema, Value, Violation,
};
use v8_args_wait::{CancellationToken, Poller, WaitConfig};

use crate::{DEFAULT_AGENT_PORT, DESIGNER};

/// Address the agent listens on when `/AgentListenAddress` is not given.
const DEFAULT_AGENT_ADDRESS: &str = "127.0.0.1";

/// Starts the designer as an SSH/SFTP agent.
///
/// With `/AgentMode` present the designer ignores `/DisableStartupDialogs`
/// and `/DisableStartupMessages`, so this record does not embed
/// [`Designer`](crate::Designer). Either `ssh_host_key_auto` or an
/// `ssh_host_key` path must be set.
///
/// # Examples
///
/// ```
/// use v8_args_core::Command;
/// use v8_args_designer::AgentModeOptions;
///
/// let agent = AgentModeOptions::new()
///     .with_listen_address("127.0.0.1:1600")
///     .with_base_dir("./agent");
///
/// assert!(agent.check().is_ok());
/// assert_eq!(agent.endpoint(), "127.0.0.1:1600");
/// assert_eq!(
///     agent.values(),
///     [
///         "/AgentMode",
///         "/AgentBaseDir ./agent",
///         "/AgentPort 1600",
///         "/AgentListenAddress 127.0.0.1",
///         "/AgentSSHHostKeyAuto",
///     ],
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentModeOptions {
    /// Working directory of the SFTP server and of load/dump commands.
    pub base_dir: String,
    /// SSH port; the designer uses [`DEFAULT_AGENT_PORT`] when unset.
    pub port: Option<u16>,
    /// IP address to listen on; the designer uses `127.0.0.1` when empty.
    pub listen_address: String,
    /// Use (or generate) the host key at its default location.
    pub ssh_host_key_auto: bool,
    /// Path to the host private key.
    pub ssh_host_key: String,
    pub visible: bool,
    #[serde(skip)]
    listen_address_error: Option<String>,
}

impl AgentModeOptions {
    /// Agent with an automatically managed host key.
    pub fn new() -> Self {
        Self {
            ssh_host_key_auto: true,
            ..Self::default()
        }
    }

    pub fn with_base_dir(mut self, dir: impl Into<String>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets listen address and port from `host:port` (`[v6]:port` for IPv6).
    ///
    /// An address that cannot be split leaves the current address and port
    /// in place and is reported by [`check`](Command::check).
    pub fn with_listen_address(mut self, host_port: &str) -> Self {
        match split_host_port(host_port) {
            Ok((host, port)) => {
                self.listen_address = host;
                self.port = Some(port);
                self.listen_address_error = None;
            }
            Err(reason) => {
                warn!(address = host_port, %reason, "ignoring agent listen address");
                self.listen_address_error = Some(reason);
            }
        }
        self
    }

    pub fn with_ssh_host_key(mut self, path: impl Into<String>) -> Self {
        self.ssh_host_key = path.into();
        self.ssh_host_key_auto = false;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// `host:port` the agent will accept connections on.
    pub fn endpoint(&self) -> String {
        let host = if self.listen_address.is_empty() {
            DEFAULT_AGENT_ADDRESS
        } else {
            self.listen_address.as_str()
        };
        let port = self.port.unwrap_or(DEFAULT_AGENT_PORT);
        if host.contains(':') {
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        }
    }

    /// Waits with the default poller timing until the agent accepts
    /// connections.
    ///
    /// # Errors
    ///
    /// [`WaitError::TimedOut`](v8_args_wait::WaitError::TimedOut) or
    /// [`WaitError::Cancelled`](v8_args_wait::WaitError::Cancelled).
    pub async fn wait(&self, cancel: &CancellationToken) -> v8_args_wait::Result<()> {
        self.wait_with(&WaitConfig::default(), cancel).await
    }

    /// Like [`wait`](Self::wait), with explicit poller timing.
    pub async fn wait_with(
        &self,
        config: &WaitConfig,
        cancel: &CancellationToken,
    ) -> v8_args_wait::Result<()> {
        let endpoint = self.endpoint();
        info!(%endpoint, timeout = ?config.timeout(), "waiting for designer agent");
        Poller::new(endpoint)
            .with_config(config)
            .wait_ready(cancel)
            .await
    }
}

fn split_host_port(host_port: &str) -> Result<(String, u16), String> {
    if let Ok(addr) = host_port.parse::<SocketAddr>() {
        return Ok((addr.ip().to_string(), addr.port()));
    }
    let (host, port) = host_port
        .rsplit_once(':')
        .ok_or_else(|| format!("missing port in address {host_port:?}"))?;
    if host.contains(':') {
        return Err(format!("too many colons in address {host_port:?}"));
    }
    let port = port
        .parse::<u16>()
        .map_err(|err| format!("invalid port in address {host_port:?}: {err}"))?;
    Ok((host.to_string(), port))
}

/// Rejects anything but a bare IP address or host name.
fn check_listen_host(host: &str) -> Result<(), String> {
    if host.parse::<IpAddr>().is_ok() {
        return Ok(());
    }
    if host.contains(':') {
        return Err(format!("{host:?} carries a port; set it with port"));
    }
    if host.contains(|c: char| c.is_whitespace() || c == '[' || c == ']' || c == '/') {
        return Err(format!("{host:?} is not an IP address or host name"));
    }
    Ok(())
}

impl OptionRecord for AgentModeOptions {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<AgentModeOptions>> = LazyLock::new(|| {
            Schema::<AgentModeOptions>::builder()
                .marker("/AgentMode")
                .field(FieldDescriptor::scalar("base_dir", "/AgentBaseDir").optional(), |o| {
                    Value::from(&o.base_dir)
                })
                .field(FieldDescriptor::scalar("port", "/AgentPort").optional(), |o| {
                    o.port.into()
                })
                .field(
                    FieldDescriptor::scalar("listen_address", "/AgentListenAddress").optional(),
                    |o| Value::from(&o.listen_address),
                )
                .field(
                    FieldDescriptor::presence("ssh_host_key_auto", "/AgentSSHHostKeyAuto"),
                    |o| o.ssh_host_key_auto.into(),
                )
                .field(
                    FieldDescriptor::scalar("ssh_host_key", "/AgentSSHHostKey").optional(),
                    |o| Value::from(&o.ssh_host_key),
                )
                .field(FieldDescriptor::presence("visible", "/Visible"), |o| {
                    o.visible.into()
                })
                .build()
        });
        &SCHEMA
    }
}

impl Command for AgentModeOptions {
    fn command(&self) -> &str {
        DESIGNER
    }

    fn check(&self) -> Result<(), CheckError> {
        let mut checker = Checker::for_record(self);
        checker.ensure(self.ssh_host_key_auto || !self.ssh_host_key.is_empty(), || {
            Violation::check("ssh host key must be set")
                .with_context("msg", "field ssh_host_key_auto or ssh_host_key not set")
        });
        if let Some(reason) = &self.listen_address_error {
            checker.push(
                Violation::check("listen address must be host:port")
                    .with_context("listen_address", reason.as_str()),
            );
        }
        if !self.listen_address.is_empty() {
            if let Err(reason) = check_listen_host(&self.listen_address) {
                checker.push(
                    Violation::check("listen address must be an IP address or host name")
                        .with_context("listen_address", reason),
                );
            }
        }
        checker.finish()
    }

    fn values(&self) -> Vec<String> {
        v8_args_core::values(self)
    }
}
