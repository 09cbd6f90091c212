//! Readiness polling for processes that open a listening endpoint.
//!
//! After spawning a long-running process (e.g. a designer in agent mode) a
//! runner needs to know when it accepts connections. [`Poller`] probes the
//! target once per interval until one of three terminal states:
//!
//! - [`PollOutcome::Ready`]: a probe succeeded;
//! - [`PollOutcome::TimedOut`]: the overall deadline elapsed;
//! - [`PollOutcome::Cancelled`]: the caller's [`CancellationToken`] fired.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use v8_args_wait::{wait, CancellationToken, PollOutcome};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
//! let target = listener.local_addr().unwrap().to_string();
//!
//! let outcome = wait(&target, Duration::from_secs(1), &CancellationToken::new()).await;
//! assert!(matches!(outcome, PollOutcome::Ready));
//! # }
//! ```

mod cancel;
mod config;
mod error;
mod poller;
mod probe;

pub use cancel::CancellationToken;
pub use config::{DEFAULT_INTERVAL, DEFAULT_TIMEOUT, WaitConfig};
pub use error::{Result, WaitError};
pub use poller::{PollOutcome, Poller, TimedOut, wait};
pub use probe::{Probe, TcpProbe};
