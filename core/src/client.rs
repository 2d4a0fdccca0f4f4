// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection collaborator contract.

use crate::observe::ConnectionObserver;
use crate::ConnectError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// State of the network session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionStatus {
    /// No session; a connection can be initiated
    #[default]
    Unconnected,
    /// Handshake in progress
    Connecting,
    /// Session established
    Connected,
}

impl ConnectionStatus {
    /// Whether a new connection attempt may be started
    pub fn can_connect(&self) -> bool {
        matches!(self, ConnectionStatus::Unconnected)
    }
}

/// Where to connect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectParams {
    pub host: String,
    pub port: u16,
}

impl ConnectParams {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for ConnectParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Observable connection owned by the networking side
pub trait ConnectionSource: Send + Sync {
    /// Current status, read fresh on every call
    fn status(&self) -> ConnectionStatus;

    /// Register for status change notifications
    fn subscribe(&self, observer: Arc<dyn ConnectionObserver>);

    /// Start connecting. Returns once the attempt is underway; the outcome
    /// arrives later as a status notification.
    fn connect(&self, params: ConnectParams) -> Result<(), ConnectError>;

    /// Drop the session, if any
    fn disconnect(&self);
}
