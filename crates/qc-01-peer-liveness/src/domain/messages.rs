//! Hello protocol messages.
//!
//! Wire protocol `/alive/0.2`: a caller sends `AliveStatus`, the callee
//! answers `AliveStatusResp`. Bump the version suffix on any
//! wire-incompatible change to these types.

use std::fmt;

use bincode::Options;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::domain::{LivenessError, NodeId};

/// Protocol identifier the transport multiplexes Hello messages under.
pub const PROTOCOL_ID: &str = "/alive/0.2";

/// Upper bound on an encoded Hello message.
pub const MAX_MESSAGE_SIZE: u64 = 4 * 1024;

/// Status a node reports about itself in a Hello.
///
/// Extensible record; fields are informational and drive no decisions in
/// this subsystem beyond logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliveStatus {
    /// Software version of the sender
    pub node_version: String,
    /// Seconds the sender has been running
    pub uptime_secs: u64,
    /// Free-form note ("ok", "syncing", ...)
    pub note: String,
}

impl AliveStatus {
    /// Status carrying only a note.
    pub fn with_note(note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            ..Self::default()
        }
    }
}

impl fmt::Display for AliveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (version={}, uptime={}s)",
            self.note, self.node_version, self.uptime_secs
        )
    }
}

/// Acknowledgement of a Hello.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliveStatusResp {
    pub success: bool,
}

impl AliveStatusResp {
    pub fn ok() -> Self {
        Self { success: true }
    }

    pub fn failed() -> Self {
        Self { success: false }
    }
}

/// What the transport knows about an inbound call.
///
/// Built by the transport adapter. `caller` is `None` when the adapter
/// could not authenticate the remote end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Protocol the request arrived under
    pub protocol: String,
    /// Authenticated caller identity
    pub caller: Option<NodeId>,
}

impl RequestContext {
    /// Context for an authenticated Hello from `caller`.
    pub fn hello_from(caller: NodeId) -> Self {
        Self {
            protocol: PROTOCOL_ID.to_string(),
            caller: Some(caller),
        }
    }
}

/// Typed Hello request with the caller as a first-class field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelloEnvelope {
    pub caller: NodeId,
    pub status: AliveStatus,
}

impl HelloEnvelope {
    pub fn new(caller: NodeId, status: AliveStatus) -> Self {
        Self { caller, status }
    }

    /// Build an envelope from a transport context.
    ///
    /// # Errors
    ///
    /// `InvalidContext` if the context belongs to another protocol or does
    /// not carry a caller identity.
    pub fn from_context(ctx: RequestContext, status: AliveStatus) -> Result<Self, LivenessError> {
        if ctx.protocol != PROTOCOL_ID {
            return Err(LivenessError::invalid_context(format!(
                "unexpected protocol {:?}, expected {:?}",
                ctx.protocol, PROTOCOL_ID
            )));
        }
        let caller = ctx
            .caller
            .ok_or_else(|| LivenessError::invalid_context("missing caller identity"))?;
        Ok(Self { caller, status })
    }
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new().with_limit(MAX_MESSAGE_SIZE)
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, LivenessError> {
    codec()
        .serialize(value)
        .map_err(|e| LivenessError::Codec(e.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, LivenessError> {
    codec()
        .deserialize(bytes)
        .map_err(|e| LivenessError::Codec(e.to_string()))
}

/// Encode a Hello request body.
pub fn encode_status(status: &AliveStatus) -> Result<Vec<u8>, LivenessError> {
    encode(status)
}

/// Decode a Hello request body.
pub fn decode_status(bytes: &[u8]) -> Result<AliveStatus, LivenessError> {
    decode(bytes)
}

/// Encode a Hello response body.
pub fn encode_response(resp: &AliveStatusResp) -> Result<Vec<u8>, LivenessError> {
    encode(resp)
}

/// Decode a Hello response body.
pub fn decode_response(bytes: &[u8]) -> Result<AliveStatusResp, LivenessError> {
    decode(bytes)
}
