//! Persisted roster encoding
//!
//! Current layout (version 1):
//!
//! ```json
//! { "version": 1, "members": [ { "id": 1, "fullName": "...", ... } ] }
//! ```
//!
//! Version 0 is the unversioned layout older page builds wrote: a bare JSON
//! array of members. It is read as-is and rewritten as version 1 on the next
//! save.

use serde::Serialize;
use serde_json::Value;
use shared::Member;

use super::error::{StorageError, StorageResult};

pub const ROSTER_VERSION: u32 = 1;

#[derive(Serialize)]
struct RosterEnvelope<'a> {
    version: u32,
    members: &'a [Member],
}

/// Roster read back from storage
#[derive(Debug)]
pub struct DecodedRoster {
    pub version: u32,
    pub members: Vec<Member>,
}

pub fn encode(members: &[Member]) -> StorageResult<Vec<u8>> {
    serde_json::to_vec(&RosterEnvelope {
        version: ROSTER_VERSION,
        members,
    })
    .map_err(StorageError::Serialization)
}

pub fn decode(bytes: &[u8]) -> StorageResult<DecodedRoster> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| StorageError::Deserialization(e.to_string()))?;

    match value {
        Value::Array(items) => Ok(DecodedRoster {
            version: 0,
            members: members_from(Value::Array(items))?,
        }),
        Value::Object(mut map) => {
            let version = map
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| StorageError::Deserialization("missing roster version".into()))?;
            if version > u64::from(ROSTER_VERSION) {
                return Err(StorageError::UnsupportedVersion {
                    found: version,
                    supported: ROSTER_VERSION,
                });
            }
            let members = map
                .remove("members")
                .ok_or_else(|| StorageError::Deserialization("missing members".into()))?;
            Ok(DecodedRoster {
                version: version as u32,
                members: members_from(members)?,
            })
        }
        other => Err(StorageError::Deserialization(format!(
            "expected roster object or array, found {}",
            json_kind(&other)
        ))),
    }
}

fn members_from(value: Value) -> StorageResult<Vec<Member>> {
    serde_json::from_value(value).map_err(|e| StorageError::Deserialization(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
