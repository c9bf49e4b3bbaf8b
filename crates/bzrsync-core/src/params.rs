//! Orchestrator parameter binding

use std::path::{Path, PathBuf};

use bzrsync_fs::resolve_destination;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::request::{HEAD, SyncRequest, TargetRevision};
use crate::{Error, Result};

/// Raw parameters as supplied by the orchestrator or the command line.
///
/// Every field is optional here so that several sources can be layered with
/// [`SyncParams::overlay`]; required fields are checked in
/// [`SyncParams::into_request`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncParams {
    /// Remote branch location
    #[serde(default, alias = "parent")]
    pub name: Option<String>,

    /// Working copy path; `~` and relative paths are resolved
    #[serde(default)]
    pub dest: Option<String>,

    /// Revision to sync to, defaults to `head`
    #[serde(default)]
    pub version: Option<String>,

    /// Discard local modifications, defaults to `true`
    #[serde(default, deserialize_with = "flexible_bool")]
    pub force: Option<bool>,

    /// Explicit path to the `bzr` executable
    #[serde(default)]
    pub executable: Option<PathBuf>,
}

impl SyncParams {
    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn overlay(self, overrides: SyncParams) -> SyncParams {
        SyncParams {
            name: overrides.name.or(self.name),
            dest: overrides.dest.or(self.dest),
            version: overrides.version.or(self.version),
            force: overrides.force.or(self.force),
            executable: overrides.executable.or(self.executable),
        }
    }

    /// Validate and convert into a [`SyncRequest`], resolving `dest` against `cwd`.
    pub fn into_request(self, cwd: &Path) -> Result<SyncRequest> {
        let source = required(self.name, "name")?;
        let dest = required(self.dest, "dest")?;
        let version = self.version.unwrap_or_else(|| HEAD.to_string());
        if version.trim().is_empty() {
            return Err(Error::invalid_params("version must not be empty"));
        }

        let destination = resolve_destination(&dest, cwd)?;
        if destination.parent().is_none() {
            return Err(Error::invalid_params(format!(
                "dest '{destination}' has no parent directory"
            )));
        }

        Ok(SyncRequest {
            source,
            destination,
            target: TargetRevision::parse(version.trim()),
            force: self.force.unwrap_or(true),
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::invalid_params(format!(
            "missing required argument: {field}"
        ))),
    }
}

/// Parse the boolean spellings orchestrators commonly use.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "on" | "1" => Some(true),
        "no" | "n" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn flexible_bool<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Bool(b)) => Ok(Some(b)),
        Some(Raw::Int(i)) => Ok(Some(i != 0)),
        Some(Raw::Text(s)) => parse_bool(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid boolean value '{s}'"))),
    }
}
