//! Typed webhook events
//!
//! Raw payloads are deserialized into loosely typed `*Payload` structs and then
//! validated into the strict event types. Every required field is checked here,
//! so the pipeline never has to re-check the shape of an event.

use serde::Deserialize;

use crate::domain::RepositoryCoordinate;
use crate::error::{DrafterError, Result};

/// Kind of ref carried by a "ref created" event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefType {
    Tag,
    /// Anything else (usually "branch"), kept for logging
    Other(String),
}

impl RefType {
    pub fn parse(raw: &str) -> Self {
        if raw == "tag" {
            RefType::Tag
        } else {
            RefType::Other(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RefType::Tag => "tag",
            RefType::Other(raw) => raw.as_str(),
        }
    }
}

/// A validated "ref created" event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEvent {
    pub ref_type: RefType,
    /// Tag (or branch) name, e.g. "v1.2.0"
    pub ref_name: String,
    pub repository: RepositoryCoordinate,
}

/// A validated "issue opened" event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueOpenedEvent {
    pub issue_number: u64,
    pub author: String,
    pub repository: RepositoryCoordinate,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    name: Option<String>,
    owner: Option<OwnerPayload>,
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatePayload {
    ref_type: Option<String>,
    #[serde(rename = "ref")]
    ref_name: Option<String>,
    repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    login: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IssuePayload {
    number: Option<u64>,
    user: Option<UserPayload>,
}

#[derive(Debug, Deserialize)]
struct IssuesPayload {
    issue: Option<IssuePayload>,
    repository: Option<RepositoryPayload>,
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DrafterError::malformed(format!("missing field `{}`", field))),
    }
}

impl RepositoryPayload {
    fn into_coordinate(self) -> Result<RepositoryCoordinate> {
        let name = required(self.name, "repository.name")?;
        let owner = required(
            self.owner.and_then(|o| o.login),
            "repository.owner.login",
        )?;
        Ok(RepositoryCoordinate {
            owner,
            name,
            default_branch: self.default_branch.filter(|b| !b.is_empty()),
        })
    }
}

fn repository(payload: Option<RepositoryPayload>) -> Result<RepositoryCoordinate> {
    payload
        .ok_or_else(|| DrafterError::malformed("missing field `repository`"))?
        .into_coordinate()
}

fn from_value<T: for<'de> Deserialize<'de>>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| DrafterError::malformed(e.to_string()))
}

impl TagEvent {
    /// Validates a "create" webhook payload.
    pub fn from_payload(value: serde_json::Value) -> Result<Self> {
        let payload: CreatePayload = from_value(value)?;

        let ref_type = RefType::parse(&required(payload.ref_type, "ref_type")?);
        let ref_name = required(payload.ref_name, "ref")?;
        let repository = repository(payload.repository)?;

        Ok(TagEvent {
            ref_type,
            ref_name,
            repository,
        })
    }

    pub fn is_tag(&self) -> bool {
        self.ref_type == RefType::Tag
    }
}

impl IssueOpenedEvent {
    /// Validates an "issues" webhook payload.
    pub fn from_payload(value: serde_json::Value) -> Result<Self> {
        let payload: IssuesPayload = from_value(value)?;

        let issue = payload
            .issue
            .ok_or_else(|| DrafterError::malformed("missing field `issue`"))?;
        let issue_number = issue
            .number
            .ok_or_else(|| DrafterError::malformed("missing field `issue.number`"))?;
        let author = required(issue.user.and_then(|u| u.login), "issue.user.login")?;
        let repository = repository(payload.repository)?;

        Ok(IssueOpenedEvent {
            issue_number,
            author,
            repository,
        })
    }
}
