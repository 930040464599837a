//! Team member directory records.

use serde::{Deserialize, Serialize};

use crate::types::MemberId;

/// A member of the team, as listed by the member directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Unique identifier. Identity key for all per-member aggregation.
    pub id: MemberId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Avatar image URL, if one is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Free-form role label (e.g. "engineer", "designer").
    pub role: String,
}
