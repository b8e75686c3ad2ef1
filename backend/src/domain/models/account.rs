use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Fixed member slot within a family account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberKey {
    /// Always present
    Primary,
    /// Optional second member
    Secondary,
}

impl MemberKey {
    pub const ALL: [MemberKey; 2] = [MemberKey::Primary, MemberKey::Secondary];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKey::Primary => "member1",
            MemberKey::Secondary => "member2",
        }
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member1" => Ok(MemberKey::Primary),
            "member2" => Ok(MemberKey::Secondary),
            other => Err(anyhow::anyhow!("unknown member key: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub key: MemberKey,
    pub name: String,
    pub email: Option<String>,
}

/// Tenant boundary: one or two members and everything they record.
///
/// `members` is kept sorted by key and always holds the primary member.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
    pub members: Vec<Member>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn generate_id() -> String {
        format!("account::{}", uuid::Uuid::new_v4().simple())
    }

    pub fn member(&self, key: MemberKey) -> Option<&Member> {
        self.members.iter().find(|m| m.key == key)
    }

    /// Display name for a member, falling back to the slot key
    pub fn display_name(&self, key: MemberKey) -> String {
        self.member(key)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| key.to_string())
    }
}
