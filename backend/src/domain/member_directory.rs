//! Member roster of a family account.
//!
//! An account has a primary member and, optionally, a secondary one. Slots are
//! the fixed [`MemberKey`] values; display names are free text and are what
//! split co-participants are resolved against.

use chrono::{DateTime, Utc};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{Account, Member, MemberKey};

/// Outcome of a single roster write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterChange {
    Unchanged,
    Renamed,
    Added,
}

/// One requested roster entry
#[derive(Debug, Clone, PartialEq)]
pub struct MemberEntry {
    pub key: MemberKey,
    pub name: String,
    pub email: Option<String>,
}

impl Account {
    /// Build a fresh account roster at registration time
    pub fn with_members(
        id: String,
        primary_name: &str,
        secondary_name: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let mut account = Account {
            id,
            members: Vec::with_capacity(2),
            created_at,
        };
        account.add_or_rename_member(MemberKey::Primary, primary_name)?;
        if let Some(name) = secondary_name.filter(|n| !n.trim().is_empty()) {
            account.add_or_rename_member(MemberKey::Secondary, name)?;
        }
        Ok(account)
    }

    /// Set the display name of a slot, creating the member if needed.
    ///
    /// Re-applying the same key and name is a no-op.
    pub fn add_or_rename_member(&mut self, key: MemberKey, name: &str) -> DomainResult<RosterChange> {
        self.upsert_member(key, name, None)
    }

    /// Like [`Account::add_or_rename_member`], also replacing the email when given
    pub fn upsert_member(
        &mut self,
        key: MemberKey,
        name: &str,
        email: Option<&str>,
    ) -> DomainResult<RosterChange> {
        let name = validate_member_name(name)?;
        let email = email.map(normalize_email);

        if let Some(existing) = self.members.iter_mut().find(|m| m.key == key) {
            let email_changed = email.as_ref().map_or(false, |e| *e != existing.email);
            if existing.name == name && !email_changed {
                return Ok(RosterChange::Unchanged);
            }
            existing.name = name;
            if let Some(email) = email {
                existing.email = email;
            }
            return Ok(RosterChange::Renamed);
        }

        self.members.push(Member {
            key,
            name,
            email: email.flatten(),
        });
        self.members.sort_by_key(|m| m.key);
        Ok(RosterChange::Added)
    }

    /// Apply a 1- or 2-entry roster update.
    ///
    /// Entries are validated up front so a bad entry leaves the roster
    /// untouched. Slots that are not mentioned keep their current values.
    /// Returns whether anything changed.
    pub fn apply_roster_update(&mut self, entries: &[MemberEntry]) -> DomainResult<bool> {
        if entries.is_empty() || entries.len() > MemberKey::ALL.len() {
            return Err(DomainError::validation(
                "members must contain one or two entries",
            ));
        }
        for entry in entries {
            validate_member_name(&entry.name)?;
        }

        let mut changed = false;
        for entry in entries {
            let change = self.upsert_member(entry.key, &entry.name, entry.email.as_deref())?;
            changed |= change != RosterChange::Unchanged;
        }
        Ok(changed)
    }

    /// Find the slot whose display name equals `name` exactly.
    ///
    /// Members are ordered primary first, so if both share a name the primary
    /// member wins.
    pub fn resolve_by_name(&self, name: &str) -> Option<MemberKey> {
        self.members.iter().find(|m| m.name == name).map(|m| m.key)
    }
}

fn validate_member_name(name: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("member name cannot be empty"));
    }
    if trimmed.len() > 100 {
        return Err(DomainError::validation(
            "member name cannot exceed 100 characters",
        ));
    }
    Ok(trimmed.to_string())
}

/// Empty input clears the email
fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim().to_lowercase();
    (!email.is_empty()).then_some(email)
}
