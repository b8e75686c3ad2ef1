use shared::{
    AccountInfo, AuthResponse, Member as SharedMember, MemberKey as SharedMemberKey, MemberUpdate,
    ProfileResponse, UpdateMembersRequest, UserInfo,
};

use crate::domain::commands::accounts::{Profile, Session, UpdateMembersCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::member_directory::MemberEntry;
use crate::domain::models::{
    Account, Member as DomainMember, MemberKey as DomainMemberKey, ScopeFilter, User,
};

pub struct AccountMapper;

impl AccountMapper {
    pub fn member_key_to_domain(dto_key: SharedMemberKey) -> DomainMemberKey {
        match dto_key {
            SharedMemberKey::Member1 => DomainMemberKey::Primary,
            SharedMemberKey::Member2 => DomainMemberKey::Secondary,
        }
    }

    pub fn member_key_to_dto(domain_key: DomainMemberKey) -> SharedMemberKey {
        match domain_key {
            DomainMemberKey::Primary => SharedMemberKey::Member1,
            DomainMemberKey::Secondary => SharedMemberKey::Member2,
        }
    }

    /// Parse a `memberKey` listing filter: `member1`, `member2` or `family`
    pub fn scope_to_domain(raw: Option<&str>) -> DomainResult<ScopeFilter> {
        match raw.map(str::trim) {
            None | Some("") => Ok(ScopeFilter::All),
            Some("family") => Ok(ScopeFilter::Family),
            Some(other) => other.parse::<DomainMemberKey>().map(ScopeFilter::Member).map_err(|_| {
                DomainError::validation("memberKey must be 'member1', 'member2' or 'family'")
            }),
        }
    }

    pub fn member_to_dto(domain: DomainMember) -> SharedMember {
        SharedMember {
            key: Self::member_key_to_dto(domain.key),
            name: domain.name,
            email: domain.email,
        }
    }

    pub fn account_to_dto(domain: Account) -> AccountInfo {
        AccountInfo {
            id: domain.id,
            members: domain.members.into_iter().map(Self::member_to_dto).collect(),
        }
    }

    /// Never exposes the password hash
    pub fn user_to_dto(domain: User) -> UserInfo {
        UserInfo {
            id: domain.id,
            username: domain.username,
            email: domain.email,
        }
    }

    pub fn to_auth_response(session: Session) -> AuthResponse {
        AuthResponse {
            token: session.token,
            user: Self::user_to_dto(session.profile.user),
            account: Self::account_to_dto(session.profile.account),
        }
    }

    pub fn to_profile_response(profile: Profile) -> ProfileResponse {
        ProfileResponse {
            user: Self::user_to_dto(profile.user),
            account: Self::account_to_dto(profile.account),
        }
    }

    fn member_update_to_domain(dto: MemberUpdate) -> MemberEntry {
        MemberEntry {
            key: Self::member_key_to_domain(dto.key),
            name: dto.name,
            email: dto.email,
        }
    }

    pub fn to_update_members_command(request: UpdateMembersRequest) -> UpdateMembersCommand {
        UpdateMembersCommand {
            members: request
                .members
                .into_iter()
                .map(Self::member_update_to_domain)
                .collect(),
        }
    }
}
