//! Registration, login and profile management.
//!
//! A registration creates one user credential and one family account holding
//! the primary member and, optionally, the secondary one. Every other
//! operation works on the account linked to the authenticated user.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::auth::{Claims, PasswordHasher, TokenSigner};
use crate::domain::commands::accounts::{
    ChangePasswordCommand, LoginCommand, Profile, RegisterCommand, Session, UpdateMembersCommand,
};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{Account, User};
use crate::domain::validation::required_text;
use crate::storage::{AccountStorage, Connection, UserStorage};

const MIN_PASSWORD_LEN: usize = 6;
const MAX_USERNAME_LEN: usize = 100;

pub struct AccountService<C: Connection> {
    account_repository: C::AccountRepository,
    user_repository: C::UserRepository,
    hasher: PasswordHasher,
    signer: TokenSigner,
}

impl<C: Connection> AccountService<C> {
    pub fn new(connection: Arc<C>, hasher: PasswordHasher, signer: TokenSigner) -> Self {
        Self {
            account_repository: connection.create_account_repository(),
            user_repository: connection.create_user_repository(),
            hasher,
            signer,
        }
    }

    pub async fn register(&self, command: RegisterCommand, now: DateTime<Utc>) -> DomainResult<Session> {
        let username = required_text(&command.username, "username", MAX_USERNAME_LEN)?;
        let email = validate_email(&command.email)?;
        validate_password(&command.password, "password")?;

        if self.user_repository.get_user_by_email(&email).await?.is_some() {
            warn!("Registration rejected, email already in use: {}", email);
            return Err(DomainError::Conflict("Email already in use".to_string()));
        }

        let account = Account::with_members(
            Account::generate_id(),
            &command.member1_name,
            command.member2_name.as_deref(),
            now,
        )?;
        let user = User {
            id: User::generate_id(),
            username,
            email,
            password_hash: self.hasher.hash(&command.password)?,
            account_id: account.id.clone(),
            created_at: now,
        };

        self.account_repository.store_registration(&account, &user).await?;
        info!("Registered user {} with account {}", user.id, account.id);

        let token = self.signer.issue(&user.id, &account.id, now)?;
        Ok(Session {
            token,
            profile: Profile { user, account },
        })
    }

    pub async fn login(&self, command: LoginCommand, now: DateTime<Utc>) -> DomainResult<Session> {
        let invalid = || DomainError::Unauthorized("Invalid credentials".to_string());

        let email = User::normalize_email(&command.email);
        let user = self
            .user_repository
            .get_user_by_email(&email)
            .await?
            .ok_or_else(invalid)?;
        if !self.hasher.verify(&command.password, &user.password_hash) {
            warn!("Failed login for {}", email);
            return Err(invalid());
        }

        let account = self.load_account(&user.account_id).await?;
        let token = self.signer.issue(&user.id, &account.id, now)?;
        info!("User {} logged in", user.id);
        Ok(Session {
            token,
            profile: Profile { user, account },
        })
    }

    /// Resolve a bearer token into its claims
    pub fn authenticate(&self, token: &str) -> DomainResult<Claims> {
        self.signer.verify(token)
    }

    pub async fn profile(&self, user_id: &str) -> DomainResult<Profile> {
        let user = self.load_user(user_id).await?;
        let account = self.load_account(&user.account_id).await?;
        Ok(Profile { user, account })
    }

    pub async fn update_username(&self, user_id: &str, username: &str) -> DomainResult<User> {
        let mut user = self.load_user(user_id).await?;
        user.username = required_text(username, "username", MAX_USERNAME_LEN)?;
        self.user_repository.update_user(&user).await?;
        info!("Updated username of {}", user.id);
        Ok(user)
    }

    pub async fn change_password(&self, user_id: &str, command: ChangePasswordCommand) -> DomainResult<()> {
        validate_password(&command.new_password, "newPassword")?;

        let mut user = self.load_user(user_id).await?;
        if !self.hasher.verify(&command.old_password, &user.password_hash) {
            warn!("Password change rejected for {}: old password mismatch", user.id);
            return Err(DomainError::Unauthorized("Old password is incorrect".to_string()));
        }

        user.password_hash = self.hasher.hash(&command.new_password)?;
        self.user_repository.update_user(&user).await?;
        info!("Password changed for {}", user.id);
        Ok(())
    }

    /// Apply a roster update to the caller's account and return the new roster
    pub async fn update_members(&self, account_id: &str, command: UpdateMembersCommand) -> DomainResult<Account> {
        let mut account = self.load_account(account_id).await?;
        if account.apply_roster_update(&command.members)? {
            self.account_repository.save_members(&account).await?;
            info!("Updated member roster of {}", account.id);
        }
        Ok(account)
    }

    /// Load the account a request is scoped to
    pub async fn load_account(&self, account_id: &str) -> DomainResult<Account> {
        self.account_repository
            .get_account(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Family account not found"))
    }

    async fn load_user(&self, user_id: &str) -> DomainResult<User> {
        self.user_repository
            .get_user(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))
    }
}

fn validate_email(email: &str) -> DomainResult<String> {
    let email = User::normalize_email(email);
    let valid = email
        .split_once('@')
        .map_or(false, |(local, domain)| !local.is_empty() && domain.contains('.') && !domain.ends_with('.'));
    if !valid {
        return Err(DomainError::validation("a valid email is required"));
    }
    Ok(email)
}

fn validate_password(password: &str, field: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(format!(
            "{} must be at least {} characters",
            field, MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member_directory::MemberEntry;
    use crate::domain::models::MemberKey;
    use crate::storage::DbConnection;

    async fn create_test_service() -> AccountService<DbConnection> {
        let connection = Arc::new(DbConnection::init_test().await.expect("init test db"));
        AccountService::new(connection, PasswordHasher::new(4), TokenSigner::new("test-secret", 1))
    }

    fn register_command(email: &str) -> RegisterCommand {
        RegisterCommand {
            username: "sam".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
            member1_name: "Sam".to_string(),
            member2_name: Some("Alice".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = create_test_service().await;
        let session = service.register(register_command(" Sam@Example.com "), Utc::now()).await.unwrap();

        assert_eq!(session.profile.user.email, "sam@example.com");
        assert_eq!(session.profile.account.members.len(), 2);
        let claims = service.authenticate(&session.token).unwrap();
        assert_eq!(claims.sub, session.profile.user.id);
        assert_eq!(claims.account_id, session.profile.account.id);

        let login = service
            .login(
                LoginCommand {
                    email: "SAM@example.com".to_string(),
                    password: "hunter22".to_string(),
                },
                Utc::now(),
            )
            .await
            .unwrap();
        assert_eq!(login.profile.account.id, session.profile.account.id);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let service = create_test_service().await;
        service.register(register_command("dup@example.com"), Utc::now()).await.unwrap();
        let result = service.register(register_command("dup@example.com"), Utc::now()).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_validation() {
        let service = create_test_service().await;

        let mut short_password = register_command("a@example.com");
        short_password.password = "12345".to_string();
        assert!(matches!(
            service.register(short_password, Utc::now()).await,
            Err(DomainError::Validation(_))
        ));

        let mut bad_email = register_command("not-an-email");
        bad_email.email = "not-an-email".to_string();
        assert!(matches!(service.register(bad_email, Utc::now()).await, Err(DomainError::Validation(_))));

        let mut no_member = register_command("b@example.com");
        no_member.member1_name = "  ".to_string();
        assert!(matches!(service.register(no_member, Utc::now()).await, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let service = create_test_service().await;
        service.register(register_command("sam@example.com"), Utc::now()).await.unwrap();

        for (email, password) in [("sam@example.com", "wrong-pass"), ("nobody@example.com", "hunter22")] {
            let result = service
                .login(
                    LoginCommand {
                        email: email.to_string(),
                        password: password.to_string(),
                    },
                    Utc::now(),
                )
                .await;
            assert!(matches!(result, Err(DomainError::Unauthorized(_))));
        }
    }

    #[tokio::test]
    async fn test_change_password() {
        let service = create_test_service().await;
        let session = service.register(register_command("sam@example.com"), Utc::now()).await.unwrap();
        let user_id = session.profile.user.id.clone();

        let wrong_old = service
            .change_password(
                &user_id,
                ChangePasswordCommand {
                    old_password: "not-it".to_string(),
                    new_password: "brand-new".to_string(),
                },
            )
            .await;
        assert!(matches!(wrong_old, Err(DomainError::Unauthorized(_))));

        service
            .change_password(
                &user_id,
                ChangePasswordCommand {
                    old_password: "hunter22".to_string(),
                    new_password: "brand-new".to_string(),
                },
            )
            .await
            .unwrap();

        let login = service
            .login(
                LoginCommand {
                    email: "sam@example.com".to_string(),
                    password: "brand-new".to_string(),
                },
                Utc::now(),
            )
            .await;
        assert!(login.is_ok());
    }

    #[tokio::test]
    async fn test_profile_and_username_update() {
        let service = create_test_service().await;
        let session = service.register(register_command("sam@example.com"), Utc::now()).await.unwrap();

        let user = service.update_username(&session.profile.user.id, " Samuel ").await.unwrap();
        assert_eq!(user.username, "Samuel");

        let profile = service.profile(&session.profile.user.id).await.unwrap();
        assert_eq!(profile.user.username, "Samuel");
        assert!(matches!(service.profile("user::missing").await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_members_persists_roster() {
        let service = create_test_service().await;
        let mut command = register_command("solo@example.com");
        command.member2_name = None;
        let session = service.register(command, Utc::now()).await.unwrap();
        let account_id = session.profile.account.id.clone();

        let account = service
            .update_members(
                &account_id,
                UpdateMembersCommand {
                    members: vec![MemberEntry {
                        key: MemberKey::Secondary,
                        name: "Alice".to_string(),
                        email: Some("alice@example.com".to_string()),
                    }],
                },
            )
            .await
            .unwrap();
        assert_eq!(account.members.len(), 2);

        let reloaded = service.load_account(&account_id).await.unwrap();
        assert_eq!(reloaded.display_name(MemberKey::Primary), "Sam");
        assert_eq!(reloaded.display_name(MemberKey::Secondary), "Alice");
        assert_eq!(reloaded.member(MemberKey::Secondary).unwrap().email.as_deref(), Some("alice@example.com"));
    }
}
