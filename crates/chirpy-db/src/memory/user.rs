//! In-memory implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};

use chirpy_core::{CredentialUpdate, DomainError, NewUser, RepoResult, User, UserId, UserRepository};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

/// In-memory user store
///
/// Never holds a lock on one map while touching the other.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: DashMap<UserId, StoredUser>,
    emails: DashMap<String, UserId>,
}

impl InMemoryUserRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Claim `email` for `id`. `EmailAlreadyExists` if someone else holds it.
    fn claim_email(&self, email: &str, id: UserId) -> RepoResult<()> {
        match self.emails.entry(email.to_string()) {
            Entry::Occupied(entry) if *entry.get() != id => Err(DomainError::EmailAlreadyExists),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> RepoResult<User> {
        let user = User::new(new_user.email);
        self.claim_email(&user.email, user.id)?;

        self.users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password_hash: new_user.password_hash,
            },
        );
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.users.get(&id).map(|stored| stored.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let Some(id) = self.emails.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self.users.get(&id).map(|stored| stored.password_hash.clone()))
    }

    async fn update_credentials(&self, update: CredentialUpdate) -> RepoResult<User> {
        let old_email = self
            .users
            .get(&update.id)
            .map(|stored| stored.user.email.clone())
            .ok_or(DomainError::UserNotFound(update.id))?;

        if old_email != update.email {
            self.claim_email(&update.email, update.id)?;
        }

        let updated = {
            let Some(mut stored) = self.users.get_mut(&update.id) else {
                self.emails.remove_if(&update.email, |_, owner| *owner == update.id);
                return Err(DomainError::UserNotFound(update.id));
            };
            stored.user.email.clone_from(&update.email);
            stored.user.updated_at = Utc::now();
            stored.password_hash = update.password_hash;
            stored.user.clone()
        };

        if old_email != update.email {
            self.emails.remove_if(&old_email, |_, owner| *owner == update.id);
        }

        Ok(updated)
    }
}
