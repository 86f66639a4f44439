use async_trait::async_trait;
use sea_orm::DbErr;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AccountError, AccountResult};
use crate::models::{NewSeller, NewUser, Seller, User};

/// Repository trait for user and seller persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a user. Fails with `DuplicateEmail` if the address is taken.
    async fn create_user(&self, user: NewUser) -> AccountResult<User>;

    /// Insert a user and its seller profile atomically.
    ///
    /// A failure after the user row is written is reported as `Consistency`
    /// and leaves neither row behind.
    async fn create_user_with_seller(
        &self,
        user: NewUser,
        seller: NewSeller,
    ) -> AccountResult<(User, Seller)>;

    /// Case-insensitive.
    async fn email_exists(&self, email: &str) -> AccountResult<bool>;

    async fn get_user_by_email(&self, email: &str) -> AccountResult<Option<User>>;

    async fn get_seller_by_user(&self, user_id: Uuid) -> AccountResult<Option<Seller>>;
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    sellers: Vec<Seller>,
}

impl Tables {
    fn find_user(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.email.to_lowercase() == email.to_lowercase())
    }

    fn insert_user(&mut self, input: NewUser) -> AccountResult<User> {
        if self.find_user(&input.email).is_some() {
            return Err(AccountError::DuplicateEmail(input.email));
        }

        let user = User::new(input);
        self.users.push(user.clone());
        Ok(user)
    }

    /// Mirrors the storage constraints on the sellers table.
    fn insert_seller(&mut self, user_id: Uuid, input: NewSeller) -> AccountResult<Seller> {
        if input.name.trim().is_empty() || input.address.trim().is_empty() {
            return Err(AccountError::Database(DbErr::Custom(
                "seller name and address must not be blank".to_string(),
            )));
        }
        if self.sellers.iter().any(|s| s.user_id == user_id) {
            return Err(AccountError::Database(DbErr::Custom(format!(
                "user {} already has a seller profile",
                user_id
            ))));
        }

        let seller = Seller::new(user_id, input);
        self.sellers.push(seller.clone());
        Ok(seller)
    }
}

/// In-memory implementation of AccountRepository (for development/testing).
///
/// Both tables sit behind one lock, so a seller registration holds the write
/// guard across both inserts and undoes the user row if the seller insert fails.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn seller_count(&self) -> usize {
        self.tables.read().await.sellers.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create_user(&self, user: NewUser) -> AccountResult<User> {
        let mut tables = self.tables.write().await;
        let user = tables.insert_user(user)?;

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn create_user_with_seller(
        &self,
        user: NewUser,
        seller: NewSeller,
    ) -> AccountResult<(User, Seller)> {
        let mut tables = self.tables.write().await;
        let user = tables.insert_user(user)?;

        match tables.insert_seller(user.id, seller) {
            Ok(seller) => {
                tracing::info!(user_id = %user.id, seller_id = %seller.id, "Created seller");
                Ok((user, seller))
            }
            Err(err) => {
                tables.users.retain(|u| u.id != user.id);
                tracing::warn!(user_id = %user.id, error = %err, "Seller insert failed, user removed");
                Err(AccountError::Consistency(err.to_string()))
            }
        }
    }

    async fn email_exists(&self, email: &str) -> AccountResult<bool> {
        Ok(self.tables.read().await.find_user(email).is_some())
    }

    async fn get_user_by_email(&self, email: &str) -> AccountResult<Option<User>> {
        Ok(self.tables.read().await.find_user(email).cloned())
    }

    async fn get_seller_by_user(&self, user_id: Uuid) -> AccountResult<Option<Seller>> {
        let tables = self.tables.read().await;
        Ok(tables.sellers.iter().find(|s| s.user_id == user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str, is_staff: bool) -> NewUser {
        NewUser {
            email: email.to_string(),
            username: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            is_staff,
        }
    }

    fn new_seller(name: &str, address: &str) -> NewSeller {
        NewSeller {
            name: name.to_string(),
            address: address.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup_user() {
        let repo = InMemoryAccountRepository::new();
        let created = repo.create_user(new_user("a@x.com", false)).await.unwrap();

        let found = repo.get_user_by_email("A@X.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(repo.email_exists("a@X.COM").await.unwrap());
        assert!(!repo.email_exists("b@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_case_insensitive() {
        let repo = InMemoryAccountRepository::new();
        repo.create_user(new_user("a@x.com", false)).await.unwrap();

        let err = repo.create_user(new_user("A@x.com", false)).await.unwrap_err();
        assert!(matches!(err, AccountError::DuplicateEmail(_)));
        assert_eq!(repo.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_email_match_folds_non_ascii_case() {
        let repo = InMemoryAccountRepository::new();
        repo.create_user(new_user("a@Ärzte.de", false)).await.unwrap();

        assert!(repo.email_exists("a@ärzte.de").await.unwrap());
        let err = repo.create_user(new_user("A@ÄRZTE.DE", false)).await.unwrap_err();
        assert!(matches!(err, AccountError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_create_user_with_seller() {
        let repo = InMemoryAccountRepository::new();
        let (user, seller) = repo
            .create_user_with_seller(new_user("s@x.com", true), new_seller("Acme", "1 Main St"))
            .await
            .unwrap();

        assert_eq!(seller.user_id, user.id);
        let linked = repo.get_seller_by_user(user.id).await.unwrap().unwrap();
        assert_eq!(linked, seller);
    }

    #[tokio::test]
    async fn test_failed_seller_insert_leaves_no_user() {
        let repo = InMemoryAccountRepository::new();

        let err = repo
            .create_user_with_seller(new_user("s@x.com", true), new_seller("  ", "1 Main St"))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::Consistency(_)));
        assert!(!repo.email_exists("s@x.com").await.unwrap());
        assert_eq!(repo.user_count().await, 0);
        assert_eq!(repo.seller_count().await, 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_on_seller_is_not_a_rollback() {
        let repo = InMemoryAccountRepository::new();
        repo.create_user(new_user("s@x.com", false)).await.unwrap();

        let err = repo
            .create_user_with_seller(new_user("s@x.com", true), new_seller("Acme", "1 Main St"))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::DuplicateEmail(_)));
        assert_eq!(repo.user_count().await, 1);
        assert_eq!(repo.seller_count().await, 0);
    }
}
