//! Account Service - registration of users and sellers

use core_config::password::PasswordPolicyConfig;
use observability::AccountMetrics;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{AccountError, AccountResult};
use crate::models::{NewSeller, NewUser, RegisterSeller, RegisterUser, Seller, User};
use crate::password::{Argon2PasswordHasher, PasswordHasher, PasswordPolicy};
use crate::repository::AccountRepository;

const USER: &str = "user";
const SELLER: &str = "seller";

pub struct AccountService<R: AccountRepository> {
    repository: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    policy: PasswordPolicy,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repository: R, policy: PasswordPolicyConfig) -> Self {
        Self::with_hasher(repository, policy, Argon2PasswordHasher)
    }

    pub fn with_hasher(
        repository: R,
        policy: PasswordPolicyConfig,
        hasher: impl PasswordHasher + 'static,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher: Arc::new(hasher),
            policy: PasswordPolicy::new(policy),
        }
    }

    pub fn hasher(&self) -> &dyn PasswordHasher {
        self.hasher.as_ref()
    }

    /// Register a shopper. The login name is the email address.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_user(&self, input: RegisterUser) -> AccountResult<User> {
        let result = self.register_user(input).await;
        record(USER, &result);
        result
    }

    /// Register a staff user and its seller profile in one transaction.
    #[instrument(skip(self, input), fields(email = %input.email, name = %input.name))]
    pub async fn create_seller(&self, input: RegisterSeller) -> AccountResult<(User, Seller)> {
        let result = self.register_seller(input).await;
        record(SELLER, &result);
        result
    }

    async fn register_user(&self, input: RegisterUser) -> AccountResult<User> {
        input.validate()?;
        let user = self.prepare(input.email, &input.password, false).await?;

        self.repository.create_user(user).await
    }

    async fn register_seller(&self, input: RegisterSeller) -> AccountResult<(User, Seller)> {
        input.validate()?;
        let user = self.prepare(input.email, &input.password, true).await?;
        let seller = NewSeller {
            name: input.name,
            address: input.address,
        };

        self.repository.create_user_with_seller(user, seller).await
    }

    /// Policy check, duplicate check, then hashing.
    async fn prepare(&self, email: String, password: &str, is_staff: bool) -> AccountResult<NewUser> {
        self.policy.check(password)?;

        if self.repository.email_exists(&email).await? {
            return Err(AccountError::DuplicateEmail(email));
        }

        let password_hash = self.hasher.hash(password)?;

        Ok(NewUser {
            username: email.clone(),
            email,
            password_hash,
            is_staff,
        })
    }
}

fn record<T>(kind: &'static str, result: &AccountResult<T>) {
    match result {
        Ok(_) => AccountMetrics::record_created(kind),
        Err(AccountError::Consistency(msg)) => {
            tracing::error!(kind, error = %msg, "Account creation rolled back");
            AccountMetrics::record_rollback();
        }
        Err(err) => AccountMetrics::record_rejected(kind, err.reason()),
    }
}
