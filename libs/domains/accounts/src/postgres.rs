use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr,
    TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use crate::entity::{sellers, users};
use crate::error::{AccountError, AccountResult};
use crate::models::{NewSeller, NewUser, Seller, User};
use crate::repository::AccountRepository;

/// PostgreSQL implementation of AccountRepository.
///
/// Email uniqueness is enforced by a unique index on `lower(email)`; the
/// seller registration runs in one transaction that rolls back on any error.
#[derive(Clone)]
pub struct PgAccountRepository {
    db: DatabaseConnection,
}

impl PgAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn insert_error(email: &str, err: DbErr) -> AccountError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AccountError::DuplicateEmail(email.to_string()),
        _ => AccountError::Database(err),
    }
}

fn email_matches(email: &str) -> sea_orm::Condition {
    sea_orm::Condition::all().add(Expr::cust_with_values(
        "lower(email) = ?",
        [email.to_lowercase()],
    ))
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create_user(&self, input: NewUser) -> AccountResult<User> {
        let user = User::new(input);

        let model = users::ActiveModel::from(&user)
            .insert(&self.db)
            .await
            .map_err(|e| insert_error(&user.email, e))?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn create_user_with_seller(
        &self,
        input: NewUser,
        seller: NewSeller,
    ) -> AccountResult<(User, Seller)> {
        let user = User::new(input);
        let seller = Seller::new(user.id, seller);

        let txn = self.db.begin().await?;

        let user_model = users::ActiveModel::from(&user)
            .insert(&txn)
            .await
            .map_err(|e| insert_error(&user.email, e))?;

        let seller_model = match sellers::ActiveModel::from(&seller).insert(&txn).await {
            Ok(model) => model,
            Err(err) => {
                tracing::warn!(user_id = %user.id, error = %err, "Seller insert failed, rolling back");
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(error = %rollback_err, "Rollback failed");
                }
                return Err(AccountError::Consistency(err.to_string()));
            }
        };

        txn.commit()
            .await
            .map_err(|e| AccountError::Consistency(e.to_string()))?;

        tracing::info!(user_id = %user_model.id, seller_id = %seller_model.id, "Created seller");
        Ok((user_model.into(), seller_model.into()))
    }

    async fn email_exists(&self, email: &str) -> AccountResult<bool> {
        Ok(self.get_user_by_email(email).await?.is_some())
    }

    async fn get_user_by_email(&self, email: &str) -> AccountResult<Option<User>> {
        let model = users::Entity::find()
            .filter(email_matches(email))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn get_seller_by_user(&self, user_id: Uuid) -> AccountResult<Option<Seller>> {
        let model = sellers::Entity::find()
            .filter(sellers::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }
}
