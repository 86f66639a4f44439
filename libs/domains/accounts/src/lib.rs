//! Accounts Domain
//!
//! Registration of shop users and seller profiles. A seller is a staff user
//! with a one-to-one business profile; both rows are written in one
//! transaction.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← POST /users, POST /sellers
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, password policy, hashing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Users and sellers (trait + in-memory + PostgreSQL)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, Seller, registration input
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use core_config::password::PasswordPolicyConfig;
//! use domain_accounts::{handlers, AccountService, PgAccountRepository};
//!
//! let service = AccountService::new(
//!     PgAccountRepository::new(db),
//!     PasswordPolicyConfig::default(),
//! );
//! let (users, sellers) = handlers::routers(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{AccountError, AccountResult};
pub use handlers::ApiDoc;
pub use models::{
    NewSeller, NewUser, RegisterSeller, RegisterUser, Seller, SellerResponse, User, UserResponse,
};
pub use password::{Argon2PasswordHasher, PasswordHasher, PasswordPolicy};
pub use postgres::PgAccountRepository;
pub use repository::{AccountRepository, InMemoryAccountRepository};
pub use service::AccountService;
