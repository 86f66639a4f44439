use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Registered account. The login name is the email address.
#[derive(Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("is_staff", &self.is_staff)
            .field("is_active", &self.is_active)
            .field("date_joined", &self.date_joined)
            .finish()
    }
}

impl User {
    pub fn new(input: NewUser) -> Self {
        Self {
            id: Uuid::now_v7(),
            email: input.email,
            username: input.username,
            password_hash: input.password_hash,
            is_staff: input.is_staff,
            is_active: true,
            date_joined: Utc::now(),
        }
    }
}

/// Business profile owned by a staff user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seller {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub address: String,
}

impl Seller {
    pub fn new(user_id: Uuid, input: NewSeller) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            name: input.name,
            address: input.address,
        }
    }
}

/// User row ready to persist; the password is already hashed.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub is_staff: bool,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("is_staff", &self.is_staff)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSeller {
    pub name: String,
    pub address: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// DTO for registering a shopper.
///
/// Absent fields decode as empty strings so they are reported per field.
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct RegisterUser {
    #[validate(email, length(max = 254))]
    #[schema(example = "a@example.com")]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "Str0ng!pwd", format = Password)]
    pub password: String,
}

impl fmt::Debug for RegisterUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUser")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// DTO for registering a seller together with its staff user
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct RegisterSeller {
    #[validate(email, length(max = 254))]
    #[schema(example = "seller@example.com")]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "Str0ng!pwd", format = Password)]
    pub password: String,
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    #[schema(example = "Acme")]
    pub name: String,
    #[validate(length(min = 1, max = 255), custom(function = "not_blank"))]
    #[schema(example = "1 Main St")]
    pub address: String,
}

impl fmt::Debug for RegisterSeller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterSeller")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Registered user as returned by the API; the password is never echoed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self { email: user.email }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SellerResponse {
    pub email: String,
    pub name: String,
    pub address: String,
}

impl From<(User, Seller)> for SellerResponse {
    fn from((user, seller): (User, Seller)) -> Self {
        Self {
            email: user.email,
            name: seller.name,
            address: seller.address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller_input(name: &str, address: &str) -> RegisterSeller {
        RegisterSeller {
            email: "s@x.com".into(),
            password: "Str0ng!pwd".into(),
            name: name.into(),
            address: address.into(),
        }
    }

    #[test]
    fn test_register_user_rejects_bad_email() {
        let input = RegisterUser {
            email: "not-an-email".into(),
            password: "Str0ng!pwd".into(),
        };

        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_register_seller_rejects_blank_name_and_address() {
        let errors = seller_input("   ", "").validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("address"));
    }

    #[test]
    fn test_register_seller_rejects_long_name() {
        let errors = seller_input(&"a".repeat(101), "1 Main St")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_missing_fields_decode_as_blank() {
        let input: RegisterSeller = serde_json::from_str(r#"{"email":"s@x.com"}"#).unwrap();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("address"));
        assert!(!fields.contains_key("email"));
    }

    #[test]
    fn test_register_seller_valid() {
        assert!(seller_input("Acme", "1 Main St").validate().is_ok());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let user = User::new(NewUser {
            email: "a@x.com".into(),
            username: "a@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            is_staff: false,
        });
        let input = RegisterUser {
            email: "a@x.com".into(),
            password: "Str0ng!pwd".into(),
        };

        assert!(!format!("{:?}", user).contains("$argon2id$secret"));
        assert!(!format!("{:?}", input).contains("Str0ng!pwd"));
    }

    #[test]
    fn test_user_serialization_skips_hash() {
        let user = User::new(NewUser {
            email: "a@x.com".into(),
            username: "a@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            is_staff: true,
        });

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["is_staff"], true);
    }

    #[test]
    fn test_seller_response_shape() {
        let user = User::new(NewUser {
            email: "s@x.com".into(),
            username: "s@x.com".into(),
            password_hash: "h".into(),
            is_staff: true,
        });
        let seller = Seller::new(
            user.id,
            NewSeller {
                name: "Acme".into(),
                address: "1 Main St".into(),
            },
        );

        let json = serde_json::to_value(SellerResponse::from((user, seller))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "email": "s@x.com", "name": "Acme", "address": "1 Main St" })
        );
    }
}
