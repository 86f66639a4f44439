//! SeaORM entities for the account tables

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::models::{Seller, User};

pub mod users {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub email: String,
        #[sea_orm(unique)]
        pub username: String,
        pub password_hash: String,
        pub is_staff: bool,
        pub is_active: bool,
        pub date_joined: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_one = "super::sellers::Entity")]
        Seller,
    }

    impl Related<super::sellers::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Seller.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod sellers {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "sellers")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub user_id: Uuid,
        pub name: String,
        pub address: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::users::Entity",
            from = "Column::UserId",
            to = "super::users::Column::Id",
            on_delete = "Cascade"
        )]
        User,
    }

    impl Related<super::users::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::User.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            username: model.username,
            password_hash: model.password_hash,
            is_staff: model.is_staff,
            is_active: model.is_active,
            date_joined: model.date_joined.into(),
        }
    }
}

impl From<&User> for users::ActiveModel {
    fn from(user: &User) -> Self {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            password_hash: Set(user.password_hash.clone()),
            is_staff: Set(user.is_staff),
            is_active: Set(user.is_active),
            date_joined: Set(user.date_joined.into()),
        }
    }
}

impl From<sellers::Model> for Seller {
    fn from(model: sellers::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            address: model.address,
        }
    }
}

impl From<&Seller> for sellers::ActiveModel {
    fn from(seller: &Seller) -> Self {
        sellers::ActiveModel {
            id: Set(seller.id),
            user_id: Set(seller.user_id),
            name: Set(seller.name.clone()),
            address: Set(seller.address.clone()),
        }
    }
}
