//! SeaORM entities for the catalog tables

use sea_orm::entity::prelude::*;

pub mod products {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "products")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub title: String,
        pub created_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::units::Entity")]
        Units,
        #[sea_orm(has_many = "super::product_tags::Entity")]
        ProductTags,
    }

    impl Related<super::units::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Units.def()
        }
    }

    impl Related<super::product_tags::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::ProductTags.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod tags {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "tags")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::product_tags::Entity")]
        ProductTags,
    }

    impl Related<super::product_tags::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::ProductTags.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod product_tags {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "product_tags")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub product_id: Uuid,
        pub tag_id: Uuid,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::products::Entity",
            from = "Column::ProductId",
            to = "super::products::Column::Id",
            on_delete = "Cascade"
        )]
        Product,
        #[sea_orm(
            belongs_to = "super::tags::Entity",
            from = "Column::TagId",
            to = "super::tags::Column::Id",
            on_delete = "Cascade"
        )]
        Tag,
    }

    impl Related<super::products::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl Related<super::tags::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Tag.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod units {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "units")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub product_id: Uuid,
        #[sea_orm(unique)]
        pub sku: String,
        pub price: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::products::Entity",
            from = "Column::ProductId",
            to = "super::products::Column::Id",
            on_delete = "Cascade"
        )]
        Product,
        #[sea_orm(has_many = "super::unit_images::Entity")]
        Images,
        #[sea_orm(has_many = "super::property_values::Entity")]
        PropertyValues,
    }

    impl Related<super::products::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl Related<super::unit_images::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Images.def()
        }
    }

    impl Related<super::property_values::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::PropertyValues.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod properties {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "properties")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::property_values::Entity")]
        PropertyValues,
    }

    impl Related<super::property_values::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::PropertyValues.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod property_values {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "property_values")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub unit_id: Uuid,
        pub property_id: Uuid,
        pub value: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::units::Entity",
            from = "Column::UnitId",
            to = "super::units::Column::Id",
            on_delete = "Cascade"
        )]
        Unit,
        #[sea_orm(
            belongs_to = "super::properties::Entity",
            from = "Column::PropertyId",
            to = "super::properties::Column::Id",
            on_delete = "Restrict"
        )]
        Property,
    }

    impl Related<super::units::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Unit.def()
        }
    }

    impl Related<super::properties::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Property.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod unit_images {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "unit_images")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub unit_id: Uuid,
        pub path: String,
        pub is_main: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::units::Entity",
            from = "Column::UnitId",
            to = "super::units::Column::Id",
            on_delete = "Cascade"
        )]
        Unit,
    }

    impl Related<super::units::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Unit.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<unit_images::Model> for crate::models::UnitImage {
    fn from(model: unit_images::Model) -> Self {
        Self {
            id: model.id,
            path: model.path,
            is_main: model.is_main,
        }
    }
}
