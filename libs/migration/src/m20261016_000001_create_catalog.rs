use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_uuid(Products::Id))
                    .col(string(Products::Title))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(pk_uuid(Tags::Id))
                    .col(string_uniq(Tags::Name))
                    .to_owned(),
            )
            .await?;

        // Link ids are UUIDv7, so ordering by id is link creation order
        manager
            .create_table(
                Table::create()
                    .table(ProductTags::Table)
                    .if_not_exists()
                    .col(pk_uuid(ProductTags::Id))
                    .col(uuid(ProductTags::ProductId))
                    .col(uuid(ProductTags::TagId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_tags_product_id")
                            .from(ProductTags::Table, ProductTags::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_tags_tag_id")
                            .from(ProductTags::Table, ProductTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_product_tags_product_tag")
                    .table(ProductTags::Table)
                    .col(ProductTags::ProductId)
                    .col(ProductTags::TagId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Units::Table)
                    .if_not_exists()
                    .col(pk_uuid(Units::Id))
                    .col(uuid(Units::ProductId))
                    .col(string_uniq(Units::Sku))
                    .col(big_integer(Units::Price))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_units_product_id")
                            .from(Units::Table, Units::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_units_product_id")
                    .table(Units::Table)
                    .col(Units::ProductId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(pk_uuid(Properties::Id))
                    .col(string_uniq(Properties::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PropertyValues::Table)
                    .if_not_exists()
                    .col(pk_uuid(PropertyValues::Id))
                    .col(uuid(PropertyValues::UnitId))
                    .col(uuid(PropertyValues::PropertyId))
                    .col(string(PropertyValues::Value))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_values_unit_id")
                            .from(PropertyValues::Table, PropertyValues::UnitId)
                            .to(Units::Table, Units::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_values_property_id")
                            .from(PropertyValues::Table, PropertyValues::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_property_values_unit_id")
                    .table(PropertyValues::Table)
                    .col(PropertyValues::UnitId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UnitImages::Table)
                    .if_not_exists()
                    .col(pk_uuid(UnitImages::Id))
                    .col(uuid(UnitImages::UnitId))
                    .col(string(UnitImages::Path))
                    .col(boolean(UnitImages::IsMain).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_unit_images_unit_id")
                            .from(UnitImages::Table, UnitImages::UnitId)
                            .to(Units::Table, Units::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_unit_images_unit_id")
                    .table(UnitImages::Table)
                    .col(UnitImages::UnitId)
                    .to_owned(),
            )
            .await?;

        // At most one main image per unit
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_unit_images_one_main \
                 ON unit_images (unit_id) WHERE is_main",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UnitImages::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PropertyValues::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Properties::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Units::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductTags::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Title,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum ProductTags {
    Table,
    Id,
    ProductId,
    TagId,
}

#[derive(DeriveIden)]
enum Units {
    Table,
    Id,
    ProductId,
    Sku,
    Price,
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum PropertyValues {
    Table,
    Id,
    UnitId,
    PropertyId,
    Value,
}

#[derive(DeriveIden)]
enum UnitImages {
    Table,
    Id,
    UnitId,
    Path,
    IsMain,
}
