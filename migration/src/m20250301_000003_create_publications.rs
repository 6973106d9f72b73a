use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Notifications::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Notifications::Code).string().not_null())
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Content).text().not_null())
                    .col(ColumnDef::new(Notifications::NotificationType).string().not_null())
                    .col(ColumnDef::new(Notifications::Target).string().not_null())
                    .col(ColumnDef::new(Notifications::TargetUser).string().null())
                    .col(ColumnDef::new(Notifications::Status).string().not_null())
                    .col(ColumnDef::new(Notifications::Version).integer().not_null().default(1))
                    .col(ColumnDef::new(Notifications::Active).boolean().not_null().default(true))
                    .col(ColumnDef::new(Notifications::CreatorId).string().not_null())
                    .col(ColumnDef::new(Notifications::ModifierId).string().null())
                    .col(ColumnDef::new(Notifications::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Notifications::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(News::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(News::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(News::Code).string().not_null())
                    .col(ColumnDef::new(News::Title).string().not_null())
                    .col(ColumnDef::new(News::Content).text().not_null())
                    .col(ColumnDef::new(News::Category).string().not_null())
                    .col(ColumnDef::new(News::Author).string().not_null())
                    .col(ColumnDef::new(News::NewsType).string().not_null())
                    .col(ColumnDef::new(News::Status).string().not_null())
                    .col(ColumnDef::new(News::View).big_integer().not_null().default(0))
                    .col(ColumnDef::new(News::Version).integer().not_null().default(1))
                    .col(ColumnDef::new(News::Active).boolean().not_null().default(true))
                    .col(ColumnDef::new(News::CreatorId).string().not_null())
                    .col(ColumnDef::new(News::ModifierId).string().null())
                    .col(ColumnDef::new(News::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(News::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(News::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    Code,
    Title,
    Content,
    NotificationType,
    Target,
    TargetUser,
    Status,
    Version,
    Active,
    CreatorId,
    ModifierId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum News {
    Table,
    Id,
    Code,
    Title,
    Content,
    Category,
    Author,
    NewsType,
    Status,
    View,
    Version,
    Active,
    CreatorId,
    ModifierId,
    CreatedAt,
    UpdatedAt,
}
