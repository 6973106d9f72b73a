use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Principals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Principals::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Principals::IdentityNo).string().not_null())
                    .col(ColumnDef::new(Principals::PasswordHash).string().null())
                    .col(ColumnDef::new(Principals::WalletAddress).string().null())
                    .col(ColumnDef::new(Principals::FullName).string().null())
                    .col(ColumnDef::new(Principals::Role).string().null())
                    .col(ColumnDef::new(Principals::Version).integer().not_null().default(1))
                    .col(ColumnDef::new(Principals::Active).boolean().not_null().default(true))
                    .col(ColumnDef::new(Principals::CreatorId).string().null())
                    .col(ColumnDef::new(Principals::ModifierId).string().null())
                    .col(ColumnDef::new(Principals::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Principals::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Identity numbers are never reused, even after a soft delete
        manager
            .create_index(
                Index::create()
                    .name("idx_principals_identity_no")
                    .table(Principals::Table)
                    .col(Principals::IdentityNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // NULLs do not collide, so wallet-less principals are unaffected
        manager
            .create_index(
                Index::create()
                    .name("idx_principals_wallet_address")
                    .table(Principals::Table)
                    .col(Principals::WalletAddress)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Principals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Principals {
    Table,
    Id,
    IdentityNo,
    PasswordHash,
    WalletAddress,
    FullName,
    Role,
    Version,
    Active,
    CreatorId,
    ModifierId,
    CreatedAt,
    UpdatedAt,
}
