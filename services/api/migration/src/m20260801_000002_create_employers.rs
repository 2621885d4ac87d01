use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employers::Name).string().not_null())
                    .col(
                        ColumnDef::new(Employers::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employers::CompanyName).string().not_null())
                    .col(
                        ColumnDef::new(Employers::Verified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Employers::Status)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Employers::Website).string())
                    .col(ColumnDef::new(Employers::Location).string())
                    .col(ColumnDef::new(Employers::Phone).string())
                    .col(ColumnDef::new(Employers::Description).text())
                    .col(ColumnDef::new(Employers::OwnerUserId).uuid())
                    .col(
                        ColumnDef::new(Employers::Version)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Employers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Employers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employers_owner_user_id")
                    .table(Employers::Table)
                    .col(Employers::OwnerUserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Employers {
    Table,
    Id,
    Name,
    Email,
    CompanyName,
    Verified,
    Status,
    Website,
    Location,
    Phone,
    Description,
    OwnerUserId,
    Version,
    CreatedAt,
    UpdatedAt,
}
