use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enum for the table & columns -----
#[derive(Iden)]
enum Feedbacks {
    Table,
    Id,
    Type,
    Department,
    TargetRole,
    TargetName,
    Description,
    SubmitterName,
    SubmitterPhone,
    IpAddress,
    Status,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // if_not_exists: deployments that already carry a feedbacks table keep it as-is
        manager
            .create_table(
                Table::create()
                    .table(Feedbacks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedbacks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedbacks::Type).string_len(50).null())
                    .col(ColumnDef::new(Feedbacks::Department).string_len(100).null())
                    .col(ColumnDef::new(Feedbacks::TargetRole).string_len(100).null())
                    .col(ColumnDef::new(Feedbacks::TargetName).string_len(100).null())
                    .col(ColumnDef::new(Feedbacks::Description).text().null())
                    .col(ColumnDef::new(Feedbacks::SubmitterName).string_len(100).null())
                    .col(ColumnDef::new(Feedbacks::SubmitterPhone).string_len(50).null())
                    .col(ColumnDef::new(Feedbacks::IpAddress).string_len(50).null())
                    .col(
                        ColumnDef::new(Feedbacks::Status)
                            .string_len(20)
                            .null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Feedbacks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Feedbacks::Table).if_exists().to_owned())
            .await
    }
}
