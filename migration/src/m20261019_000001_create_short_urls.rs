use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShortUrl::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShortUrl::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ShortUrl::OriginalUrl)
                            .string_len(2048)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShortUrl::ShortCode)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShortUrl::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShortUrl::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ShortUrl::VisitCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // The unique index is what arbitrates concurrent inserts of the same code.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_short_urls_short_code")
                    .table(ShortUrl::Table)
                    .col(ShortUrl::ShortCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_urls_expires_at")
                    .table(ShortUrl::Table)
                    .col(ShortUrl::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_short_urls_expires_at")
                    .table(ShortUrl::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("uq_short_urls_short_code")
                    .table(ShortUrl::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ShortUrl::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShortUrl {
    #[sea_orm(iden = "short_urls")]
    Table,
    Id,
    OriginalUrl,
    ShortCode,
    CreatedAt,
    ExpiresAt,
    VisitCount,
}
