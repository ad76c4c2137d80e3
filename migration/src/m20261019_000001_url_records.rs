use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 url_records 表，id 由数据库自增分配
        manager
            .create_table(
                Table::create()
                    .table(UrlRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UrlRecord::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UrlRecord::OriginalUrl).text().not_null())
                    .col(ColumnDef::new(UrlRecord::ShortCode).string_len(16).null())
                    .col(
                        ColumnDef::new(UrlRecord::ClickCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UrlRecord::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 短码唯一索引（NULL 不参与唯一性比较）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_url_records_short_code")
                    .table(UrlRecord::Table)
                    .col(UrlRecord::ShortCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_url_records_short_code")
                    .table(UrlRecord::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(UrlRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UrlRecord {
    #[sea_orm(iden = "url_records")]
    Table,
    Id,
    OriginalUrl,
    ShortCode,
    ClickCount,
    CreatedAt,
}
