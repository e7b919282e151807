use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Participants {
    Table,
    UniqueToken,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 每个参与者一个入场 token (uuid)，供签到/核验链接使用
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if !manager.has_column("participants", "unique_token").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Participants::Table)
                        .add_column(
                            ColumnDef::new(Participants::UniqueToken)
                                .string_len(64)
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;
        }

        // 旧数据补 token 后收紧为 NOT NULL
        let conn = manager.get_connection();
        conn.execute(sea_orm::Statement::from_string(
            manager.get_database_backend(),
            "UPDATE participants SET unique_token = gen_random_uuid()::text WHERE unique_token IS NULL"
                .to_owned(),
        ))
        .await?;
        conn.execute(sea_orm::Statement::from_string(
            manager.get_database_backend(),
            "ALTER TABLE participants ALTER COLUMN unique_token SET NOT NULL".to_owned(),
        ))
        .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_participants_token_unique")
                    .table(Participants::Table)
                    .col(Participants::UniqueToken)
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
                    .if_exists()
                    .name("idx_participants_token_unique")
                    .table(Participants::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Participants::Table)
                    .drop_column(Participants::UniqueToken)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
