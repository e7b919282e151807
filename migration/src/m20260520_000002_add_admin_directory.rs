use sea_orm_migration::prelude::*;

/// Admins (管理员账号表，密码存 bcrypt hash)
#[derive(DeriveIden)]
enum Admins {
    Table,
    AdminId,
    Name,
    Email,
    PasswordHash,
    Role,
    TwoFactor,
    CreatedAt,
    LastLogin,
}

/// Admin Activity Log (管理员操作审计表，只追加)
#[derive(DeriveIden)]
enum AdminActivityLog {
    Table,
    LogId,
    AdminId,
    Action,
    TargetTable,
    TargetId,
    Status,
    Timestamp,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// admin_id 不加外键：管理员被删除后审计记录与历史开奖仍需保留
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admins::AdminId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Admins::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Admins::Email).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Admins::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Admins::Role)
                            .string_len(16)
                            .not_null()
                            .default("MODERATOR"),
                    )
                    .col(
                        ColumnDef::new(Admins::TwoFactor)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Admins::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Admins::LastLogin)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 邮箱登录，唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_admins_email_unique")
                    .table(Admins::Table)
                    .col(Admins::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminActivityLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminActivityLog::LogId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdminActivityLog::AdminId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminActivityLog::Action)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminActivityLog::TargetTable)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminActivityLog::TargetId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AdminActivityLog::Status)
                            .string_len(16)
                            .not_null()
                            .default("SUCCESS"),
                    )
                    .col(
                        ColumnDef::new(AdminActivityLog::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_admin_activity_log_admin")
                    .table(AdminActivityLog::Table)
                    .col(AdminActivityLog::AdminId)
                    .to_owned(),
            )
            .await?;

        // 审计列表按时间倒序分页
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_admin_activity_log_timestamp")
                    .table(AdminActivityLog::Table)
                    .col(AdminActivityLog::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(AdminActivityLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Admins::Table).to_owned())
            .await?;

        Ok(())
    }
}
