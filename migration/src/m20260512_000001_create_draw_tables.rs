use sea_orm_migration::prelude::*;

/// Contests (抽奖活动表)
#[derive(DeriveIden)]
enum Contests {
    Table,
    ContestId,
    Name,
    Theme,
    Description,
    StartDate,
    EndDate,
    Status,
    EntryRules,
    CreatedBy,
    QrCodeUrl,
    CreatedAt,
    UpdatedAt,
}

/// Prizes (奖品表，属于某个活动)
#[derive(DeriveIden)]
enum Prizes {
    Table,
    PrizeId,
    ContestId,
    PrizeName,
    ValueCents,
    Quantity,
    Description,
    CreatedAt,
    UpdatedAt,
}

/// Participants (参与者报名表)
#[derive(DeriveIden)]
enum Participants {
    Table,
    ParticipantId,
    ContestId,
    Name,
    Contact,
    Validated,
    IsDuplicate,
    EntryTimestamp,
}

/// Draws (开奖批次表)
#[derive(DeriveIden)]
enum Draws {
    Table,
    DrawId,
    ContestId,
    ExecutedBy,
    DrawMode,
    TotalWinners,
    ExecutedAt,
}

/// Winners (中奖记录表)
#[derive(DeriveIden)]
enum Winners {
    Table,
    WinnerId,
    DrawId,
    ParticipantId,
    PrizeId,
    Notified,
    NotifiedAt,
    PrizeStatus,
    ClaimedAt,
    DispatchedAt,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 初始五张表：contests -> prizes / participants -> draws -> winners
/// 状态列统一存 SCREAMING_SNAKE 字符串，与应用层 enum 对应
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 活动表
        manager
            .create_table(
                Table::create()
                    .table(Contests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contests::ContestId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contests::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Contests::Theme).string_len(255).null())
                    .col(ColumnDef::new(Contests::Description).text().null())
                    .col(
                        ColumnDef::new(Contests::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contests::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contests::Status)
                            .string_len(32)
                            .not_null()
                            .default("DRAFT"),
                    )
                    .col(ColumnDef::new(Contests::EntryRules).string_len(32).null())
                    .col(ColumnDef::new(Contests::CreatedBy).big_integer().null())
                    .col(ColumnDef::new(Contests::QrCodeUrl).text().null())
                    .col(
                        ColumnDef::new(Contests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Contests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 按状态筛选活动列表
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_contests_status")
                    .table(Contests::Table)
                    .col(Contests::Status)
                    .to_owned(),
            )
            .await?;

        // 奖品表
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::PrizeId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::ContestId).big_integer().not_null())
                    .col(ColumnDef::new(Prizes::PrizeName).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Prizes::ValueCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Prizes::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Prizes::Description).text().null())
                    .col(
                        ColumnDef::new(Prizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Prizes::UpdatedAt)
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
                    .name("idx_prizes_contest")
                    .table(Prizes::Table)
                    .col(Prizes::ContestId)
                    .to_owned(),
            )
            .await?;

        // 参与者表
        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participants::ParticipantId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Participants::ContestId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::Contact)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::Validated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Participants::IsDuplicate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Participants::EntryTimestamp)
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
                    .name("idx_participants_contest")
                    .table(Participants::Table)
                    .col(Participants::ContestId)
                    .to_owned(),
            )
            .await?;

        // 重复报名检测走 (contest_id, contact)，业务层判断，不做唯一约束
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_participants_contest_contact")
                    .table(Participants::Table)
                    .col(Participants::ContestId)
                    .col(Participants::Contact)
                    .to_owned(),
            )
            .await?;

        // 开奖批次表
        manager
            .create_table(
                Table::create()
                    .table(Draws::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Draws::DrawId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Draws::ContestId).big_integer().not_null())
                    .col(ColumnDef::new(Draws::ExecutedBy).big_integer().not_null())
                    .col(ColumnDef::new(Draws::DrawMode).string_len(16).not_null())
                    .col(ColumnDef::new(Draws::TotalWinners).integer().not_null())
                    .col(
                        ColumnDef::new(Draws::ExecutedAt)
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
                    .name("idx_draws_contest")
                    .table(Draws::Table)
                    .col(Draws::ContestId)
                    .to_owned(),
            )
            .await?;

        // 中奖记录表
        manager
            .create_table(
                Table::create()
                    .table(Winners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Winners::WinnerId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Winners::DrawId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Winners::ParticipantId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Winners::PrizeId).big_integer().null())
                    .col(
                        ColumnDef::new(Winners::Notified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Winners::NotifiedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Winners::PrizeStatus)
                            .string_len(16)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Winners::ClaimedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Winners::DispatchedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Winners::CreatedAt)
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
                    .name("idx_winners_draw")
                    .table(Winners::Table)
                    .col(Winners::DrawId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_winners_participant")
                    .table(Winners::Table)
                    .col(Winners::ParticipantId)
                    .to_owned(),
            )
            .await?;

        // 外键：删活动连带清理奖品/参与者/批次；删批次连带清理中奖记录
        // 奖品被删时中奖记录保留（prize_id 置空）
        manager
            .alter_table(
                Table::alter()
                    .table(Prizes::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_prizes_contest")
                            .from_tbl(Prizes::Table)
                            .from_col(Prizes::ContestId)
                            .to_tbl(Contests::Table)
                            .to_col(Contests::ContestId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Participants::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_participants_contest")
                            .from_tbl(Participants::Table)
                            .from_col(Participants::ContestId)
                            .to_tbl(Contests::Table)
                            .to_col(Contests::ContestId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Draws::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_draws_contest")
                            .from_tbl(Draws::Table)
                            .from_col(Draws::ContestId)
                            .to_tbl(Contests::Table)
                            .to_col(Contests::ContestId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Winners::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_winners_draw")
                            .from_tbl(Winners::Table)
                            .from_col(Winners::DrawId)
                            .to_tbl(Draws::Table)
                            .to_col(Draws::DrawId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Winners::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_winners_participant")
                            .from_tbl(Winners::Table)
                            .from_col(Winners::ParticipantId)
                            .to_tbl(Participants::Table)
                            .to_col(Participants::ParticipantId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Winners::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_winners_prize")
                            .from_tbl(Winners::Table)
                            .from_col(Winners::PrizeId)
                            .to_tbl(Prizes::Table)
                            .to_col(Prizes::PrizeId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：winners -> draws -> participants -> prizes -> contests
        manager
            .drop_table(Table::drop().if_exists().table(Winners::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Draws::Table).to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Participants::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Contests::Table).to_owned())
            .await?;

        Ok(())
    }
}
