pub use sea_orm_migration::prelude::*;

mod m20260512_000001_create_draw_tables;
mod m20260520_000002_add_admin_directory;
mod m20260613_000003_add_participant_tokens;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260512_000001_create_draw_tables::Migration),
            Box::new(m20260520_000002_add_admin_directory::Migration),
            Box::new(m20260613_000003_add_participant_tokens::Migration),
        ]
    }
}
