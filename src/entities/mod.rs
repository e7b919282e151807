pub mod admin_activity_log;
pub mod admins;
pub mod contests;
pub mod draws;
pub mod participants;
pub mod prizes;
pub mod winners;

pub use admin_activity_log as activity_log_entity;
pub use admins as admin_entity;
pub use contests as contest_entity;
pub use draws as draw_entity;
pub use participants as participant_entity;
pub use prizes as prize_entity;
pub use winners as winner_entity;
