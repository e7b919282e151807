pub mod activity_log;
pub mod admin;
pub mod contest;
pub mod draw;
pub mod participant;
pub mod prize;
pub mod storage;

pub use activity_log::activity_log_config;
pub use admin::admin_config;
pub use contest::contest_config;
pub use draw::draw_config;
pub use participant::participant_config;
pub use prize::prize_config;
pub use storage::storage_config;
