pub mod activity_log_service;
pub mod admin_service;
pub mod contest_service;
pub mod draw_service;
pub mod participant_service;
pub mod prize_service;

pub use activity_log_service::ActivityLogService;
pub use admin_service::AdminService;
pub use contest_service::ContestService;
pub use draw_service::DrawService;
pub use participant_service::ParticipantService;
pub use prize_service::PrizeService;
