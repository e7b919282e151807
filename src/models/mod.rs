pub mod activity_log;
pub mod admin;
pub mod common;
pub mod contest;
pub mod draw;
pub mod participant;
pub mod prize;
pub mod storage;

pub use activity_log::*;
pub use admin::*;
pub use common::*;
pub use contest::*;
pub use draw::*;
pub use participant::*;
pub use prize::*;
pub use storage::*;
