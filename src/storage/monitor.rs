use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::models::{OverallStorageStatus, StoragePingResponse, StorageStatusResponse};
use crate::storage::{ContestStore, ParticipantStore, PrizeStore};

/// 存储健康监视器，聚合三个集合的远端/本地状态
#[derive(Clone)]
pub struct StorageMonitor {
    pool: DatabaseConnection,
    contests: ContestStore,
    prizes: PrizeStore,
    participants: ParticipantStore,
}

impl StorageMonitor {
    pub fn new(
        pool: DatabaseConnection,
        contests: ContestStore,
        prizes: PrizeStore,
        participants: ParticipantStore,
    ) -> Self {
        StorageMonitor {
            pool,
            contests,
            prizes,
            participants,
        }
    }

    pub async fn status(&self) -> StorageStatusResponse {
        let contests = self.contests.status().await;
        let prizes = self.prizes.status().await;
        let participants = self.participants.status().await;
        let overall = OverallStorageStatus::from_flags(&[
            contests.remote,
            prizes.remote,
            participants.remote,
        ]);
        StorageStatusResponse {
            contests,
            prizes,
            participants,
            overall,
            checked_at: Utc::now(),
        }
    }

    /// 数据库连通性探测，不看集合内容
    pub async fn ping(&self) -> StoragePingResponse {
        let remote_available = self.pool.ping().await.is_ok();
        StoragePingResponse {
            remote_available,
            checked_at: Utc::now(),
        }
    }

    /// 启动时打一份存储状态报告
    pub async fn log_report(&self) {
        let status = self.status().await;
        if status.overall.using_remote {
            log::info!("Storage report: all collections served from remote database");
        } else if status.overall.using_local {
            log::warn!(
                "Storage report: remote database unavailable or empty, serving from local files ({} contests, {} prizes, {} participants)",
                status.contests.local_records,
                status.prizes.local_records,
                status.participants.local_records
            );
        } else {
            log::warn!(
                "Storage report: hybrid mode (contests remote={}, prizes remote={}, participants remote={})",
                status.contests.remote,
                status.prizes.remote,
                status.participants.remote
            );
        }
    }
}
