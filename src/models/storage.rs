use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 单个集合的存储状态
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntityStorageStatus {
    /// 远端数据库是否可用
    pub remote: bool,
    /// 本地兜底文件中的记录数
    pub local_records: u64,
}

/// 全局存储结论，三种集合状态聚合而来
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OverallStorageStatus {
    pub using_remote: bool,
    pub using_local: bool,
    pub is_hybrid: bool,
}

impl OverallStorageStatus {
    /// using_remote 要求全部集合远端可用，using_local 要求全部不可用，其余为 hybrid
    pub fn from_flags(flags: &[bool]) -> Self {
        let using_remote = !flags.is_empty() && flags.iter().all(|&f| f);
        let using_local = !flags.is_empty() && flags.iter().all(|&f| !f);
        OverallStorageStatus {
            using_remote,
            using_local,
            is_hybrid: !using_remote && !using_local,
        }
    }
}

/// 存储状态报告
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StorageStatusResponse {
    pub contests: EntityStorageStatus,
    pub prizes: EntityStorageStatus,
    pub participants: EntityStorageStatus,
    pub overall: OverallStorageStatus,
    pub checked_at: DateTime<Utc>,
}

/// 远端连通性探测结果
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoragePingResponse {
    pub remote_available: bool,
    pub checked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_all_remote() {
        let overall = OverallStorageStatus::from_flags(&[true, true, true]);
        assert!(overall.using_remote);
        assert!(!overall.using_local);
        assert!(!overall.is_hybrid);
    }

    #[test]
    fn test_overall_all_local() {
        let overall = OverallStorageStatus::from_flags(&[false, false, false]);
        assert!(!overall.using_remote);
        assert!(overall.using_local);
        assert!(!overall.is_hybrid);
    }

    #[test]
    fn test_overall_hybrid() {
        let overall = OverallStorageStatus::from_flags(&[true, false, true]);
        assert!(!overall.using_remote);
        assert!(!overall.using_local);
        assert!(overall.is_hybrid);
    }
}
