use crate::models::*;
use crate::storage::StorageMonitor;
use actix_web::{HttpResponse, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/storage/status",
    tag = "storage",
    responses(
        (status = 200, description = "获取存储状态成功", body = StorageStatusResponse)
    )
)]
/// 各集合远端可用性与本地兜底记录数
/// remote = 远端可达且该集合非空
pub async fn get_storage_status(monitor: web::Data<StorageMonitor>) -> Result<HttpResponse> {
    let status = monitor.status().await;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": status })))
}

#[utoipa::path(
    get,
    path = "/storage/ping",
    tag = "storage",
    responses(
        (status = 200, description = "探测完成", body = StoragePingResponse)
    )
)]
/// 纯连通性探测，不看集合内容
pub async fn ping_storage(monitor: web::Data<StorageMonitor>) -> Result<HttpResponse> {
    let ping = monitor.ping().await;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": ping })))
}

/// 路由配置
pub fn storage_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/storage")
            .route("/status", web::get().to(get_storage_status))
            .route("/ping", web::get().to(ping_storage)),
    );
}
