use crate::models::*;
use crate::services::ActivityLogService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/activity-log",
    tag = "activity_log",
    params(
        ("admin_id" = Option<i64>, Query, description = "按管理员筛选"),
        ("limit" = Option<u64>, Query, description = "返回条数 (默认50)")
    ),
    responses(
        (status = 200, description = "获取审计日志成功", body = [ActivityLogResponse])
    )
)]
/// 最近的审计日志，新的在前
pub async fn get_activity_log(
    service: web::Data<ActivityLogService>,
    query: web::Query<ActivityLogQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    match service.recent(query.admin_id, query.limit).await {
        Ok(entries) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": entries }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn activity_log_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/activity-log", web::get().to(get_activity_log));
}
