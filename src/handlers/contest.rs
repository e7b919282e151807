use crate::models::*;
use crate::services::ContestService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/contests",
    tag = "contests",
    request_body = CreateContestRequest,
    responses(
        (status = 200, description = "创建活动成功", body = ContestResponse),
        (status = 400, description = "请求参数错误"),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn create_contest(
    service: web::Data<ContestService>,
    request: web::Json<CreateContestRequest>,
) -> Result<HttpResponse> {
    match service.create_contest(request.into_inner()).await {
        Ok(contest) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": contest
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/contests",
    tag = "contests",
    params(
        ("status" = Option<ContestStatus>, Query, description = "按状态筛选")
    ),
    responses(
        (status = 200, description = "获取活动列表成功", body = [ContestResponse])
    )
)]
pub async fn get_contests(
    service: web::Data<ContestService>,
    query: web::Query<ContestQuery>,
) -> Result<HttpResponse> {
    match service.get_contests(query.into_inner().status).await {
        Ok(contests) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": contests }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/contests/active",
    tag = "contests",
    responses(
        (status = 200, description = "获取进行中活动成功", body = [ContestResponse])
    )
)]
/// 进行中 = 状态 ONGOING 且当前时间落在报名窗口内
pub async fn get_active_contests(service: web::Data<ContestService>) -> Result<HttpResponse> {
    match service.get_active_contests().await {
        Ok(contests) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": contests }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/contests/{id}",
    tag = "contests",
    params(
        ("id" = i64, Path, description = "活动ID")
    ),
    responses(
        (status = 200, description = "获取活动成功", body = ContestResponse),
        (status = 404, description = "活动不存在")
    )
)]
pub async fn get_contest(
    service: web::Data<ContestService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_contest(path.into_inner()).await {
        Ok(contest) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": contest }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/contests/{id}",
    tag = "contests",
    params(
        ("id" = i64, Path, description = "活动ID")
    ),
    request_body = UpdateContestRequest,
    responses(
        (status = 200, description = "更新活动成功", body = ContestResponse),
        (status = 400, description = "请求参数错误"),
        (status = 404, description = "活动不存在")
    )
)]
pub async fn update_contest(
    service: web::Data<ContestService>,
    path: web::Path<i64>,
    request: web::Json<UpdateContestRequest>,
) -> Result<HttpResponse> {
    match service
        .update_contest(path.into_inner(), request.into_inner())
        .await
    {
        Ok(contest) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": contest }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/contests/{id}",
    tag = "contests",
    params(
        ("id" = i64, Path, description = "活动ID")
    ),
    responses(
        (status = 200, description = "删除活动成功"),
        (status = 404, description = "活动不存在")
    )
)]
pub async fn delete_contest(
    service: web::Data<ContestService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete_contest(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": null }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
/// 静态段 /active 必须先于 /{id} 注册
pub fn contest_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contests")
            .route("", web::post().to(create_contest))
            .route("", web::get().to(get_contests))
            .route("/active", web::get().to(get_active_contests))
            .route("/{id}", web::get().to(get_contest))
            .route("/{id}", web::put().to(update_contest))
            .route("/{id}", web::delete().to(delete_contest)),
    );
}
