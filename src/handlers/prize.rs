use crate::models::*;
use crate::services::PrizeService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/prizes",
    tag = "prizes",
    request_body = CreatePrizeRequest,
    responses(
        (status = 200, description = "创建奖品成功", body = PrizeResponse),
        (status = 400, description = "请求参数错误")
    )
)]
pub async fn create_prize(
    service: web::Data<PrizeService>,
    request: web::Json<CreatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.create_prize(request.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": prize
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/prizes",
    tag = "prizes",
    responses(
        (status = 200, description = "获取奖品列表成功", body = [PrizeResponse])
    )
)]
pub async fn get_prizes(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match service.get_prizes().await {
        Ok(prizes) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prizes }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/prizes/{id}",
    tag = "prizes",
    params(
        ("id" = i64, Path, description = "奖品ID")
    ),
    responses(
        (status = 200, description = "获取奖品成功", body = PrizeResponse),
        (status = 404, description = "奖品不存在")
    )
)]
pub async fn get_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_prize(path.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/prizes/{id}",
    tag = "prizes",
    params(
        ("id" = i64, Path, description = "奖品ID")
    ),
    request_body = UpdatePrizeRequest,
    responses(
        (status = 200, description = "更新奖品成功", body = PrizeResponse),
        (status = 400, description = "请求参数错误"),
        (status = 404, description = "奖品不存在")
    )
)]
pub async fn update_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
    request: web::Json<UpdatePrizeRequest>,
) -> Result<HttpResponse> {
    match service
        .update_prize(path.into_inner(), request.into_inner())
        .await
    {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/prizes/{id}",
    tag = "prizes",
    params(
        ("id" = i64, Path, description = "奖品ID")
    ),
    responses(
        (status = 200, description = "删除奖品成功"),
        (status = 404, description = "奖品不存在")
    )
)]
pub async fn delete_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete_prize(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": null }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/contests/{contest_id}/prizes",
    tag = "prizes",
    params(
        ("contest_id" = i64, Path, description = "活动ID")
    ),
    responses(
        (status = 200, description = "获取活动奖品成功", body = [PrizeResponse])
    )
)]
pub async fn get_prizes_by_contest(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_prizes_by_contest(path.into_inner()).await {
        Ok(prizes) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prizes }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/contests/{contest_id}/prizes/available",
    tag = "prizes",
    params(
        ("contest_id" = i64, Path, description = "活动ID")
    ),
    responses(
        (status = 200, description = "获取未抽完奖品成功", body = [PrizeResponse])
    )
)]
/// 尚有剩余库存（中奖数 < 数量）的奖品
pub async fn get_available_prizes(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.available_prizes(path.into_inner()).await {
        Ok(prizes) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prizes }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/contests/{contest_id}/prizes/stats",
    tag = "prizes",
    params(
        ("contest_id" = i64, Path, description = "活动ID")
    ),
    responses(
        (status = 200, description = "获取奖品统计成功", body = PrizeStatsResponse)
    )
)]
pub async fn get_prize_stats(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.prize_stats(path.into_inner()).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": stats }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
/// 活动维度的子路由必须先于 /contests 作用域注册，否则会被吞掉
pub fn prize_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contests/{contest_id}/prizes")
            .route("", web::get().to(get_prizes_by_contest))
            .route("/available", web::get().to(get_available_prizes))
            .route("/stats", web::get().to(get_prize_stats)),
    );
    cfg.service(
        web::scope("/prizes")
            .route("", web::post().to(create_prize))
            .route("", web::get().to(get_prizes))
            .route("/{id}", web::get().to(get_prize))
            .route("/{id}", web::put().to(update_prize))
            .route("/{id}", web::delete().to(delete_prize)),
    );
}
