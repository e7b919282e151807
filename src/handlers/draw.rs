use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/draws/random",
    tag = "draws",
    request_body = RandomDrawRequest,
    responses(
        (status = 200, description = "开奖成功", body = DrawResponse),
        (status = 400, description = "中奖人数超出抽奖池或参数错误"),
        (status = 409, description = "抽奖池为空")
    )
)]
/// 随机开奖:
/// 1. 校验中奖人数
/// 2. 取该活动全部已核验报名作为抽奖池
/// 3. 无偏洗牌后抽取，批次与中奖记录同一事务落库
pub async fn execute_random_draw(
    service: web::Data<DrawService>,
    request: web::Json<RandomDrawRequest>,
) -> Result<HttpResponse> {
    match service.execute_random_draw(request.into_inner()).await {
        Ok(draw) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": draw
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draws/manual",
    tag = "draws",
    request_body = ManualDrawRequest,
    responses(
        (status = 200, description = "开奖成功", body = DrawResponse),
        (status = 400, description = "选择了不存在或未核验的报名")
    )
)]
/// 手动开奖：按请求顺序指定中奖者，全部必须是该活动的已核验报名
pub async fn execute_manual_draw(
    service: web::Data<DrawService>,
    request: web::Json<ManualDrawRequest>,
) -> Result<HttpResponse> {
    match service.execute_manual_draw(request.into_inner()).await {
        Ok(draw) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": draw
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/draws/{id}",
    tag = "draws",
    params(
        ("id" = i64, Path, description = "开奖批次ID")
    ),
    responses(
        (status = 200, description = "获取开奖批次成功", body = DrawResponse),
        (status = 404, description = "批次不存在")
    )
)]
pub async fn get_draw(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_draw(path.into_inner()).await {
        Ok(draw) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": draw }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/contests/{contest_id}/draws",
    tag = "draws",
    params(
        ("contest_id" = i64, Path, description = "活动ID")
    ),
    responses(
        (status = 200, description = "获取活动开奖批次成功", body = [DrawResponse])
    )
)]
pub async fn get_draws_by_contest(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_draws_by_contest(path.into_inner()).await {
        Ok(draws) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": draws }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/contests/{contest_id}/winners",
    tag = "draws",
    params(
        ("contest_id" = i64, Path, description = "活动ID")
    ),
    responses(
        (status = 200, description = "获取活动中奖记录成功", body = [WinnerResponse])
    )
)]
pub async fn get_winners_by_contest(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_winners_by_contest(path.into_inner()).await {
        Ok(winners) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": winners }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/winners/{id}/notification",
    tag = "draws",
    params(
        ("id" = i64, Path, description = "中奖记录ID")
    ),
    request_body = UpdateNotificationRequest,
    responses(
        (status = 200, description = "更新通知状态成功", body = WinnerResponse),
        (status = 404, description = "中奖记录不存在")
    )
)]
pub async fn update_winner_notification(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
    request: web::Json<UpdateNotificationRequest>,
) -> Result<HttpResponse> {
    match service
        .update_winner_notification(path.into_inner(), request.notified)
        .await
    {
        Ok(winner) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": winner }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/winners/{id}/status",
    tag = "draws",
    params(
        ("id" = i64, Path, description = "中奖记录ID")
    ),
    request_body = UpdateWinnerStatusRequest,
    responses(
        (status = 200, description = "更新发奖状态成功", body = WinnerResponse),
        (status = 400, description = "状态不允许回退"),
        (status = 404, description = "中奖记录不存在")
    )
)]
/// 发奖状态推进 PENDING -> NOTIFIED -> CLAIMED -> DISPATCHED -> DELIVERED，只进不退
pub async fn update_winner_status(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
    request: web::Json<UpdateWinnerStatusRequest>,
) -> Result<HttpResponse> {
    match service
        .update_winner_status(path.into_inner(), request.into_inner().prize_status)
        .await
    {
        Ok(winner) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": winner }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/contests/{contest_id}/draws",
        web::get().to(get_draws_by_contest),
    );
    cfg.route(
        "/contests/{contest_id}/winners",
        web::get().to(get_winners_by_contest),
    );
    cfg.service(
        web::scope("/draws")
            .route("/random", web::post().to(execute_random_draw))
            .route("/manual", web::post().to(execute_manual_draw))
            .route("/{id}", web::get().to(get_draw)),
    );
    cfg.service(
        web::scope("/winners")
            .route("/{id}/notification", web::put().to(update_winner_notification))
            .route("/{id}/status", web::put().to(update_winner_status)),
    );
}
