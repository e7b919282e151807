use crate::models::*;
use crate::services::ParticipantService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/participants",
    tag = "participants",
    request_body = AddParticipantRequest,
    responses(
        (status = 200, description = "报名成功", body = ParticipantResponse),
        (status = 400, description = "联系方式无效或重复报名"),
        (status = 404, description = "活动不存在")
    )
)]
/// 报名：校验联系方式，按活动报名规则处理重复，生成唯一令牌
pub async fn add_participant(
    service: web::Data<ParticipantService>,
    request: web::Json<AddParticipantRequest>,
) -> Result<HttpResponse> {
    match service.add_participant(request.into_inner()).await {
        Ok(participant) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": participant
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/participants/{id}",
    tag = "participants",
    params(
        ("id" = i64, Path, description = "报名ID")
    ),
    responses(
        (status = 200, description = "获取报名成功", body = ParticipantResponse),
        (status = 404, description = "报名不存在")
    )
)]
pub async fn get_participant(
    service: web::Data<ParticipantService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_participant(path.into_inner()).await {
        Ok(participant) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": participant })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/participants/token/{token}",
    tag = "participants",
    params(
        ("token" = String, Path, description = "报名唯一令牌")
    ),
    responses(
        (status = 200, description = "获取报名成功", body = ParticipantResponse),
        (status = 404, description = "令牌无效")
    )
)]
pub async fn get_participant_by_token(
    service: web::Data<ParticipantService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match service.get_participant_by_token(&path.into_inner()).await {
        Ok(participant) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": participant })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/participants/{id}",
    tag = "participants",
    params(
        ("id" = i64, Path, description = "报名ID")
    ),
    request_body = UpdateParticipantRequest,
    responses(
        (status = 200, description = "更新报名成功", body = ParticipantResponse),
        (status = 400, description = "请求参数错误"),
        (status = 404, description = "报名不存在")
    )
)]
pub async fn update_participant(
    service: web::Data<ParticipantService>,
    path: web::Path<i64>,
    request: web::Json<UpdateParticipantRequest>,
) -> Result<HttpResponse> {
    match service
        .update_participant(path.into_inner(), request.into_inner())
        .await
    {
        Ok(participant) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": participant })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/participants/{id}/validation",
    tag = "participants",
    params(
        ("id" = i64, Path, description = "报名ID")
    ),
    request_body = UpdateValidationRequest,
    responses(
        (status = 200, description = "更新核验状态成功", body = ParticipantResponse),
        (status = 404, description = "报名不存在")
    )
)]
/// 核验开关：只有已核验报名才能进入抽奖池
pub async fn update_validation(
    service: web::Data<ParticipantService>,
    path: web::Path<i64>,
    request: web::Json<UpdateValidationRequest>,
) -> Result<HttpResponse> {
    match service
        .update_validation(path.into_inner(), request.validated)
        .await
    {
        Ok(participant) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": participant })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/contests/{contest_id}/participants",
    tag = "participants",
    params(
        ("contest_id" = i64, Path, description = "活动ID")
    ),
    responses(
        (status = 200, description = "获取活动报名成功", body = [ParticipantResponse])
    )
)]
pub async fn get_participants_by_contest(
    service: web::Data<ParticipantService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_participants_by_contest(path.into_inner()).await {
        Ok(participants) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": participants })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/contests/{contest_id}/participants/validated",
    tag = "participants",
    params(
        ("contest_id" = i64, Path, description = "活动ID")
    ),
    responses(
        (status = 200, description = "获取已核验报名成功", body = [ParticipantResponse])
    )
)]
pub async fn get_validated_participants(
    service: web::Data<ParticipantService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_validated_participants(path.into_inner()).await {
        Ok(participants) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": participants })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/contests/{contest_id}/participants/stats",
    tag = "participants",
    params(
        ("contest_id" = i64, Path, description = "活动ID")
    ),
    responses(
        (status = 200, description = "获取报名统计成功", body = ParticipantStatsResponse)
    )
)]
pub async fn get_participant_stats(
    service: web::Data<ParticipantService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.participant_stats(path.into_inner()).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": stats }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
/// 活动维度的子路由必须先于 /contests 作用域注册
pub fn participant_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contests/{contest_id}/participants")
            .route("", web::get().to(get_participants_by_contest))
            .route("/validated", web::get().to(get_validated_participants))
            .route("/stats", web::get().to(get_participant_stats)),
    );
    cfg.service(
        web::scope("/participants")
            .route("", web::post().to(add_participant))
            .route("/token/{token}", web::get().to(get_participant_by_token))
            .route("/{id}", web::get().to(get_participant))
            .route("/{id}", web::put().to(update_participant))
            .route("/{id}/validation", web::put().to(update_validation)),
    );
}
