use crate::models::*;
use crate::services::AdminService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admins",
    tag = "admins",
    request_body = CreateAdminRequest,
    responses(
        (status = 200, description = "创建管理员成功", body = AdminResponse),
        (status = 400, description = "邮箱已注册或参数错误")
    )
)]
pub async fn create_admin(
    service: web::Data<AdminService>,
    request: web::Json<CreateAdminRequest>,
) -> Result<HttpResponse> {
    match service.create_admin(request.into_inner()).await {
        Ok(admin) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": admin
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admins",
    tag = "admins",
    responses(
        (status = 200, description = "获取管理员列表成功", body = [AdminResponse])
    )
)]
pub async fn get_admins(service: web::Data<AdminService>) -> Result<HttpResponse> {
    match service.get_admins().await {
        Ok(admins) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": admins }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admins/login",
    tag = "admins",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "登录成功", body = AdminResponse),
        (status = 401, description = "认证失败")
    )
)]
/// 登录成功刷新 last_login，成败都会落审计日志
pub async fn login(
    service: web::Data<AdminService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    match service.login(&request.email, &request.password).await {
        Ok(admin) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": admin
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admins/role-stats",
    tag = "admins",
    responses(
        (status = 200, description = "获取角色统计成功", body = RoleStatsResponse)
    )
)]
pub async fn get_role_stats(service: web::Data<AdminService>) -> Result<HttpResponse> {
    match service.role_stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": stats }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admins/{id}",
    tag = "admins",
    params(
        ("id" = i64, Path, description = "管理员ID")
    ),
    responses(
        (status = 200, description = "获取管理员成功", body = AdminResponse),
        (status = 404, description = "管理员不存在")
    )
)]
pub async fn get_admin(
    service: web::Data<AdminService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_admin(path.into_inner()).await {
        Ok(admin) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": admin }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admins/{id}",
    tag = "admins",
    params(
        ("id" = i64, Path, description = "管理员ID")
    ),
    request_body = UpdateAdminRequest,
    responses(
        (status = 200, description = "更新管理员成功", body = AdminResponse),
        (status = 400, description = "请求参数错误"),
        (status = 404, description = "管理员不存在")
    )
)]
pub async fn update_admin(
    service: web::Data<AdminService>,
    path: web::Path<i64>,
    request: web::Json<UpdateAdminRequest>,
) -> Result<HttpResponse> {
    match service
        .update_admin(path.into_inner(), request.into_inner())
        .await
    {
        Ok(admin) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": admin }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admins/{id}",
    tag = "admins",
    params(
        ("id" = i64, Path, description = "管理员ID")
    ),
    responses(
        (status = 200, description = "删除管理员成功"),
        (status = 404, description = "管理员不存在")
    )
)]
pub async fn delete_admin(
    service: web::Data<AdminService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete_admin(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": null }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admins/{id}/stats",
    tag = "admins",
    params(
        ("id" = i64, Path, description = "管理员ID")
    ),
    responses(
        (status = 200, description = "获取管理员操作统计成功", body = AdminStatsResponse),
        (status = 404, description = "管理员不存在")
    )
)]
pub async fn get_admin_stats(
    service: web::Data<AdminService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.admin_stats(path.into_inner()).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": stats }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admins/{id}/permissions",
    tag = "admins",
    params(
        ("id" = i64, Path, description = "管理员ID"),
        ("role" = AdminRole, Query, description = "所需最低角色")
    ),
    responses(
        (status = 200, description = "权限校验完成", body = PermissionResponse)
    )
)]
/// 角色等级 SUPERADMIN > ADMIN > MODERATOR，管理员不存在时 allowed 为 false
pub async fn check_permissions(
    service: web::Data<AdminService>,
    path: web::Path<i64>,
    query: web::Query<PermissionQuery>,
) -> Result<HttpResponse> {
    let admin_id = path.into_inner();
    let required_role = query.into_inner().role;
    match service.check_permissions(admin_id, &required_role).await {
        Ok(allowed) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": PermissionResponse {
                admin_id,
                required_role,
                allowed
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
/// 静态段 /login 与 /role-stats 必须先于 /{id} 注册
pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admins")
            .route("", web::post().to(create_admin))
            .route("", web::get().to(get_admins))
            .route("/login", web::post().to(login))
            .route("/role-stats", web::get().to(get_role_stats))
            .route("/{id}", web::get().to(get_admin))
            .route("/{id}", web::put().to(update_admin))
            .route("/{id}", web::delete().to(delete_admin))
            .route("/{id}/stats", web::get().to(get_admin_stats))
            .route("/{id}/permissions", web::get().to(check_permissions)),
    );
}
