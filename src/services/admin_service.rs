use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{admin_entity as admins, contest_entity as contests, draw_entity as draws};
use crate::error::{AppError, AppResult};
use crate::models::{
    ActivityStatus, AdminResponse, AdminRole, AdminStatsResponse, CreateAdminRequest,
    RoleStatsResponse, UpdateAdminRequest,
};
use crate::services::ActivityLogService;
use crate::utils::{hash_password, is_valid_email, validate_password, verify_password};

/// 管理员目录服务，只走远端数据库（凭据不落本地文件）
#[derive(Clone)]
pub struct AdminService {
    pool: DatabaseConnection,
    activity_log: ActivityLogService,
}

impl AdminService {
    pub fn new(pool: DatabaseConnection, activity_log: ActivityLogService) -> Self {
        Self { pool, activity_log }
    }

    pub async fn create_admin(&self, request: CreateAdminRequest) -> AppResult<AdminResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Admin name must not be empty".to_string(),
            ));
        }
        let email = normalize_email(&request.email);
        if !is_valid_email(&email) {
            return Err(AppError::ValidationError(
                "Invalid email address".to_string(),
            ));
        }
        validate_password(&request.password)?;

        if self.find_by_email(&email).await?.is_some() {
            return Err(AppError::ValidationError(
                "Email is already registered".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let created = admins::ActiveModel {
            name: Set(request.name.trim().to_string()),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(request.role.unwrap_or(AdminRole::Moderator)),
            two_factor: Set(request.two_factor.unwrap_or(false)),
            created_at: Set(Some(Utc::now())),
            last_login: Set(None),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(AdminResponse::from(created))
    }

    pub async fn get_admins(&self) -> AppResult<Vec<AdminResponse>> {
        let models = admins::Entity::find()
            .order_by_desc(admins::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(AdminResponse::from).collect())
    }

    pub async fn get_admin(&self, admin_id: i64) -> AppResult<AdminResponse> {
        let model = self.find_by_id(admin_id).await?;
        Ok(AdminResponse::from(model))
    }

    pub async fn get_admin_by_email(&self, email: &str) -> AppResult<Option<AdminResponse>> {
        Ok(self
            .find_by_email(&normalize_email(email))
            .await?
            .map(AdminResponse::from))
    }

    pub async fn update_admin(
        &self,
        admin_id: i64,
        request: UpdateAdminRequest,
    ) -> AppResult<AdminResponse> {
        let current = self.find_by_id(admin_id).await?;

        let email = match &request.email {
            Some(raw) => {
                let email = normalize_email(raw);
                if !is_valid_email(&email) {
                    return Err(AppError::ValidationError(
                        "Invalid email address".to_string(),
                    ));
                }
                if email != current.email && self.find_by_email(&email).await?.is_some() {
                    return Err(AppError::ValidationError(
                        "Email is already registered".to_string(),
                    ));
                }
                Some(email)
            }
            None => None,
        };
        if let Some(name) = &request.name {
            if name.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Admin name must not be empty".to_string(),
                ));
            }
        }
        let password_hash = match &request.password {
            Some(password) => {
                validate_password(password)?;
                Some(hash_password(password)?)
            }
            None => None,
        };

        let mut model = current.into_active_model();
        if let Some(name) = request.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(email) = email {
            model.email = Set(email);
        }
        if let Some(password_hash) = password_hash {
            model.password_hash = Set(password_hash);
        }
        if let Some(role) = request.role {
            model.role = Set(role);
        }
        if let Some(two_factor) = request.two_factor {
            model.two_factor = Set(two_factor);
        }
        let updated = model.update(&self.pool).await?;
        Ok(AdminResponse::from(updated))
    }

    pub async fn delete_admin(&self, admin_id: i64) -> AppResult<()> {
        let res = admins::Entity::delete_by_id(admin_id)
            .exec(&self.pool)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Admin {admin_id} not found")));
        }
        Ok(())
    }

    /// 凭据校验。邮箱不存在与密码错误返回同一个提示，不泄露账号是否存在
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AdminResponse> {
        let Some(admin) = self.find_by_email(&normalize_email(email)).await? else {
            return Err(AppError::AuthError("Invalid email or password".to_string()));
        };

        if !verify_password(password, &admin.password_hash)? {
            self.activity_log
                .log(admin.admin_id, "LOGIN", "admins", Some(admin.admin_id), ActivityStatus::Failure)
                .await;
            return Err(AppError::AuthError("Invalid email or password".to_string()));
        }

        let updated = self.update_last_login(admin.admin_id).await?;

        self.activity_log
            .log(updated.admin_id, "LOGIN", "admins", Some(updated.admin_id), ActivityStatus::Success)
            .await;
        Ok(updated)
    }

    /// 刷新最近登录时间
    pub async fn update_last_login(&self, admin_id: i64) -> AppResult<AdminResponse> {
        let admin = self.find_by_id(admin_id).await?;
        let mut model = admin.into_active_model();
        model.last_login = Set(Some(Utc::now()));
        let updated = model.update(&self.pool).await?;
        Ok(AdminResponse::from(updated))
    }

    /// 权限按角色 rank 比较，管理员不存在视为无权限
    pub async fn check_permissions(
        &self,
        admin_id: i64,
        required_role: &AdminRole,
    ) -> AppResult<bool> {
        let admin = admins::Entity::find_by_id(admin_id).one(&self.pool).await?;
        Ok(admin
            .map(|a| a.role.rank() >= required_role.rank())
            .unwrap_or(false))
    }

    pub async fn role_stats(&self) -> AppResult<RoleStatsResponse> {
        let superadmins = self.count_role(AdminRole::Superadmin).await? as i64;
        let admins_count = self.count_role(AdminRole::Admin).await? as i64;
        let moderators = self.count_role(AdminRole::Moderator).await? as i64;
        Ok(RoleStatsResponse {
            superadmins,
            admins: admins_count,
            moderators,
            total: superadmins + admins_count + moderators,
        })
    }

    /// 某管理员的操作统计：创建的活动数、执行的开奖批次数、审计条数
    pub async fn admin_stats(&self, admin_id: i64) -> AppResult<AdminStatsResponse> {
        let admin = self.find_by_id(admin_id).await?;

        let contests_created = contests::Entity::find()
            .filter(contests::Column::CreatedBy.eq(admin.admin_id))
            .count(&self.pool)
            .await? as i64;
        let draws_executed = draws::Entity::find()
            .filter(draws::Column::ExecutedBy.eq(admin.admin_id))
            .count(&self.pool)
            .await? as i64;
        let activities_logged = self.activity_log.count_for_admin(admin.admin_id).await? as i64;

        Ok(AdminStatsResponse {
            admin_id: admin.admin_id,
            contests_created,
            draws_executed,
            activities_logged,
        })
    }

    async fn find_by_id(&self, admin_id: i64) -> AppResult<admins::Model> {
        admins::Entity::find_by_id(admin_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Admin {admin_id} not found")))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<admins::Model>> {
        Ok(admins::Entity::find()
            .filter(admins::Column::Email.eq(email))
            .one(&self.pool)
            .await?)
    }

    async fn count_role(&self, role: AdminRole) -> AppResult<u64> {
        Ok(admins::Entity::find()
            .filter(admins::Column::Role.eq(role))
            .count(&self.pool)
            .await?)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::activity_log_entity as activity_log;
    use maplit::btreemap;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};

    fn service(db: DatabaseConnection) -> AdminService {
        AdminService::new(db.clone(), ActivityLogService::new(db))
    }

    fn admin_row(admin_id: i64, email: &str, password: &str, role: AdminRole) -> admins::Model {
        admins::Model {
            admin_id,
            name: format!("Admin {admin_id}"),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            role,
            two_factor: false,
            created_at: Some(Utc::now()),
            last_login: None,
        }
    }

    fn activity_row() -> activity_log::Model {
        activity_log::Model {
            log_id: 1,
            admin_id: 1,
            action: "LOGIN".to_string(),
            target_table: "admins".to_string(),
            target_id: Some(1),
            status: ActivityStatus::Success,
            timestamp: Some(Utc::now()),
        }
    }

    fn count_row(n: i64) -> std::collections::BTreeMap<&'static str, Value> {
        btreemap! { "num_items" => Value::BigInt(Some(n)) }
    }

    #[tokio::test]
    async fn test_create_rejects_weak_password() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let result = service(db)
            .create_admin(CreateAdminRequest {
                name: "Ops".to_string(),
                email: "ops@example.com".to_string(),
                password: "short".to_string(),
                role: None,
                two_factor: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_taken_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![admin_row(1, "ops@example.com", "Password123", AdminRole::Admin)]])
            .into_connection();
        let result = service(db)
            .create_admin(CreateAdminRequest {
                name: "Ops".to_string(),
                email: "OPS@example.com".to_string(),
                password: "Password123".to_string(),
                role: None,
                two_factor: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_get_admin_by_email_normalizes_case() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![admin_row(1, "ops@example.com", "Password123", AdminRole::Admin)]])
            .into_connection();

        let found = service(db.clone())
            .get_admin_by_email(" OPS@Example.COM ")
            .await
            .unwrap();
        assert_eq!(found.map(|a| a.admin_id), Some(1));

        // 查询参数必须是去空白、转小写后的邮箱
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(r#"String(Some("ops@example.com"))"#));
    }

    #[tokio::test]
    async fn test_login_succeeds_and_stamps_last_login() {
        let admin = admin_row(1, "ops@example.com", "Password123", AdminRole::Admin);
        let mut updated = admin.clone();
        updated.last_login = Some(Utc::now());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![admin.clone()]])
            .append_query_results([vec![admin]])
            .append_query_results([vec![updated]])
            .append_query_results([vec![activity_row()]])
            .into_connection();

        let response = service(db)
            .login("ops@example.com", "Password123")
            .await
            .unwrap();
        assert_eq!(response.admin_id, 1);
        assert!(response.last_login.is_some());
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_generic_auth_error() {
        let admin = admin_row(1, "ops@example.com", "Password123", AdminRole::Admin);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![admin]])
            .append_query_results([vec![activity_row()]])
            .into_connection();

        let result = service(db).login("ops@example.com", "WrongPass1").await;
        match result {
            Err(AppError::AuthError(msg)) => assert_eq!(msg, "Invalid email or password"),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_generic_auth_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<admins::Model>::new()])
            .into_connection();

        let result = service(db).login("ghost@example.com", "Password123").await;
        match result {
            Err(AppError::AuthError(msg)) => assert_eq!(msg, "Invalid email or password"),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_permissions_compares_rank() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![admin_row(1, "a@example.com", "Password123", AdminRole::Admin)],
                vec![admin_row(1, "a@example.com", "Password123", AdminRole::Admin)],
                Vec::<admins::Model>::new(),
            ])
            .into_connection();
        let service = service(db);

        assert!(service
            .check_permissions(1, &AdminRole::Moderator)
            .await
            .unwrap());
        assert!(!service
            .check_permissions(1, &AdminRole::Superadmin)
            .await
            .unwrap());
        // 不存在的管理员一律视为无权限
        assert!(!service
            .check_permissions(99, &AdminRole::Moderator)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_role_stats_sums_counts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(1)], vec![count_row(2)], vec![count_row(3)]])
            .into_connection();

        let stats = service(db).role_stats().await.unwrap();
        assert_eq!(stats.superadmins, 1);
        assert_eq!(stats.admins, 2);
        assert_eq!(stats.moderators, 3);
        assert_eq!(stats.total, 6);
    }

    #[tokio::test]
    async fn test_admin_stats_counts_three_dimensions() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![admin_row(1, "ops@example.com", "Password123", AdminRole::Admin)]])
            .append_query_results([vec![count_row(4)], vec![count_row(2)], vec![count_row(9)]])
            .into_connection();

        let stats = service(db).admin_stats(1).await.unwrap();
        assert_eq!(stats.admin_id, 1);
        assert_eq!(stats.contests_created, 4);
        assert_eq!(stats.draws_executed, 2);
        assert_eq!(stats.activities_logged, 9);
    }
}
