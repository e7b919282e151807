use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 错误响应体中的 error 字段，与 `AppError::error_response` 输出一致
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// 机器可读错误码，如 VALIDATION_ERROR / EMPTY_POOL
    pub code: String,
    pub message: String,
}
