//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod deployment_handlers;
mod device_handlers;
mod frequency_handlers;
mod report_handlers;
mod scan_handlers;

pub use deployment_handlers::*;
pub use device_handlers::*;
pub use frequency_handlers::*;
pub use report_handlers::*;
pub use scan_handlers::*;

use crate::application::error::ApplicationError;

/// 归属校验：提供了请求方用户 ID 时必须与资源所有者一致
pub(crate) fn ensure_owner(
    owner: &str,
    acting_user_id: Option<&str>,
) -> Result<(), ApplicationError> {
    if let Some(acting) = acting_user_id {
        if acting != owner {
            return Err(ApplicationError::ownership(format!(
                "resource belongs to another user (acting user: {})",
                acting
            )));
        }
    }
    Ok(())
}
