//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod deployment_queries;
mod device_queries;
mod frequency_queries;
mod report_queries;
mod threat_queries;

pub mod handlers;

pub use deployment_queries::*;
pub use device_queries::*;
pub use frequency_queries::*;
pub use report_queries::*;
pub use threat_queries::*;
