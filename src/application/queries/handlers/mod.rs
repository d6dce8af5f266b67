//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod deployment_handlers;
mod device_handlers;
mod frequency_handlers;
mod report_handlers;
mod threat_handlers;

pub use deployment_handlers::*;
pub use device_handlers::*;
pub use frequency_handlers::*;
pub use report_handlers::*;
pub use threat_handlers::*;
