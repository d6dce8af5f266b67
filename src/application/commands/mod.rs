//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod deployment_commands;
mod device_commands;
mod frequency_commands;
mod report_commands;
mod spectrum_commands;

pub mod handlers;

pub use deployment_commands::*;
pub use device_commands::*;
pub use frequency_commands::*;
pub use report_commands::*;
pub use spectrum_commands::*;
