//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod deployment_repo;
mod device_repo;
mod frequency_repo;
mod report_repo;
mod threat_repo;

pub use database::*;
pub use deployment_repo::*;
pub use device_repo::*;
pub use frequency_repo::*;
pub use report_repo::*;
pub use threat_repo::*;
