//! Countermeasure Context - 干扰参数规划上下文
//!
//! 针对目标频率计算干扰部署参数。全部为闭式启发式计算，
//! 无传感器输入、无外部执行机构。

mod planner;

pub use planner::{
    analyze_target, deployment_parameters, DeploymentParams, DisruptionPlan, Modulation,
    PlanError, DEFAULT_POWER_LEVEL, INTERFERENCE_PATTERN,
};
