// ==========================================
// VMI 仓库管理系统 - 配置层
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 7. 配置项全集
// ==========================================

pub mod report_config;

pub use report_config::{ReportConfig, ReportConfigReader};
