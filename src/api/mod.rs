// ==========================================
// VMI 仓库管理系统 - API 层
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 5. API 边界
// ==========================================
// 职责: 对外门面 + 边界 DTO
// ==========================================

pub mod dto;
pub mod error;
pub mod report_api;

// 重导出核心类型
pub use dto::{StockEventDto, StockRowsResponse};
pub use error::{ApiError, ApiResult};
pub use report_api::ReportApi;
