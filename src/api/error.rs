// ==========================================
// VMI 仓库管理系统 - API 层错误类型
// ==========================================
// 职责: 汇聚下层错误, 输出可解释的错误消息
// ==========================================

use crate::importer::error::ImportError;
use crate::report::error::ExportError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("导出失败: {0}")]
    Export(#[from] ExportError),

    #[error("后端响应解析失败: {0}")]
    PayloadParseError(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
