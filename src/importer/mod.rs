// ==========================================
// VMI 仓库管理系统 - 导入层
// ==========================================
// 依据: Field_Mapping_Spec_v1.0.md - 导入管道
// ==========================================
// 职责: 上传文件 → 标准化 StockEvent
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod stock_importer;
pub mod stock_importer_impl;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use dq_validator::{DqReport, DqSummary, DqValidator as DqValidatorImpl, DqViolation};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use stock_importer_impl::StockEventImporterImpl;

// 重导出 Trait 接口
pub use stock_importer::{
    DataCleaner, DqValidator, FieldMapper, FileParser, ImportOutcome, StockEventImporter,
};
