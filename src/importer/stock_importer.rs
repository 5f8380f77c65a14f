// ==========================================
// VMI 仓库管理系统 - 库存数据导入 Trait
// ==========================================
// 依据: Field_Mapping_Spec_v1.0.md - 导入管道
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::stock_event::{RawStockRecord, StockEvent};
use crate::importer::dq_validator::DqReport;
use crate::importer::error::ImportResult;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// ImportOutcome - 导入结果
// ==========================================
// 标准化事件 + DQ 报告; Block 行已剔除, Warn 行保留
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub events: Vec<StockEvent>,
    pub dq_report: DqReport,
    pub source_rows: usize,
}

// ==========================================
// FileParser Trait（阶段 0: 文件读取与解析）
// ==========================================
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（HashMap<列名, 值>）, 跳过全空白行
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>>;
}

// ==========================================
// FieldMapper Trait（阶段 1: 字段映射与类型转换）
// ==========================================
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始行记录映射为 RawStockRecord
    ///
    /// 日期解析失败降级为 None（源文本保留）; 数量解析失败报错
    fn map_to_raw_record(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawStockRecord>;
}

// ==========================================
// DataCleaner Trait（阶段 2: 基础清洗）
// ==========================================
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// TRIM + 可选 UPPER
    fn clean_text(&self, value: &str, uppercase: bool) -> String;

    /// 空白统一为 None
    fn normalize_null(&self, value: Option<String>) -> Option<String>;

    /// 宽松日期解析（多格式 + 佛历换算）, 失败返回 None
    fn parse_date_flexible(&self, value: &str) -> Option<NaiveDate>;

    /// 宽松数量解析（去千分位）, 失败返回 None
    fn parse_qty(&self, value: &str) -> Option<f64>;
}

// ==========================================
// DqValidator Trait（阶段 3: 数据质量校验）
// ==========================================
// 实现者: DqValidator
pub trait DqValidator: Send + Sync {
    /// 批量校验并生成 DQ 报告
    fn validate(&self, records: &[RawStockRecord]) -> DqReport;
}

// ==========================================
// StockEventImporter Trait（导入主接口）
// ==========================================
// 实现者: StockEventImporterImpl
pub trait StockEventImporter: Send + Sync {
    /// 从上传文件导入库存移动数据
    ///
    /// # 导入流程（4 个阶段）
    /// 1. 文件读取与解析（CSV/Excel, 按扩展名分派）
    /// 2. 字段映射与类型转换（含列名别名）
    /// 3. 数据质量校验（Block 剔除 / Warn 保留）
    /// 4. 标准化为 StockEvent（数量缺失归零）
    fn import_from_file(&self, file_path: &Path) -> ImportResult<ImportOutcome>;

    /// 对已解析的原始行执行阶段 2-4（供 API 层复用）
    fn import_from_rows(&self, rows: &[HashMap<String, String>]) -> ImportResult<ImportOutcome>;
}
