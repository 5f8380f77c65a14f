// ==========================================
// VMI 仓库管理系统 - API 边界 DTO
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 5. API 边界
// 职责: 后端 JSON 行 → 标准化 StockEvent
// 红线: 单一文档化响应模式(serde alias), 禁止形态嗅探;
//       聚合核心只接受标准化输入
// ==========================================

use crate::domain::stock_event::StockEvent;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::stock_importer::DataCleaner as DataCleanerTrait;
use serde::Deserialize;
use tracing::warn;

// ==========================================
// StockEventDto - 单行库存移动 DTO
// ==========================================
// 后端各页面字段命名不一, 全部收敛为别名表
#[derive(Debug, Clone, Deserialize)]
pub struct StockEventDto {
    #[serde(alias = "partId", alias = "partNo", alias = "sizeCode", alias = "PART_NO")]
    pub part_id: String,

    #[serde(default, alias = "stockInQty", alias = "qtyIn", alias = "inQty")]
    pub stock_in_qty: Option<f64>,

    #[serde(default, alias = "stockOutQty", alias = "qtyOut", alias = "outQty")]
    pub stock_out_qty: Option<f64>,

    /// 日期以字符串透传, 标准化时宽松解析(多格式 + 佛历)
    #[serde(default, alias = "stockInDate", alias = "receiveDate", alias = "inDate")]
    pub stock_in_date: Option<String>,

    #[serde(default, alias = "vendorCode", alias = "vendor")]
    pub vendor_code: Option<String>,

    #[serde(default, alias = "uom")]
    pub unit: Option<String>,

    #[serde(default, alias = "documentNo", alias = "docNo")]
    pub document_no: Option<String>,
}

impl StockEventDto {
    /// 标准化为 StockEvent
    ///
    /// 数量缺失归零; 日期解析失败降级为 None(不可计龄)
    pub fn normalize(&self) -> StockEvent {
        let cleaner = DataCleaner;

        let stock_in_date = self.stock_in_date.as_deref().and_then(|v| {
            let parsed = cleaner.parse_date_flexible(v);
            if parsed.is_none() && !v.trim().is_empty() {
                warn!(part_id = %self.part_id, value = %v, "后端行日期无法解析, 按无日期处理");
            }
            parsed
        });

        StockEvent {
            part_id: self.part_id.trim().to_string(),
            stock_in_qty: self.stock_in_qty.unwrap_or(0.0),
            stock_out_qty: self.stock_out_qty.unwrap_or(0.0),
            stock_in_date,
            vendor_code: cleaner.normalize_null(self.vendor_code.clone()),
            unit: cleaner.normalize_null(self.unit.clone()),
            document_no: cleaner.normalize_null(self.document_no.clone()),
        }
    }
}

// ==========================================
// StockRowsResponse - 后端行响应
// ==========================================
#[derive(Debug, Clone, Deserialize)]
pub struct StockRowsResponse {
    #[serde(alias = "data", alias = "items", alias = "list")]
    pub rows: Vec<StockEventDto>,

    #[serde(default, alias = "totalCount")]
    pub total: Option<u64>,
}

impl StockRowsResponse {
    /// 整批标准化
    pub fn normalize(&self) -> Vec<StockEvent> {
        self.rows.iter().map(StockEventDto::normalize).collect()
    }
}
