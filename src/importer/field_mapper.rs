// ==========================================
// VMI 仓库管理系统 - 字段映射器
// ==========================================
// 依据: Field_Mapping_Spec_v1.0.md - 标准字段映射表
// 职责: 源列名 → 标准字段映射（含泰/英列名别名）+ 类型转换
// ==========================================

use crate::domain::stock_event::RawStockRecord;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::stock_importer::{DataCleaner as DataCleanerTrait, FieldMapper as FieldMapperTrait};
use std::collections::HashMap;
use tracing::warn;

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_to_raw_record(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawStockRecord> {
        let stock_in_date_src = self.get_string(row, "Stock In Date");
        let stock_in_date = stock_in_date_src.as_deref().and_then(|v| {
            let parsed = self.cleaner.parse_date_flexible(v);
            if parsed.is_none() {
                // 解析失败按"无日期"降级, 由 DQ 校验器出 Warn
                warn!(row = row_number, value = %v, "入库日期无法解析, 按无日期处理");
            }
            parsed
        });

        Ok(RawStockRecord {
            // 主键
            part_id: self.get_string(row, "Part No"),

            // 数量
            stock_in_qty: self.parse_qty(row, "Qty In", row_number)?,
            stock_out_qty: self.parse_qty(row, "Qty Out", row_number)?,

            // 时间
            stock_in_date,
            stock_in_date_src,

            // 透传字段
            vendor_code: self.get_string(row, "Vendor"),
            unit: self.get_string(row, "Unit"),
            document_no: self.get_string(row, "Document No"),

            // 元信息
            row_number,
        })
    }
}

impl FieldMapper {
    /// 提取字符串字段（返回 Option）, 支持多个可能的列名（别名）
    ///
    /// 上传模板存在泰文/英文/驼峰三套表头, 全部列入别名表
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        let aliases: Vec<&str> = match key {
            "Part No" => vec!["Part No", "PartNo", "partNo", "PART_NO", "Size Code", "รหัสสินค้า"],
            "Qty In" => vec!["Qty In", "QtyIn", "stockInQty", "STOCK_IN_QTY", "จำนวนรับเข้า"],
            "Qty Out" => vec!["Qty Out", "QtyOut", "stockOutQty", "STOCK_OUT_QTY", "จำนวนจ่ายออก"],
            "Stock In Date" => vec![
                "Stock In Date",
                "StockInDate",
                "stockInDate",
                "STOCK_IN_DATE",
                "วันที่รับเข้า",
            ],
            "Vendor" => vec!["Vendor", "Vendor Code", "vendorCode", "ผู้ขาย"],
            "Unit" => vec!["Unit", "unit", "UOM", "หน่วย"],
            "Document No" => vec!["Document No", "DocNo", "documentNo", "เลขที่เอกสาร"],
            _ => vec![key],
        };

        for alias in aliases {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// 解析数量字段; 缺失按 None, 无法解析按类型转换错误
    fn parse_qty(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => self
                .cleaner
                .parse_qty(&value)
                .map(Some)
                .ok_or_else(|| ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析为数量: {}", value),
                }),
        }
    }
}
