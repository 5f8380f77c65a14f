// ==========================================
// VMI 仓库管理系统 - 数据质量校验器
// ==========================================
// 依据: Field_Mapping_Spec_v1.0.md - 6. 数据质量规则
// 职责: Block/Warn 校验 + DQ 报告生成
// 口径: Block 行剔除, Warn 行保留并记录(报表照常出)
// ==========================================

use crate::domain::stock_event::RawStockRecord;
use crate::domain::types::DqLevel;
use crate::importer::stock_importer::DqValidator as DqValidatorTrait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// DqViolation - 单条数据质量违规
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,
    pub part_id: Option<String>,
    pub level: DqLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// DqSummary - 校验汇总统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize,
    pub passed_rows: usize,
    pub warned_rows: usize,
    pub blocked_rows: usize,
}

// ==========================================
// DqReport - 数据质量报告
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqReport {
    pub violations: Vec<DqViolation>,
    pub summary: DqSummary,
}

impl DqReport {
    /// 指定行是否被阻断
    pub fn is_blocked(&self, row_number: usize) -> bool {
        self.violations
            .iter()
            .any(|v| v.row_number == row_number && v.level == DqLevel::Block)
    }
}

// ==========================================
// DqValidator - 数据质量校验器
// ==========================================
pub struct DqValidator {
    qty_anomaly_threshold: f64, // 数量异常阈值（可能单位错误）
}

impl DqValidator {
    pub fn new(qty_anomaly_threshold: f64) -> Self {
        Self {
            qty_anomaly_threshold,
        }
    }

    /// 单行校验
    fn validate_record(&self, record: &RawStockRecord, violations: &mut Vec<DqViolation>) {
        // Block: 主键缺失
        if record.part_id.is_none() {
            violations.push(DqViolation {
                row_number: record.row_number,
                part_id: None,
                level: DqLevel::Block,
                field: "part_id".to_string(),
                message: "部品号缺失".to_string(),
            });
        }

        // Block: 负数量
        for (field, qty) in [
            ("stock_in_qty", record.stock_in_qty),
            ("stock_out_qty", record.stock_out_qty),
        ] {
            if let Some(q) = qty {
                if q < 0.0 {
                    violations.push(DqViolation {
                        row_number: record.row_number,
                        part_id: record.part_id.clone(),
                        level: DqLevel::Block,
                        field: field.to_string(),
                        message: format!("数量为负数: {}", q),
                    });
                } else if q > self.qty_anomaly_threshold {
                    // Warn: 数量异常偏大
                    violations.push(DqViolation {
                        row_number: record.row_number,
                        part_id: record.part_id.clone(),
                        level: DqLevel::Warn,
                        field: field.to_string(),
                        message: format!(
                            "数量异常 ({} > {}), 可能单位错误",
                            q, self.qty_anomaly_threshold
                        ),
                    });
                }
            }
        }

        // Warn: 数量全部缺失（该行对报表无贡献）
        if record.stock_in_qty.is_none() && record.stock_out_qty.is_none() {
            violations.push(DqViolation {
                row_number: record.row_number,
                part_id: record.part_id.clone(),
                level: DqLevel::Warn,
                field: "stock_in_qty,stock_out_qty".to_string(),
                message: "入库/出库数量均缺失".to_string(),
            });
        }

        // Warn: 日期源文本存在但无法解析（该行不可计龄, 数量仍计入总量）
        if record.stock_in_date.is_none() && record.stock_in_date_src.is_some() {
            violations.push(DqViolation {
                row_number: record.row_number,
                part_id: record.part_id.clone(),
                level: DqLevel::Warn,
                field: "stock_in_date".to_string(),
                message: format!(
                    "入库日期无法解析: {}（按无日期处理）",
                    record.stock_in_date_src.as_deref().unwrap_or("")
                ),
            });
        }
    }

    /// 跨行校验: 部品累计出库超过累计入库
    fn validate_part_balances(
        &self,
        records: &[RawStockRecord],
        violations: &mut Vec<DqViolation>,
    ) {
        let mut balances: HashMap<&str, (f64, f64, usize)> = HashMap::new();
        for record in records {
            if let Some(part_id) = record.part_id.as_deref() {
                let entry = balances.entry(part_id).or_insert((0.0, 0.0, record.row_number));
                entry.0 += record.stock_in_qty.unwrap_or(0.0);
                entry.1 += record.stock_out_qty.unwrap_or(0.0);
            }
        }

        for (part_id, (total_in, total_out, first_row)) in balances {
            if total_out > total_in {
                violations.push(DqViolation {
                    row_number: first_row,
                    part_id: Some(part_id.to_string()),
                    level: DqLevel::Warn,
                    field: "balance".to_string(),
                    message: format!(
                        "累计出库 {} 超过累计入库 {}, 余额为负",
                        total_out, total_in
                    ),
                });
            }
        }
    }
}

impl DqValidatorTrait for DqValidator {
    /// 批量校验并生成 DQ 报告
    fn validate(&self, records: &[RawStockRecord]) -> DqReport {
        let mut violations = Vec::new();

        for record in records {
            self.validate_record(record, &mut violations);
        }
        self.validate_part_balances(records, &mut violations);

        // 逐行定级: 取该行违规的最高等级
        let mut row_levels: HashMap<usize, DqLevel> = HashMap::new();
        for violation in &violations {
            let level = row_levels
                .entry(violation.row_number)
                .or_insert(DqLevel::Pass);
            if violation.level > *level {
                *level = violation.level;
            }
        }

        let blocked_rows = row_levels.values().filter(|l| **l == DqLevel::Block).count();
        let warned_rows = row_levels.values().filter(|l| **l == DqLevel::Warn).count();

        DqReport {
            summary: DqSummary {
                total_rows: records.len(),
                passed_rows: records.len() - blocked_rows - warned_rows,
                warned_rows,
                blocked_rows,
            },
            violations,
        }
    }
}
