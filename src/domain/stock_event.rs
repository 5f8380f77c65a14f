// ==========================================
// VMI 仓库管理系统 - 库存移动领域模型
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 1. 输入数据模型
// 依据: Field_Mapping_Spec_v1.0.md - 字段映射规范
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// RawStockRecord - 原始库存移动记录
// ==========================================
// 用途: 导入层字段映射输出, 清洗/校验前的中间形态
// 所有业务字段均为 Option, 缺失与空白统一为 None
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStockRecord {
    // ===== 主键 =====
    pub part_id: Option<String>, // 部品号/尺寸代码（分组键）

    // ===== 数量 =====
    pub stock_in_qty: Option<f64>,  // 入库数量
    pub stock_out_qty: Option<f64>, // 出库数量

    // ===== 时间 =====
    pub stock_in_date: Option<NaiveDate>, // 入库日期（日粒度）
    pub stock_in_date_src: Option<String>, // 入库日期源文本（影子字段, 解析失败时供 DQ 报告引用）

    // ===== 透传字段（报表展示用, 不参与聚合计算）=====
    pub vendor_code: Option<String>, // 供应商代码
    pub unit: Option<String>,        // 计量单位
    pub document_no: Option<String>, // 单据号

    // ===== 元信息 =====
    pub row_number: usize, // 源文件行号（诊断用）
}

// ==========================================
// StockEvent - 标准化库存移动事件
// ==========================================
// 红线: 聚合引擎只接受标准化输入, 不做形态嗅探
// 数量缺失归零; 日期缺失保留 None(该记录不可计龄, 但计入总量)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEvent {
    /// 部品号/尺寸代码（分组键）
    pub part_id: String,

    /// 入库数量（非负, 归属于 stock_in_date）
    pub stock_in_qty: f64,

    /// 出库数量（非负, 与本记录同一笔事务）
    pub stock_out_qty: f64,

    /// 入库日期; None 表示不可计龄（仍计入总量）
    pub stock_in_date: Option<NaiveDate>,

    /// 供应商代码（透传）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_code: Option<String>,

    /// 计量单位（透传）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// 单据号（透传）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_no: Option<String>,
}

impl StockEvent {
    /// 创建仅含核心字段的事件
    pub fn new(
        part_id: impl Into<String>,
        stock_in_qty: f64,
        stock_out_qty: f64,
        stock_in_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            stock_in_qty,
            stock_out_qty,
            stock_in_date,
            vendor_code: None,
            unit: None,
            document_no: None,
        }
    }

    /// 本事件的净留存量（入库 - 出库, 可为负）
    pub fn net_remaining(&self) -> f64 {
        self.stock_in_qty - self.stock_out_qty
    }
}
