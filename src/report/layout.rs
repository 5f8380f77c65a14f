// ==========================================
// VMI 仓库管理系统 - 报表布局描述
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 6. 声明式报表布局
// 职责: 以声明式列描述驱动序列化器, 布局与聚合核心解耦
// ==========================================

use crate::domain::report::{PartSummary, TransactionRow};
use crate::domain::types::AgingBucket;
use chrono::{Datelike, NaiveDate};

/// 佛历与公元的年份差（展示用）
const BUDDHIST_ERA_OFFSET: i32 = 543;

// ==========================================
// Cell - 单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Empty,
}

// ==========================================
// DateStyle - 日期展示风格
// ==========================================
// 泰国客户报表按佛历展示, 内部核对单按 ISO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    #[default]
    Iso, // YYYY-MM-DD
    BuddhistEra, // DD/MM/YYYY, 年份 +543
}

impl DateStyle {
    /// 按风格格式化日期
    pub fn format(&self, date: NaiveDate) -> String {
        match self {
            DateStyle::Iso => date.format("%Y-%m-%d").to_string(),
            DateStyle::BuddhistEra => format!(
                "{:02}/{:02}/{}",
                date.day(),
                date.month(),
                date.year() + BUDDHIST_ERA_OFFSET
            ),
        }
    }
}

// ==========================================
// ColumnSpec - 列描述
// ==========================================
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// 取值键（ReportRow::cell 的查找键）
    pub key: &'static str,

    /// 表头文字
    pub header: &'static str,

    /// 日期列的展示风格（非日期列忽略）
    pub date_style: DateStyle,
}

impl ColumnSpec {
    pub fn new(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            date_style: DateStyle::default(),
        }
    }

    pub fn with_date_style(mut self, style: DateStyle) -> Self {
        self.date_style = style;
        self
    }
}

// ==========================================
// TableLayout - 表格布局
// ==========================================
#[derive(Debug, Clone)]
pub struct TableLayout {
    pub title: String,
    pub columns: Vec<ColumnSpec>,
}

impl TableLayout {
    pub fn new(title: impl Into<String>, columns: Vec<ColumnSpec>) -> Self {
        Self {
            title: title.into(),
            columns,
        }
    }

    /// 表头行
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header).collect()
    }
}

// ==========================================
// ReportRow - 行取值接口
// ==========================================
// 序列化器按布局列键逐列取值; 未知键返回 None 由序列化器报错
pub trait ReportRow {
    fn cell(&self, key: &str) -> Option<Cell>;
}

impl ReportRow for PartSummary {
    fn cell(&self, key: &str) -> Option<Cell> {
        let cell = match key {
            "part_id" => Cell::Text(self.part_id.clone()),
            "stock_in_qty" => Cell::Number(self.stock_in_qty),
            "stock_out_qty" => Cell::Number(self.stock_out_qty),
            "balance_qty" => Cell::Number(self.balance_qty),
            "current" => Cell::Number(self.aging.current),
            "day30" => Cell::Number(self.aging.day30),
            "day60" => Cell::Number(self.aging.day60),
            "day90" => Cell::Number(self.aging.day90),
            "day120" => Cell::Number(self.aging.day120),
            "over150" => Cell::Number(self.aging.over150),
            _ => return None,
        };
        Some(cell)
    }
}

impl ReportRow for TransactionRow {
    fn cell(&self, key: &str) -> Option<Cell> {
        let opt_text = |v: &Option<String>| {
            v.as_ref()
                .map(|s| Cell::Text(s.clone()))
                .unwrap_or(Cell::Empty)
        };

        let cell = match key {
            "part_id" => Cell::Text(self.event.part_id.clone()),
            "vendor_code" => opt_text(&self.event.vendor_code),
            "unit" => opt_text(&self.event.unit),
            "document_no" => opt_text(&self.event.document_no),
            "stock_in_date" => self
                .event
                .stock_in_date
                .map(Cell::Date)
                .unwrap_or(Cell::Empty),
            "stock_in_qty" => Cell::Number(self.event.stock_in_qty),
            "stock_out_qty" => Cell::Number(self.event.stock_out_qty),
            "balance_qty_after" => Cell::Number(self.balance_qty_after),
            "current" => Cell::Number(self.aging.current),
            "day30" => Cell::Number(self.aging.day30),
            "day60" => Cell::Number(self.aging.day60),
            "day90" => Cell::Number(self.aging.day90),
            "day120" => Cell::Number(self.aging.day120),
            "over150" => Cell::Number(self.aging.over150),
            _ => return None,
        };
        Some(cell)
    }
}

// ==========================================
// 内置布局
// ==========================================

/// 六档库龄列（两种报表共用）
fn aging_columns() -> Vec<ColumnSpec> {
    AgingBucket::ALL
        .iter()
        .map(|bucket| match bucket {
            AgingBucket::Current => ColumnSpec::new("current", "CURRENT"),
            AgingBucket::Day30 => ColumnSpec::new("day30", "30DAY"),
            AgingBucket::Day60 => ColumnSpec::new("day60", "60DAY"),
            AgingBucket::Day90 => ColumnSpec::new("day90", "90DAY"),
            AgingBucket::Day120 => ColumnSpec::new("day120", "120DAY"),
            AgingBucket::Over150 => ColumnSpec::new("over150", "OVER150"),
        })
        .collect()
}

/// 按部品余额/库龄汇总表布局
pub fn balance_by_part_layout() -> TableLayout {
    let mut columns = vec![
        ColumnSpec::new("part_id", "PART NO"),
        ColumnSpec::new("stock_in_qty", "STOCK IN"),
        ColumnSpec::new("stock_out_qty", "STOCK OUT"),
        ColumnSpec::new("balance_qty", "BALANCE"),
    ];
    columns.extend(aging_columns());
    TableLayout::new("BALANCE REPORT BY PART", columns)
}

/// 部品台账明细表布局（日期按佛历展示）
pub fn stock_card_layout() -> TableLayout {
    let mut columns = vec![
        ColumnSpec::new("part_id", "PART NO"),
        ColumnSpec::new("document_no", "DOC NO"),
        ColumnSpec::new("vendor_code", "VENDOR"),
        ColumnSpec::new("unit", "UNIT"),
        ColumnSpec::new("stock_in_date", "DATE").with_date_style(DateStyle::BuddhistEra),
        ColumnSpec::new("stock_in_qty", "IN"),
        ColumnSpec::new("stock_out_qty", "OUT"),
        ColumnSpec::new("balance_qty_after", "BALANCE"),
    ];
    columns.extend(aging_columns());
    TableLayout::new("STOCK CARD (FIFO)", columns)
}
