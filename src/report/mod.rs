// ==========================================
// VMI 仓库管理系统 - 报表导出层
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 6. 声明式报表布局
// ==========================================
// 职责: 布局描述 + 文本级序列化(CSV)
// 红线: 不含聚合逻辑; Excel/PDF 二进制写出是外部协作方
// ==========================================

pub mod csv_writer;
pub mod error;
pub mod layout;

// 重导出核心类型
pub use csv_writer::CsvReportWriter;
pub use error::{ExportError, ExportResult};
pub use layout::{
    balance_by_part_layout, stock_card_layout, Cell, ColumnSpec, DateStyle, ReportRow, TableLayout,
};
