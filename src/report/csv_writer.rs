// ==========================================
// VMI 仓库管理系统 - CSV 报表序列化器
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 6. 声明式报表布局
// 职责: 按布局描述将报表行序列化为 CSV
// 说明: Excel/PDF 二进制导出由外部协作方承担,
//       本模块只负责文本级表格序列化
// ==========================================

use crate::report::error::{ExportError, ExportResult};
use crate::report::layout::{Cell, ReportRow, TableLayout};
use std::fs::File;
use std::path::Path;
use tracing::info;

// ==========================================
// CsvReportWriter - CSV 序列化器
// ==========================================
pub struct CsvReportWriter;

impl CsvReportWriter {
    pub fn new() -> Self {
        Self {}
    }

    /// 序列化为 CSV 字符串
    pub fn write_to_string<R: ReportRow>(
        &self,
        layout: &TableLayout,
        rows: &[R],
    ) -> ExportResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        self.write_rows(&mut writer, layout, rows)?;
        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::CsvWriteError(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ExportError::CsvWriteError(e.to_string()))
    }

    /// 序列化并写入文件
    pub fn write_to_path<R: ReportRow, P: AsRef<Path>>(
        &self,
        layout: &TableLayout,
        rows: &[R],
        path: P,
    ) -> ExportResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);
        self.write_rows(&mut writer, layout, rows)?;
        writer
            .flush()
            .map_err(|e| ExportError::FileWriteError(e.to_string()))?;

        info!(file = %path.display(), row_count = rows.len(), title = %layout.title, "报表导出完成");
        Ok(())
    }

    /// 表头 + 数据行
    fn write_rows<W: std::io::Write, R: ReportRow>(
        &self,
        writer: &mut csv::Writer<W>,
        layout: &TableLayout,
        rows: &[R],
    ) -> ExportResult<()> {
        writer.write_record(layout.headers())?;

        for row in rows {
            let mut record = Vec::with_capacity(layout.columns.len());
            for column in &layout.columns {
                let cell = row
                    .cell(column.key)
                    .ok_or_else(|| ExportError::UnknownColumn(column.key.to_string()))?;
                record.push(Self::render_cell(cell, column.date_style));
            }
            writer.write_record(&record)?;
        }

        Ok(())
    }

    /// 单元格渲染; 日期列按列描述的展示风格格式化
    fn render_cell(cell: Cell, date_style: crate::report::layout::DateStyle) -> String {
        match cell {
            Cell::Text(text) => text,
            Cell::Number(n) => format!("{}", n),
            Cell::Date(date) => date_style.format(date),
            Cell::Empty => String::new(),
        }
    }
}

impl Default for CsvReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{AgingBreakdown, PartSummary, TransactionRow};
    use crate::domain::stock_event::StockEvent;
    use crate::report::layout::{balance_by_part_layout, stock_card_layout};
    use chrono::NaiveDate;

    fn summary() -> PartSummary {
        PartSummary {
            part_id: "P-1001".to_string(),
            stock_in_qty: 100.0,
            stock_out_qty: 40.0,
            balance_qty: 60.0,
            aging: AgingBreakdown {
                over150: 60.0,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_write_balance_report() {
        let writer = CsvReportWriter::new();
        let csv = writer
            .write_to_string(&balance_by_part_layout(), &[summary()])
            .unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "PART NO,STOCK IN,STOCK OUT,BALANCE,CURRENT,30DAY,60DAY,90DAY,120DAY,OVER150"
        );
        assert_eq!(lines.next().unwrap(), "P-1001,100,40,60,0,0,0,0,0,60");
    }

    #[test]
    fn test_write_stock_card_buddhist_dates() {
        let row = TransactionRow {
            event: StockEvent::new(
                "P-1001",
                10.0,
                0.0,
                NaiveDate::from_ymd_opt(2025, 1, 20),
            ),
            balance_qty_after: 10.0,
            aging: AgingBreakdown {
                current: 10.0,
                ..Default::default()
            },
        };

        let writer = CsvReportWriter::new();
        let csv = writer
            .write_to_string(&stock_card_layout(), &[row])
            .unwrap();

        // 日期列按佛历展示
        assert!(csv.contains("20/01/2568"));
    }

    #[test]
    fn test_write_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balance.csv");

        let writer = CsvReportWriter::new();
        writer
            .write_to_path(&balance_by_part_layout(), &[summary()], &path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("PART NO,"));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_empty_optional_fields_render_blank() {
        let row = TransactionRow {
            event: StockEvent::new("P-1001", 0.0, 5.0, None),
            balance_qty_after: 0.0,
            aging: AgingBreakdown::default(),
        };

        let writer = CsvReportWriter::new();
        let csv = writer
            .write_to_string(&stock_card_layout(), &[row])
            .unwrap();

        // 文档号/供应商/日期缺失 -> 空单元格
        let data_line = csv.lines().nth(1).unwrap();
        assert!(data_line.starts_with("P-1001,,,,,"));
    }
}
