// ==========================================
// VMI 仓库管理系统 - 库存数据导入器实现
// ==========================================
// 依据: Field_Mapping_Spec_v1.0.md - 导入管道（阶段 0-4）
// 职责: 串联解析/映射/校验/标准化, 产出 StockEvent + DQ 报告
// ==========================================

use crate::config::ReportConfigReader;
use crate::domain::stock_event::{RawStockRecord, StockEvent};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::dq_validator::DqValidator;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::stock_importer::{
    DataCleaner as DataCleanerTrait, DqValidator as DqValidatorTrait,
    FieldMapper as FieldMapperTrait, ImportOutcome, StockEventImporter,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

// ==========================================
// StockEventImporterImpl - 导入器实现
// ==========================================
pub struct StockEventImporterImpl {
    config: Arc<dyn ReportConfigReader>,
    parser: UniversalFileParser,
    mapper: FieldMapper,
    cleaner: DataCleaner,
}

impl StockEventImporterImpl {
    pub fn new(config: Arc<dyn ReportConfigReader>) -> Self {
        Self {
            config,
            parser: UniversalFileParser,
            mapper: FieldMapper::new(),
            cleaner: DataCleaner,
        }
    }

    /// 阶段 4: 未阻断记录标准化为 StockEvent
    ///
    /// 数量缺失归零; 部品号按配置统一大写
    fn normalize(&self, record: &RawStockRecord) -> Option<StockEvent> {
        let part_id = record.part_id.as_deref()?;
        let part_id = self
            .cleaner
            .clean_text(part_id, self.config.uppercase_part_id());

        Some(StockEvent {
            part_id,
            stock_in_qty: record.stock_in_qty.unwrap_or(0.0),
            stock_out_qty: record.stock_out_qty.unwrap_or(0.0),
            stock_in_date: record.stock_in_date,
            vendor_code: record.vendor_code.clone(),
            unit: record.unit.clone(),
            document_no: record.document_no.clone(),
        })
    }
}

impl StockEventImporter for StockEventImporterImpl {
    #[instrument(skip(self), fields(file = %file_path.display()))]
    fn import_from_file(&self, file_path: &Path) -> ImportResult<ImportOutcome> {
        let rows = self.parser.parse(file_path)?;
        self.import_from_rows(&rows)
    }

    fn import_from_rows(&self, rows: &[HashMap<String, String>]) -> ImportResult<ImportOutcome> {
        // 阶段 1: 字段映射（行号从 1 起, 对应数据首行）
        let mut records = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            records.push(self.mapper.map_to_raw_record(row, idx + 1)?);
        }

        // 阶段 3: DQ 校验
        let validator = DqValidator::new(self.config.qty_anomaly_threshold());
        let dq_report = validator.validate(&records);

        // 阶段 4: 标准化（Block 行剔除）
        let events: Vec<StockEvent> = records
            .iter()
            .filter(|r| !dq_report.is_blocked(r.row_number))
            .filter_map(|r| self.normalize(r))
            .collect();

        info!(
            source_rows = rows.len(),
            event_count = events.len(),
            blocked = dq_report.summary.blocked_rows,
            warned = dq_report.summary.warned_rows,
            "库存数据导入完成"
        );

        Ok(ImportOutcome {
            events,
            dq_report,
            source_rows: rows.len(),
        })
    }
}
