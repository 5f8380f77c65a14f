// ==========================================
// VMI 仓库管理系统 - 报表 API 门面
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 5. API 边界
// 职责: 串联导入/标准化/聚合/导出, 供展示层调用
// 红线: 纯同步, 无内部状态; 取消语义由调用方丢弃结果实现
// ==========================================

use crate::api::dto::StockRowsResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::config::ReportConfigReader;
use crate::domain::report::{PartSummary, TransactionRow};
use crate::domain::stock_event::StockEvent;
use crate::engine::{AgingAggregator, FifoReplayer};
use crate::importer::stock_importer::{ImportOutcome, StockEventImporter};
use crate::importer::stock_importer_impl::StockEventImporterImpl;
use crate::report::layout::{balance_by_part_layout, stock_card_layout};
use crate::report::CsvReportWriter;
use chrono::NaiveDate;
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// ReportApi - 报表门面
// ==========================================
pub struct ReportApi {
    importer: StockEventImporterImpl,
    aggregator: AgingAggregator,
    replayer: FifoReplayer,
    writer: CsvReportWriter,
}

impl ReportApi {
    pub fn new(config: Arc<dyn ReportConfigReader>) -> Self {
        Self {
            importer: StockEventImporterImpl::new(config),
            aggregator: AgingAggregator::new(),
            replayer: FifoReplayer::new(),
            writer: CsvReportWriter::new(),
        }
    }

    // ==========================================
    // 输入侧
    // ==========================================

    /// 主数据上传文件导入（CSV/Excel）
    pub fn import_file(&self, file_path: &Path) -> ApiResult<ImportOutcome> {
        Ok(self.importer.import_from_file(file_path)?)
    }

    /// 后端 JSON 行响应标准化
    pub fn parse_backend_payload(&self, payload: &str) -> ApiResult<Vec<StockEvent>> {
        let response: StockRowsResponse = serde_json::from_str(payload)
            .map_err(|e| ApiError::PayloadParseError(e.to_string()))?;
        Ok(response.normalize())
    }

    // ==========================================
    // 聚合侧
    // ==========================================

    /// 按部品余额/库龄汇总报表
    #[instrument(skip(self, events))]
    pub fn balance_by_part(
        &self,
        events: &[StockEvent],
        reference_date: NaiveDate,
    ) -> Vec<PartSummary> {
        self.aggregator.aggregate(events, reference_date)
    }

    /// 部品台账明细（FIFO 回放, 逐笔历史库龄）
    #[instrument(skip(self, events))]
    pub fn stock_card(&self, events: &[StockEvent]) -> Vec<TransactionRow> {
        self.replayer.replay(events)
    }

    // ==========================================
    // 导出侧
    // ==========================================

    /// 汇总报表导出 CSV
    pub fn export_balance_csv<P: AsRef<Path>>(
        &self,
        summaries: &[PartSummary],
        path: P,
    ) -> ApiResult<()> {
        self.writer
            .write_to_path(&balance_by_part_layout(), summaries, path)?;
        Ok(())
    }

    /// 台账明细导出 CSV
    pub fn export_stock_card_csv<P: AsRef<Path>>(
        &self,
        rows: &[TransactionRow],
        path: P,
    ) -> ApiResult<()> {
        self.writer
            .write_to_path(&stock_card_layout(), rows, path)?;
        Ok(())
    }
}
