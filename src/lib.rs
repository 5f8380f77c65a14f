// ==========================================
// VMI 仓库管理系统 - 报表引擎核心库
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 系统总纲
// 系统定位: 报表聚合核心（库龄分桶 / FIFO 台账）
// 边界: 无持久化, 无网络协议; HTTP/界面由外部承担
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 聚合规则
pub mod engine;

// 导入层 - 上传文件解析
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 报表层 - 布局与序列化
pub mod report;

// API 层 - 对外门面
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AgingBucket, DqLevel};

// 领域实体
pub use domain::{
    AgingBreakdown, InventoryLot, LotLedger, PartSummary, RawStockRecord, StockEvent,
    TransactionRow,
};

// 引擎
pub use engine::{AgingAggregator, FifoReplayer};

// 导入
pub use importer::{DqReport, ImportError, ImportOutcome, StockEventImporter};

// 配置
pub use config::{ReportConfig, ReportConfigReader};

// 报表
pub use report::{CsvReportWriter, ExportError, TableLayout};

// API
pub use api::{ApiError, ReportApi, StockRowsResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "VMI 仓库管理系统";

// ==========================================
// 预编译检查
// ==========================================
