// ==========================================
// VMI 仓库管理系统 - 领域模型层
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 1/3. 数据模型
// ==========================================
// 职责: 定义领域实体、类型、值对象
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod lot;
pub mod report;
pub mod stock_event;
pub mod types;

// 重导出核心类型
pub use lot::{InventoryLot, LotLedger};
pub use report::{AgingBreakdown, PartSummary, TransactionRow};
pub use stock_event::{RawStockRecord, StockEvent};
pub use types::{AgingBucket, DqLevel};
