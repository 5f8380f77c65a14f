// ==========================================
// VMI 仓库管理系统 - 报表引擎层
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 4. 聚合引擎
// ==========================================
// 职责: 实现报表聚合规则, 纯内存计算
// 红线: 引擎不做 I/O, 不接受未标准化输入
// ==========================================

pub mod aging_aggregator;
pub mod fifo_replayer;

// 重导出核心引擎
pub use aging_aggregator::AgingAggregator;
pub use fifo_replayer::FifoReplayer;
