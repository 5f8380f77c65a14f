// ==========================================
// VMI 仓库管理系统 - 报表输出领域模型
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 3. 输出数据模型
// 用途: 聚合引擎输出, 由展示层/导出层消费
// ==========================================

use crate::domain::stock_event::StockEvent;
use crate::domain::types::AgingBucket;
use serde::{Deserialize, Serialize};

// ==========================================
// AgingBreakdown - 库龄六档分解
// ==========================================
// 六档字段之和 = 有确定库龄的在库量（无日期批次静默省略）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgingBreakdown {
    pub current: f64, // 0-29 天
    pub day30: f64,   // 30-59 天
    pub day60: f64,   // 60-89 天
    pub day90: f64,   // 90-119 天
    pub day120: f64,  // 120-149 天
    pub over150: f64, // >= 150 天
}

impl AgingBreakdown {
    /// 向指定分桶累加数量
    pub fn add(&mut self, bucket: AgingBucket, qty: f64) {
        match bucket {
            AgingBucket::Current => self.current += qty,
            AgingBucket::Day30 => self.day30 += qty,
            AgingBucket::Day60 => self.day60 += qty,
            AgingBucket::Day90 => self.day90 += qty,
            AgingBucket::Day120 => self.day120 += qty,
            AgingBucket::Over150 => self.over150 += qty,
        }
    }

    /// 读取指定分桶的数量
    pub fn get(&self, bucket: AgingBucket) -> f64 {
        match bucket {
            AgingBucket::Current => self.current,
            AgingBucket::Day30 => self.day30,
            AgingBucket::Day60 => self.day60,
            AgingBucket::Day90 => self.day90,
            AgingBucket::Day120 => self.day120,
            AgingBucket::Over150 => self.over150,
        }
    }

    /// 六档合计
    pub fn total(&self) -> f64 {
        AgingBucket::ALL.iter().map(|b| self.get(*b)).sum()
    }
}

// ==========================================
// PartSummary - 部品汇总行
// ==========================================
// 简单聚合器输出: 每个部品一行, 按 part_id 升序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSummary {
    /// 部品号/尺寸代码
    pub part_id: String,

    /// 入库总量
    pub stock_in_qty: f64,

    /// 出库总量
    pub stock_out_qty: f64,

    /// 余额 = 入库 - 出库（可为负, 不钳制）
    pub balance_qty: f64,

    /// 当前余额的库龄分解（以报表参考日期计）
    #[serde(flatten)]
    pub aging: AgingBreakdown,
}

// ==========================================
// TransactionRow - 台账明细行
// ==========================================
// FIFO 回放输出: 每笔事务一行, 携带事务后余额与
// 以该事务自身日期为参考的历史库龄快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    /// 原始事件字段（整体透传）
    #[serde(flatten)]
    pub event: StockEvent,

    /// 本笔事务处理后的在库余额
    pub balance_qty_after: f64,

    /// 以本笔事务日期为参考的库龄快照
    /// （事务日期缺失时为全零快照）
    pub aging: AgingBreakdown,
}
