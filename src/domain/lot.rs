// ==========================================
// VMI 仓库管理系统 - 库存批次(Lot)领域模型
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 4.2 FIFO 批次台账
// 职责: 批次的创建/先进先出消耗/余额与库龄快照
// 红线: 批次数量永不为负; 耗尽即移除, 不再复活
// ==========================================

use crate::domain::report::AgingBreakdown;
use crate::domain::types::AgingBucket;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

// ==========================================
// InventoryLot - 库存批次
// ==========================================
// 同一入库日期的一笔入库量, 跟踪到完全消耗为止
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryLot {
    /// 入库日期
    pub stock_in_date: NaiveDate,

    /// 剩余数量
    pub qty: f64,
}

// ==========================================
// LotLedger - 批次台账
// ==========================================
// 有序批次队列: 入库追加到队尾, 出库从队首(最旧)消耗
#[derive(Debug, Clone, Default)]
pub struct LotLedger {
    lots: VecDeque<InventoryLot>,
}

impl LotLedger {
    /// 创建空台账
    pub fn new() -> Self {
        Self {
            lots: VecDeque::new(),
        }
    }

    /// 入库: 在队尾追加新批次（最新批次排最后）
    pub fn receive(&mut self, stock_in_date: NaiveDate, qty: f64) {
        if qty <= 0.0 {
            return;
        }
        self.lots.push_back(InventoryLot { stock_in_date, qty });
    }

    /// 出库: 严格 FIFO, 从最旧批次开始消耗
    ///
    /// 出库量超过可用量时静默止于零（数据质量信号, 不抛错）。
    ///
    /// # 返回
    /// 实际消耗数量（<= 请求量）
    pub fn issue(&mut self, qty: f64) -> f64 {
        let mut remaining_out = qty.max(0.0);
        let mut issued = 0.0;

        while remaining_out > 0.0 {
            let Some(head) = self.lots.front_mut() else {
                // 台账已空: 缺口静默止于零
                break;
            };

            let take = remaining_out.min(head.qty);
            head.qty -= take;
            issued += take;
            remaining_out -= take;

            if head.qty <= 0.0 {
                self.lots.pop_front();
            }
        }

        issued
    }

    /// 当前余额（全部剩余批次数量之和）
    pub fn balance(&self) -> f64 {
        self.lots.iter().map(|lot| lot.qty).sum()
    }

    /// 是否无在库批次
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// 开口批次数
    pub fn open_lot_count(&self) -> usize {
        self.lots.len()
    }

    /// 剩余批次快照（按入库先后排序）
    pub fn open_lots(&self) -> impl Iterator<Item = &InventoryLot> {
        self.lots.iter()
    }

    /// 以指定日期为参考的库龄快照
    ///
    /// 逐批次计算 days = as_of - stock_in_date, 按分桶累加剩余量;
    /// 未来日期批次(负天数)不命中任何档。
    pub fn aging_as_of(&self, as_of: NaiveDate) -> AgingBreakdown {
        let mut breakdown = AgingBreakdown::default();
        for lot in &self.lots {
            let days = (as_of - lot.stock_in_date).num_days();
            if let Some(bucket) = AgingBucket::from_days(days) {
                breakdown.add(bucket, lot.qty);
            }
        }
        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_receive_and_balance() {
        let mut ledger = LotLedger::new();
        ledger.receive(date(2025, 1, 1), 50.0);
        ledger.receive(date(2025, 2, 1), 30.0);

        assert_eq!(ledger.balance(), 80.0);
        assert_eq!(ledger.open_lot_count(), 2);
    }

    #[test]
    fn test_receive_zero_qty_ignored() {
        let mut ledger = LotLedger::new();
        ledger.receive(date(2025, 1, 1), 0.0);
        ledger.receive(date(2025, 1, 1), -5.0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_issue_fifo_order() {
        // 批次 [50 @1月, 30 @2月], 出库 60 -> 耗尽 50, 再从 30 中扣 10
        let mut ledger = LotLedger::new();
        ledger.receive(date(2025, 1, 1), 50.0);
        ledger.receive(date(2025, 2, 1), 30.0);

        let issued = ledger.issue(60.0);

        assert_eq!(issued, 60.0);
        assert_eq!(ledger.balance(), 20.0);
        assert_eq!(ledger.open_lot_count(), 1);
        let head = ledger.open_lots().next().unwrap();
        assert_eq!(head.stock_in_date, date(2025, 2, 1));
        assert_eq!(head.qty, 20.0);
    }

    #[test]
    fn test_issue_shortfall_clamps_at_zero() {
        let mut ledger = LotLedger::new();
        ledger.receive(date(2025, 1, 1), 10.0);

        let issued = ledger.issue(25.0);

        assert_eq!(issued, 10.0);
        assert_eq!(ledger.balance(), 0.0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_issue_on_empty_ledger() {
        let mut ledger = LotLedger::new();
        assert_eq!(ledger.issue(5.0), 0.0);
        assert_eq!(ledger.balance(), 0.0);
    }

    #[test]
    fn test_exhausted_lot_removed() {
        let mut ledger = LotLedger::new();
        ledger.receive(date(2025, 1, 1), 10.0);
        ledger.issue(10.0);

        // 耗尽即移除, 后续入库是新批次
        assert!(ledger.is_empty());
        ledger.receive(date(2025, 3, 1), 5.0);
        assert_eq!(ledger.open_lot_count(), 1);
    }

    #[test]
    fn test_aging_as_of() {
        let mut ledger = LotLedger::new();
        ledger.receive(date(2025, 1, 1), 50.0);   // 60 天前
        ledger.receive(date(2025, 2, 20), 30.0);  // 10 天前

        let breakdown = ledger.aging_as_of(date(2025, 3, 2));

        assert_eq!(breakdown.current, 30.0);
        assert_eq!(breakdown.day60, 50.0);
        assert_eq!(breakdown.total(), 80.0);
    }

    #[test]
    fn test_aging_future_lot_contributes_zero() {
        let mut ledger = LotLedger::new();
        ledger.receive(date(2025, 6, 1), 40.0);

        let breakdown = ledger.aging_as_of(date(2025, 3, 1));

        assert_eq!(breakdown.total(), 0.0);
        // 余额不受分桶影响
        assert_eq!(ledger.balance(), 40.0);
    }
}
