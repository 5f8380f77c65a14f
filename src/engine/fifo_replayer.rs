// ==========================================
// VMI 仓库管理系统 - FIFO 台账回放引擎
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 4.2 FIFO 批次台账
// 红线: 批次永不为负; 缺口静默止于零, 不抛错
// ==========================================
// 职责: 逐笔事务回放批次台账, 输出事务后余额 +
//       以各事务自身日期为参考的历史库龄快照
// 输入: 按事务时间预排序的 StockEvent 列表
// 输出: TransactionRow 列表（与输入同序）
// ==========================================

use crate::domain::lot::LotLedger;
use crate::domain::report::{AgingBreakdown, TransactionRow};
use crate::domain::stock_event::StockEvent;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

// ==========================================
// FifoReplayer - FIFO 台账回放引擎
// ==========================================
pub struct FifoReplayer;

impl FifoReplayer {
    /// 创建新的台账回放引擎
    pub fn new() -> Self {
        Self {}
    }

    /// 回放多部品事务流
    ///
    /// 调用方负责按事务时间升序预排序（无时间戳时保持原序）。
    /// 每个部品各自维护独立台账, 行输出顺序与输入一致。
    #[instrument(skip(self, events), fields(event_count = events.len()))]
    pub fn replay(&self, events: &[StockEvent]) -> Vec<TransactionRow> {
        let mut ledgers: HashMap<&str, LotLedger> = HashMap::new();
        let mut rows = Vec::with_capacity(events.len());

        for event in events {
            let ledger = ledgers.entry(event.part_id.as_str()).or_default();
            rows.push(Self::apply_event(ledger, event));
        }

        debug!(
            row_count = rows.len(),
            part_count = ledgers.len(),
            "台账回放完成"
        );

        rows
    }

    /// 回放单一部品的事务流（核心原语）
    ///
    /// 输入必须同属一个部品; 分组由调用方或 replay 负责。
    pub fn replay_part(&self, events: &[StockEvent]) -> Vec<TransactionRow> {
        let mut ledger = LotLedger::new();
        events
            .iter()
            .map(|event| Self::apply_event(&mut ledger, event))
            .collect()
    }

    /// 将一笔事务应用到台账, 产出明细行
    ///
    /// # 步骤（顺序固定, 同一事务先入后出）
    /// a. stock_in_qty > 0 且有入库日期: 队尾追加新批次
    ///    （无日期入库不建批次, 不进入余额 —— 不可计龄量只存在于汇总口径）
    /// b. stock_out_qty > 0: 从最旧批次起 FIFO 消耗, 缺口止于零
    /// c. balance_qty_after = 剩余批次数量之和
    /// d. 库龄快照以本事务自身日期为参考; 事务日期缺失时输出全零快照
    fn apply_event(ledger: &mut LotLedger, event: &StockEvent) -> TransactionRow {
        if event.stock_in_qty > 0.0 {
            if let Some(stock_in_date) = event.stock_in_date {
                ledger.receive(stock_in_date, event.stock_in_qty);
            }
        }

        if event.stock_out_qty > 0.0 {
            let issued = ledger.issue(event.stock_out_qty);
            if issued + f64::EPSILON < event.stock_out_qty {
                // 出库超过可用量: 数据质量信号, 记录后继续
                warn!(
                    part_id = %event.part_id,
                    requested = event.stock_out_qty,
                    issued,
                    "出库量超过在库量, 已止于零"
                );
            }
        }

        let aging = match event.stock_in_date {
            Some(as_of) => ledger.aging_as_of(as_of),
            None => AgingBreakdown::default(),
        };

        TransactionRow {
            event: event.clone(),
            balance_qty_after: ledger.balance(),
            aging,
        }
    }
}

impl Default for FifoReplayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base() -> NaiveDate {
        date(2025, 6, 30)
    }

    fn days_ago(n: i64) -> Option<NaiveDate> {
        Some(base() - Duration::days(n))
    }

    #[test]
    fn test_replay_running_balance() {
        let events = vec![
            StockEvent::new("A", 50.0, 0.0, days_ago(60)),
            StockEvent::new("A", 30.0, 0.0, days_ago(10)),
            StockEvent::new("A", 0.0, 20.0, days_ago(5)),
        ];

        let replayer = FifoReplayer::new();
        let rows = replayer.replay(&events);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].balance_qty_after, 50.0);
        assert_eq!(rows[1].balance_qty_after, 80.0);
        assert_eq!(rows[2].balance_qty_after, 60.0);
    }

    #[test]
    fn test_fifo_depletion_oldest_first() {
        // 批次 [50 @60天前, 30 @10天前], 出库 60
        // -> 50 批次耗尽, 30 批次扣 10, 剩 {10天前, 20}
        let events = vec![
            StockEvent::new("A", 50.0, 0.0, days_ago(60)),
            StockEvent::new("A", 30.0, 0.0, days_ago(10)),
            StockEvent::new("A", 0.0, 60.0, days_ago(0)),
        ];

        let replayer = FifoReplayer::new();
        let rows = replayer.replay(&events);

        let last = rows.last().unwrap();
        assert_eq!(last.balance_qty_after, 20.0);
        // 剩余批次 10 天前入库 -> CURRENT=20
        assert_eq!(last.aging.current, 20.0);
        assert_eq!(last.aging.total(), 20.0);
    }

    #[test]
    fn test_aging_snapshot_uses_event_own_date() {
        // 同一批次在不同事务时点落入不同分桶（历史库龄构成）
        let events = vec![
            StockEvent::new("A", 40.0, 0.0, days_ago(100)),
            // 事务时点距批次入库 75 天 -> 60DAY
            StockEvent::new("A", 10.0, 0.0, days_ago(25)),
        ];

        let replayer = FifoReplayer::new();
        let rows = replayer.replay(&events);

        // 行 1: 以 100 天前为参考, 批次当日入库 -> CURRENT
        assert_eq!(rows[0].aging.current, 40.0);

        // 行 2: 以 25 天前为参考, 老批次已 75 天 -> 60DAY, 新批次 CURRENT
        assert_eq!(rows[1].aging.day60, 40.0);
        assert_eq!(rows[1].aging.current, 10.0);
    }

    #[test]
    fn test_shortfall_clamps_at_zero() {
        let events = vec![
            StockEvent::new("A", 10.0, 0.0, days_ago(30)),
            StockEvent::new("A", 0.0, 25.0, days_ago(0)),
        ];

        let replayer = FifoReplayer::new();
        let rows = replayer.replay(&events);

        assert_eq!(rows[1].balance_qty_after, 0.0);
    }

    #[test]
    fn test_conservation_property() {
        // 最终余额 = Σ入库 - Σmin(出库, 可用); 永不为负, 不超过 Σ入库
        let events = vec![
            StockEvent::new("A", 100.0, 0.0, days_ago(90)),
            StockEvent::new("A", 0.0, 30.0, days_ago(50)),
            StockEvent::new("A", 20.0, 0.0, days_ago(40)),
            StockEvent::new("A", 0.0, 200.0, days_ago(10)), // 缺口
            StockEvent::new("A", 15.0, 0.0, days_ago(5)),
        ];

        let replayer = FifoReplayer::new();
        let rows = replayer.replay(&events);

        let final_balance = rows.last().unwrap().balance_qty_after;
        // 100 - 30 = 70 在库, 出库 200 止于 70 -> 0, 再入 15
        assert_eq!(final_balance, 15.0);
        assert!(final_balance >= 0.0);
        let total_in: f64 = events.iter().map(|e| e.stock_in_qty).sum();
        assert!(final_balance <= total_in);
    }

    #[test]
    fn test_in_before_out_within_same_event() {
        // 同一事务先入后出: 本事务入库量可被本事务出库消耗
        let events = vec![StockEvent::new("A", 50.0, 20.0, days_ago(10))];

        let replayer = FifoReplayer::new();
        let rows = replayer.replay(&events);

        assert_eq!(rows[0].balance_qty_after, 30.0);
        assert_eq!(rows[0].aging.current, 30.0);
    }

    #[test]
    fn test_undated_stock_in_never_enters_ledger() {
        let events = vec![
            StockEvent::new("A", 50.0, 0.0, None),
            StockEvent::new("A", 0.0, 10.0, days_ago(0)),
        ];

        let replayer = FifoReplayer::new();
        let rows = replayer.replay(&events);

        // 无日期入库不建批次 -> 余额 0, 出库止于零
        assert_eq!(rows[0].balance_qty_after, 0.0);
        assert_eq!(rows[1].balance_qty_after, 0.0);
    }

    #[test]
    fn test_undated_event_emits_zero_snapshot() {
        let events = vec![
            StockEvent::new("A", 50.0, 0.0, days_ago(40)),
            StockEvent::new("A", 0.0, 10.0, None),
        ];

        let replayer = FifoReplayer::new();
        let rows = replayer.replay(&events);

        // 事务日期缺失: 快照全零, 余额照常
        assert_eq!(rows[1].balance_qty_after, 40.0);
        assert_eq!(rows[1].aging, AgingBreakdown::default());
    }

    #[test]
    fn test_parts_have_independent_ledgers() {
        let events = vec![
            StockEvent::new("A", 50.0, 0.0, days_ago(30)),
            StockEvent::new("B", 20.0, 0.0, days_ago(30)),
            StockEvent::new("A", 0.0, 50.0, days_ago(0)),
        ];

        let replayer = FifoReplayer::new();
        let rows = replayer.replay(&events);

        // B 的台账不受 A 出库影响
        assert_eq!(rows[1].balance_qty_after, 20.0);
        assert_eq!(rows[2].balance_qty_after, 0.0);
    }

    #[test]
    fn test_rows_preserve_input_order_and_fields() {
        let mut event = StockEvent::new("A", 5.0, 0.0, days_ago(1));
        event.document_no = Some("GRN-0012".to_string());
        let events = vec![event.clone()];

        let replayer = FifoReplayer::new();
        let rows = replayer.replay(&events);

        assert_eq!(rows[0].event, event);
    }

    #[test]
    fn test_replay_part_matches_replay_single_part() {
        let events = vec![
            StockEvent::new("A", 50.0, 0.0, days_ago(60)),
            StockEvent::new("A", 0.0, 20.0, days_ago(10)),
        ];

        let replayer = FifoReplayer::new();
        assert_eq!(replayer.replay_part(&events), replayer.replay(&events));
    }
}
