// ==========================================
// VMI 仓库管理系统 - 库龄汇总引擎
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 4.1 按部品汇总
// 红线: 纯函数, 无 I/O, 无共享状态, 同输入同输出
// ==========================================
// 职责: 按部品分组汇总出入库总量 + 当前余额库龄分桶
// 输入: 标准化 StockEvent 列表 + 报表参考日期
// 输出: PartSummary 列表（按 part_id 升序）
// ==========================================

use crate::domain::report::{AgingBreakdown, PartSummary};
use crate::domain::stock_event::StockEvent;
use crate::domain::types::AgingBucket;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

// ==========================================
// AgingAggregator - 库龄汇总引擎
// ==========================================
pub struct AgingAggregator;

impl AgingAggregator {
    /// 创建新的库龄汇总引擎
    pub fn new() -> Self {
        Self {}
    }

    /// 按部品汇总出入库总量与当前余额库龄
    ///
    /// # 规则
    /// 1. 按 part_id 分组（首次出现顺序与结果无关）
    /// 2. 入库/出库总量逐组求和; 余额 = 入库 - 出库, 可为负不钳制
    ///    （负余额是数据质量信号, 不是需要吞掉的错误）
    /// 3. 分桶按"逐事件净留存"口径: 对每个 stock_in_qty > 0 且有入库
    ///    日期的事件, net = 本事件入库 - 本事件出库, 为正时按
    ///    参考日期与入库日期的整天数差分桶累加; 负天数不计入
    /// 4. 每组输出一行, 按 part_id 升序
    ///
    /// 日期缺失的事件不参与分桶, 但数量照常计入总量。
    #[instrument(skip(self, events), fields(event_count = events.len()))]
    pub fn aggregate(&self, events: &[StockEvent], reference_date: NaiveDate) -> Vec<PartSummary> {
        // BTreeMap 分组: 键有序, 输出天然按 part_id 升序
        let mut groups: BTreeMap<&str, (f64, f64, AgingBreakdown)> = BTreeMap::new();

        for event in events {
            let entry = groups
                .entry(event.part_id.as_str())
                .or_insert_with(|| (0.0, 0.0, AgingBreakdown::default()));

            entry.0 += event.stock_in_qty;
            entry.1 += event.stock_out_qty;

            // 逐事件净留存分桶（口径见 Report_Engine_Specs 4.1 第 3 步）
            if event.stock_in_qty > 0.0 {
                if let Some(stock_in_date) = event.stock_in_date {
                    let net_remaining = event.net_remaining();
                    if net_remaining > 0.0 {
                        let days = (reference_date - stock_in_date).num_days();
                        if let Some(bucket) = AgingBucket::from_days(days) {
                            entry.2.add(bucket, net_remaining);
                        }
                    }
                }
            }
        }

        let summaries: Vec<PartSummary> = groups
            .into_iter()
            .map(|(part_id, (stock_in_qty, stock_out_qty, aging))| PartSummary {
                part_id: part_id.to_string(),
                stock_in_qty,
                stock_out_qty,
                balance_qty: stock_in_qty - stock_out_qty,
                aging,
            })
            .collect();

        debug!(
            part_count = summaries.len(),
            %reference_date,
            "库龄汇总完成"
        );

        summaries
    }
}

impl Default for AgingAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reference() -> NaiveDate {
        date(2025, 6, 30)
    }

    fn days_ago(n: i64) -> Option<NaiveDate> {
        Some(reference() - Duration::days(n))
    }

    #[test]
    fn test_aggregate_empty_input() {
        let aggregator = AgingAggregator::new();
        let result = aggregator.aggregate(&[], reference());
        assert!(result.is_empty());
    }

    #[test]
    fn test_aggregate_totals_and_balance() {
        let events = vec![
            StockEvent::new("P-1001", 100.0, 0.0, days_ago(5)),
            StockEvent::new("P-1001", 0.0, 30.0, None),
            StockEvent::new("P-2002", 10.0, 25.0, days_ago(1)),
        ];

        let aggregator = AgingAggregator::new();
        let result = aggregator.aggregate(&events, reference());

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].part_id, "P-1001");
        assert_eq!(result[0].stock_in_qty, 100.0);
        assert_eq!(result[0].stock_out_qty, 30.0);
        assert_eq!(result[0].balance_qty, 70.0);

        // 负余额不钳制
        assert_eq!(result[1].part_id, "P-2002");
        assert_eq!(result[1].balance_qty, -15.0);
    }

    #[test]
    fn test_aggregate_sorted_by_part_id() {
        let events = vec![
            StockEvent::new("Z-9", 1.0, 0.0, days_ago(1)),
            StockEvent::new("A-1", 1.0, 0.0, days_ago(1)),
            StockEvent::new("M-5", 1.0, 0.0, days_ago(1)),
        ];

        let aggregator = AgingAggregator::new();
        let result = aggregator.aggregate(&events, reference());

        let ids: Vec<&str> = result.iter().map(|s| s.part_id.as_str()).collect();
        assert_eq!(ids, vec!["A-1", "M-5", "Z-9"]);
    }

    #[test]
    fn test_per_event_net_remaining_bucketing() {
        // 场景: 200 天前入库 100, 另一无日期事件出库 40
        // 分桶按逐事件口径: 事件 1 净留存 100 全部落入 OVER150,
        // 出库 40 只影响总量与余额（与台账 FIFO 口径的已知差异）
        let events = vec![
            StockEvent::new("A", 100.0, 0.0, days_ago(200)),
            StockEvent::new("A", 0.0, 40.0, None),
        ];

        let aggregator = AgingAggregator::new();
        let result = aggregator.aggregate(&events, reference());

        assert_eq!(result.len(), 1);
        let summary = &result[0];
        assert_eq!(summary.stock_in_qty, 100.0);
        assert_eq!(summary.stock_out_qty, 40.0);
        assert_eq!(summary.balance_qty, 60.0);
        assert_eq!(summary.aging.over150, 100.0);
        assert_eq!(summary.aging.current, 0.0);
        assert_eq!(summary.aging.day30, 0.0);
    }

    #[test]
    fn test_same_event_stock_out_reduces_bucket() {
        // 同事件既有入库又有出库: 净留存 = 60, 落入对应分桶
        let events = vec![StockEvent::new("A", 100.0, 40.0, days_ago(45))];

        let aggregator = AgingAggregator::new();
        let result = aggregator.aggregate(&events, reference());

        assert_eq!(result[0].aging.day30, 60.0);
        assert_eq!(result[0].aging.total(), 60.0);
    }

    #[test]
    fn test_undated_stock_in_counts_in_totals_only() {
        let events = vec![StockEvent::new("A", 50.0, 0.0, None)];

        let aggregator = AgingAggregator::new();
        let result = aggregator.aggregate(&events, reference());

        assert_eq!(result[0].stock_in_qty, 50.0);
        assert_eq!(result[0].balance_qty, 50.0);
        // 无日期 -> 不可计龄
        assert_eq!(result[0].aging.total(), 0.0);
    }

    #[test]
    fn test_future_date_contributes_nothing() {
        let events = vec![StockEvent::new("A", 50.0, 0.0, days_ago(-10))];

        let aggregator = AgingAggregator::new();
        let result = aggregator.aggregate(&events, reference());

        assert_eq!(result[0].stock_in_qty, 50.0);
        assert_eq!(result[0].aging.total(), 0.0);
    }

    #[test]
    fn test_negative_net_remaining_not_bucketed() {
        // 本事件出库大于入库: 净留存为负, 不分桶
        let events = vec![StockEvent::new("A", 10.0, 15.0, days_ago(40))];

        let aggregator = AgingAggregator::new();
        let result = aggregator.aggregate(&events, reference());

        assert_eq!(result[0].balance_qty, -5.0);
        assert_eq!(result[0].aging.total(), 0.0);
    }

    #[test]
    fn test_partition_property_bucket_sum_le_balance() {
        // 全部事件有日期且无跨事件出库时, 六档之和 = 余额
        let events = vec![
            StockEvent::new("A", 100.0, 20.0, days_ago(10)),
            StockEvent::new("A", 50.0, 10.0, days_ago(70)),
            StockEvent::new("A", 30.0, 0.0, days_ago(160)),
        ];

        let aggregator = AgingAggregator::new();
        let result = aggregator.aggregate(&events, reference());

        let summary = &result[0];
        assert_eq!(summary.aging.total(), summary.balance_qty);

        // 含无日期事件时, 六档之和 <= 余额
        let mut events_with_undated = events.clone();
        events_with_undated.push(StockEvent::new("A", 40.0, 0.0, None));
        let result = aggregator.aggregate(&events_with_undated, reference());
        assert!(result[0].aging.total() <= result[0].balance_qty);
    }

    #[test]
    fn test_idempotence() {
        let events = vec![
            StockEvent::new("A", 100.0, 20.0, days_ago(10)),
            StockEvent::new("B", 50.0, 10.0, days_ago(70)),
            StockEvent::new("A", 0.0, 5.0, None),
        ];

        let aggregator = AgingAggregator::new();
        let first = aggregator.aggregate(&events, reference());
        let second = aggregator.aggregate(&events, reference());

        assert_eq!(first, second);
    }

    #[test]
    fn test_grouping_order_irrelevant() {
        let events_a = vec![
            StockEvent::new("A", 10.0, 0.0, days_ago(5)),
            StockEvent::new("B", 20.0, 0.0, days_ago(5)),
            StockEvent::new("A", 5.0, 0.0, days_ago(40)),
        ];
        let events_b = vec![
            StockEvent::new("A", 5.0, 0.0, days_ago(40)),
            StockEvent::new("B", 20.0, 0.0, days_ago(5)),
            StockEvent::new("A", 10.0, 0.0, days_ago(5)),
        ];

        let aggregator = AgingAggregator::new();
        assert_eq!(
            aggregator.aggregate(&events_a, reference()),
            aggregator.aggregate(&events_b, reference())
        );
    }
}
