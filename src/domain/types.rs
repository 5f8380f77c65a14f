// ==========================================
// VMI 仓库管理系统 - 领域类型定义
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 2. 库龄分桶体系
// 依据: Field_Mapping_Spec_v1.0.md - 数据质量等级
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 库龄分桶 (Aging Bucket)
// ==========================================
// 红线: 六档分桶互斥且穷举, 对任意非负天数恰好命中一档
// 负天数(未来日期)不命中任何档, 贡献为零
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgingBucket {
    Current, // 0-29 天
    Day30,   // 30-59 天
    Day60,   // 60-89 天
    Day90,   // 90-119 天
    Day120,  // 120-149 天
    Over150, // >= 150 天
}

impl AgingBucket {
    /// 全部分桶, 按天数升序
    pub const ALL: [AgingBucket; 6] = [
        AgingBucket::Current,
        AgingBucket::Day30,
        AgingBucket::Day60,
        AgingBucket::Day90,
        AgingBucket::Day120,
        AgingBucket::Over150,
    ];

    /// 按库龄天数分桶
    ///
    /// # 返回
    /// - Some(bucket): 非负天数恰好命中一档
    /// - None: 负天数(入库日期晚于参考日期), 不参与分桶
    pub fn from_days(days: i64) -> Option<AgingBucket> {
        match days {
            d if d < 0 => None,
            0..=29 => Some(AgingBucket::Current),
            30..=59 => Some(AgingBucket::Day30),
            60..=89 => Some(AgingBucket::Day60),
            90..=119 => Some(AgingBucket::Day90),
            120..=149 => Some(AgingBucket::Day120),
            _ => Some(AgingBucket::Over150),
        }
    }

    /// 分桶区间下限(天)
    pub fn min_days(&self) -> i64 {
        match self {
            AgingBucket::Current => 0,
            AgingBucket::Day30 => 30,
            AgingBucket::Day60 => 60,
            AgingBucket::Day90 => 90,
            AgingBucket::Day120 => 120,
            AgingBucket::Over150 => 150,
        }
    }

    /// 分桶区间上限(天, None 表示无上限)
    pub fn max_days(&self) -> Option<i64> {
        match self {
            AgingBucket::Current => Some(29),
            AgingBucket::Day30 => Some(59),
            AgingBucket::Day60 => Some(89),
            AgingBucket::Day90 => Some(119),
            AgingBucket::Day120 => Some(149),
            AgingBucket::Over150 => None,
        }
    }

    /// 报表列标签
    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::Current => "CURRENT",
            AgingBucket::Day30 => "30DAY",
            AgingBucket::Day60 => "60DAY",
            AgingBucket::Day90 => "90DAY",
            AgingBucket::Day120 => "120DAY",
            AgingBucket::Over150 => "OVER150",
        }
    }
}

impl fmt::Display for AgingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 数据质量等级 (DQ Level)
// ==========================================
// 依据: Field_Mapping_Spec_v1.0.md - 6. 数据质量规则
// Block 行不进入标准化输出, Warn 行保留并记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DqLevel {
    Pass,  // 通过
    Warn,  // 警告(保留)
    Block, // 阻断(剔除)
}

impl fmt::Display for DqLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DqLevel::Pass => write!(f, "PASS"),
            DqLevel::Warn => write!(f, "WARN"),
            DqLevel::Block => write!(f, "BLOCK"),
        }
    }
}
