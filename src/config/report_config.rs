// ==========================================
// VMI 仓库管理系统 - 报表引擎配置
// ==========================================
// 依据: Report_Engine_Specs_v1.0.md - 7. 配置项全集
// 职责: 配置加载与查询（JSON 文件 + 默认值）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

// ==========================================
// ReportConfigReader - 配置读取接口
// ==========================================
// 导入层/DQ 校验通过该接口取配置, 测试可注入 Mock
pub trait ReportConfigReader: Send + Sync {
    /// 数量异常阈值（超过即 Warn, 可能单位错误）
    fn qty_anomaly_threshold(&self) -> f64;

    /// 部品号是否统一转大写
    fn uppercase_part_id(&self) -> bool;
}

// ==========================================
// ReportConfig - 配置实体
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 数量异常阈值
    pub qty_anomaly_threshold: f64,

    /// 部品号统一转大写
    pub uppercase_part_id: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            qty_anomaly_threshold: 1_000_000.0,
            uppercase_part_id: true,
        }
    }
}

impl ReportConfig {
    /// 从 JSON 文件加载配置; 缺失字段回落到默认值
    pub fn from_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let config: ReportConfig =
            serde_json::from_str(&raw).map_err(|e| ImportError::ConfigReadError {
                key: path.display().to_string(),
                message: e.to_string(),
            })?;

        info!(file = %path.display(), "报表配置加载完成");
        Ok(config)
    }
}

impl ReportConfigReader for ReportConfig {
    fn qty_anomaly_threshold(&self) -> f64 {
        self.qty_anomaly_threshold
    }

    fn uppercase_part_id(&self) -> bool {
        self.uppercase_part_id
    }
}
