// ==========================================
// VMI 仓库管理系统 - 数据清洗器
// ==========================================
// 依据: Field_Mapping_Spec_v1.0.md - 5. 清洗规则
// 职责: TRIM / UPPER / NULL 标准化 / 宽松日期解析
// 说明: 上游系统日期可能使用泰国佛历年份(公元 + 543),
//       清洗时统一换算为公元纪年
// ==========================================

use crate::importer::stock_importer::DataCleaner as DataCleanerTrait;
use chrono::{Datelike, NaiveDate};

/// 佛历年份下限: 年份达到该值视为佛历, 换算为公元(减 543)
const BUDDHIST_ERA_MIN_YEAR: i32 = 2400;

/// 佛历与公元的年份差
const BUDDHIST_ERA_OFFSET: i32 = 543;

pub struct DataCleaner;

impl DataCleaner {
    /// 佛历日期换算为公元日期(非佛历年份原样返回)
    fn to_common_era(date: NaiveDate) -> Option<NaiveDate> {
        if date.year() >= BUDDHIST_ERA_MIN_YEAR {
            NaiveDate::from_ymd_opt(
                date.year() - BUDDHIST_ERA_OFFSET,
                date.month(),
                date.day(),
            )
        } else {
            Some(date)
        }
    }
}

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 宽松日期解析
    ///
    /// 依次尝试 YYYYMMDD / YYYY-MM-DD / DD/MM/YYYY;
    /// 年份 >= 2400 视为佛历并换算为公元。
    /// 解析失败返回 None（不可计龄, 不抛错 —— 数量仍计入总量）。
    fn parse_date_flexible(&self, value: &str) -> Option<NaiveDate> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        let parsed = NaiveDate::parse_from_str(trimmed, "%Y%m%d")
            .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
            .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
            .ok()?;

        Self::to_common_era(parsed)
    }

    /// 宽松数量解析（去除千分位逗号后按浮点解析）
    fn parse_qty(&self, value: &str) -> Option<f64> {
        let cleaned = value.trim().replace(',', "");
        if cleaned.is_empty() {
            return None;
        }
        cleaned.parse::<f64>().ok()
    }
}
