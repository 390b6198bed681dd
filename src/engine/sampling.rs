// ==========================================
// 定制生产订单编排系统 - 抽检方案计算器
// ==========================================
// 依据: Order_Orchestration_Specs.md - 4.5 SamplingPlanCalculator
// 依据: GB/T 2828.1 / ISO 2859-1 正常检验一次抽样
// 红线: 输入非法时拒绝请求, 绝不返回半成品方案
// 红线: rejection = acceptance + 1 恒成立 (一次抽样, 无间隙)
// ==========================================

use crate::config::sampling_tables;
use crate::domain::sampling::SamplingPlan;
use crate::domain::types::InspectionLevel;
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// SamplingCalculator - 抽检方案计算器
// ==========================================
pub struct SamplingCalculator;

impl SamplingCalculator {
    /// 计算一次抽样方案
    ///
    /// # 规则
    /// 1. 按检验水平在批量区间表查样本量字码; 批量落在所有区间外 → 错误
    /// 2. 在主表查 (AQL, 样本量) 的精确 Ac/Re 条目;
    ///    无精确条目 → 近似公式 Ac = floor(n × AQL / 100), Re = Ac + 1,
    ///    并在方案上标记 approximated
    /// 3. 样本量不超过批量 (小批量截断);
    ///    接收数不超过 样本量 - 1, 保证拒收数在样本内可达
    ///
    /// # 参数
    /// - lot_size: 批量
    /// - aql_percent: 接收质量限 (百分比, 如 2.5)
    /// - level: 检验水平 (I/II/III)
    pub fn plan(
        lot_size: i64,
        aql_percent: f64,
        level: InspectionLevel,
    ) -> EngineResult<SamplingPlan> {
        if !aql_percent.is_finite() || aql_percent <= 0.0 {
            return Err(EngineError::InvalidQualityLimit { aql: aql_percent });
        }

        let code_letter = sampling_tables::code_letter_for(lot_size, level)
            .ok_or(EngineError::LotSizeOutOfRange { lot_size })?;

        let table_sample_size = sampling_tables::sample_size_for(code_letter)
            .ok_or_else(|| {
                EngineError::InternalError(format!("字码无样本量定义: {}", code_letter))
            })?;

        // AQL 键: 百分比 × 100 取整 (2.5 → 250)
        let aql_key = (aql_percent * 100.0).round() as i64;

        let (acceptance_number, approximated) =
            match sampling_tables::acceptance_entry(aql_key, table_sample_size) {
                Some(ac) => (ac, false),
                // 近似回退: 与标准查表严格区分
                None => {
                    let ac = (table_sample_size as f64 * aql_percent / 100.0).floor() as i64;
                    (ac, true)
                }
            };

        // 小批量截断: 样本量不超过批量
        let sample_size = table_sample_size.min(lot_size);
        // 大 AQL 的近似公式可能给出 Ac >= n, 拒收将不可达; 截到样本内
        let acceptance_number = acceptance_number.min(sample_size - 1);

        Ok(SamplingPlan {
            lot_size,
            aql_percent,
            level,
            code_letter,
            sample_size,
            acceptance_number,
            rejection_number: acceptance_number + 1,
            approximated,
        })
    }

    /// 字符串水平入口 (API 层使用)
    ///
    /// 无法识别的水平 → UnknownInspectionLevel
    pub fn plan_with_level_str(
        lot_size: i64,
        aql_percent: f64,
        level: &str,
    ) -> EngineResult<SamplingPlan> {
        let parsed = InspectionLevel::from_str(level).ok_or_else(|| {
            EngineError::UnknownInspectionLevel {
                level: level.to_string(),
            }
        })?;
        Self::plan(lot_size, aql_percent, parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================
    // 测试 1: 标准查表
    // ==========================================

    #[test]
    fn test_plan_lot_150_aql_2_5_level_ii() {
        // 规格场景: 批量150, AQL2.5, 水平II → F/20/1/2
        let plan = SamplingCalculator::plan(150, 2.5, InspectionLevel::II).unwrap();
        assert_eq!(plan.code_letter, 'F');
        assert_eq!(plan.sample_size, 20);
        assert_eq!(plan.acceptance_number, 1);
        assert_eq!(plan.rejection_number, 2);
        assert!(!plan.approximated);
    }

    #[test]
    fn test_plan_lot_5000_aql_1_0_level_ii() {
        let plan = SamplingCalculator::plan(5000, 1.0, InspectionLevel::II).unwrap();
        assert_eq!(plan.code_letter, 'L');
        assert_eq!(plan.sample_size, 200);
        assert_eq!(plan.acceptance_number, 5);
        assert_eq!(plan.rejection_number, 6);
        assert!(!plan.approximated);
    }

    #[test]
    fn test_plan_level_i_smaller_sample() {
        let plan_i = SamplingCalculator::plan(150, 2.5, InspectionLevel::I).unwrap();
        let plan_ii = SamplingCalculator::plan(150, 2.5, InspectionLevel::II).unwrap();
        assert_eq!(plan_i.code_letter, 'D');
        assert_eq!(plan_i.sample_size, 8);
        assert!(plan_i.sample_size <= plan_ii.sample_size);
    }

    // ==========================================
    // 测试 2: 近似回退
    // ==========================================

    #[test]
    fn test_plan_fallback_formula_flagged() {
        // 水平I 批量150 → D/8; (2.5, 8) 无精确条目 → floor(8×2.5/100)=0
        let plan = SamplingCalculator::plan(150, 2.5, InspectionLevel::I).unwrap();
        assert!(plan.approximated);
        assert_eq!(plan.acceptance_number, 0);
        assert_eq!(plan.rejection_number, 1);
    }

    #[test]
    fn test_plan_nonstandard_aql_uses_fallback() {
        let plan = SamplingCalculator::plan(150, 3.0, InspectionLevel::II).unwrap();
        assert!(plan.approximated);
        // floor(20 × 3.0 / 100) = 0
        assert_eq!(plan.acceptance_number, 0);
        assert_eq!(plan.rejection_number, 1);
    }

    // ==========================================
    // 测试 3: 不变量
    // ==========================================

    #[test]
    fn test_rejection_always_acceptance_plus_one() {
        for lot in [5, 30, 150, 1000, 20_000, 600_000] {
            for aql in [0.65, 1.0, 1.5, 2.5, 4.0, 6.5, 3.3] {
                let plan = SamplingCalculator::plan(lot, aql, InspectionLevel::II).unwrap();
                assert_eq!(plan.rejection_number, plan.acceptance_number + 1);
            }
        }
    }

    #[test]
    fn test_sample_size_monotone_in_lot_size() {
        // 同水平同AQL下, 批量增大样本量不回退
        let lots = [2, 8, 9, 20, 80, 150, 400, 1000, 3000, 9000, 30_000, 100_000];
        let mut prev = 0;
        for lot in lots {
            let plan = SamplingCalculator::plan(lot, 2.5, InspectionLevel::II).unwrap();
            assert!(plan.sample_size >= prev, "lot={} 样本量回退", lot);
            prev = plan.sample_size;
        }
    }

    #[test]
    fn test_sample_size_never_exceeds_lot() {
        let plan = SamplingCalculator::plan(2, 6.5, InspectionLevel::III).unwrap();
        assert!(plan.sample_size <= plan.lot_size);
        assert_eq!(plan.rejection_number, plan.acceptance_number + 1);
    }

    #[test]
    fn test_rejection_reachable_within_sample() {
        // 极小批量 + 大 AQL: 回退公式给出 Ac = floor(2×100/100) = 2 = n,
        // 拒收数必须截回样本内 (Re <= n)
        let plan = SamplingCalculator::plan(2, 100.0, InspectionLevel::II).unwrap();
        assert!(plan.approximated);
        assert_eq!(plan.sample_size, 2);
        assert_eq!(plan.acceptance_number, 1);
        assert_eq!(plan.rejection_number, 2);
        assert!(plan.rejection_number <= plan.sample_size);
    }

    // ==========================================
    // 测试 4: 非法输入
    // ==========================================

    #[test]
    fn test_plan_lot_out_of_range() {
        assert!(matches!(
            SamplingCalculator::plan(1, 2.5, InspectionLevel::II),
            Err(EngineError::LotSizeOutOfRange { lot_size: 1 })
        ));
        assert!(matches!(
            SamplingCalculator::plan(0, 2.5, InspectionLevel::II),
            Err(EngineError::LotSizeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_plan_unknown_level_str() {
        assert!(matches!(
            SamplingCalculator::plan_with_level_str(150, 2.5, "S-2"),
            Err(EngineError::UnknownInspectionLevel { .. })
        ));
        assert!(SamplingCalculator::plan_with_level_str(150, 2.5, "ii").is_ok());
    }

    #[test]
    fn test_plan_invalid_aql() {
        assert!(matches!(
            SamplingCalculator::plan(150, 0.0, InspectionLevel::II),
            Err(EngineError::InvalidQualityLimit { .. })
        ));
        assert!(matches!(
            SamplingCalculator::plan(150, -1.0, InspectionLevel::II),
            Err(EngineError::InvalidQualityLimit { .. })
        ));
    }
}
