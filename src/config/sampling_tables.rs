// ==========================================
// 定制生产订单编排系统 - 抽检标准表数据
// ==========================================
// 依据: GB/T 2828.1 / ISO 2859-1 正常检验一次抽样方案
// 红线: 标准表以数据表达, 不手写分支; 近似公式与查表严格区分
// ==========================================

use crate::domain::types::InspectionLevel;

// ==========================================
// 批量区间 → 样本量字码 (按一般检验水平)
// ==========================================
// (批量下限, 批量上限, 水平I字码, 水平II字码, 水平III字码)
// 上限 i64::MAX 表示开区间
pub const LOT_RANGE_TABLE: &[(i64, i64, char, char, char)] = &[
    (2, 8, 'A', 'A', 'B'),
    (9, 15, 'A', 'B', 'C'),
    (16, 25, 'B', 'C', 'D'),
    (26, 50, 'C', 'D', 'E'),
    (51, 90, 'C', 'E', 'F'),
    (91, 150, 'D', 'F', 'G'),
    (151, 280, 'E', 'G', 'H'),
    (281, 500, 'F', 'H', 'J'),
    (501, 1200, 'G', 'J', 'K'),
    (1201, 3200, 'H', 'K', 'L'),
    (3201, 10_000, 'J', 'L', 'M'),
    (10_001, 35_000, 'K', 'M', 'N'),
    (35_001, 150_000, 'L', 'N', 'P'),
    (150_001, 500_000, 'M', 'P', 'Q'),
    (500_001, i64::MAX, 'N', 'Q', 'R'),
];

// ==========================================
// 样本量字码 → 样本量
// ==========================================
pub const CODE_SAMPLE_SIZE_TABLE: &[(char, i64)] = &[
    ('A', 2),
    ('B', 3),
    ('C', 5),
    ('D', 8),
    ('E', 13),
    ('F', 20),
    ('G', 32),
    ('H', 50),
    ('J', 80),
    ('K', 125),
    ('L', 200),
    ('M', 315),
    ('N', 500),
    ('P', 800),
    ('Q', 1250),
    ('R', 2000),
];

// ==========================================
// (AQL 键, 样本量) → 接收数 Ac
// ==========================================
// 正常检验一次抽样主表的精确条目 (Re = Ac + 1 恒成立)
// AQL 键 = 百分比 × 100 取整, 避免浮点键: 2.5% → 250
// 表外组合走近似公式回退 (计算器内明确标记 approximated)
pub const ACCEPTANCE_TABLE: &[(i64, i64, i64)] = &[
    // AQL 0.65%
    (65, 20, 0),
    (65, 80, 1),
    (65, 125, 2),
    (65, 200, 3),
    (65, 315, 5),
    (65, 500, 7),
    (65, 800, 10),
    (65, 1250, 14),
    (65, 2000, 21),
    // AQL 1.0%
    (100, 13, 0),
    (100, 50, 1),
    (100, 80, 2),
    (100, 125, 3),
    (100, 200, 5),
    (100, 315, 7),
    (100, 500, 10),
    (100, 800, 14),
    (100, 1250, 21),
    // AQL 1.5%
    (150, 8, 0),
    (150, 32, 1),
    (150, 50, 2),
    (150, 80, 3),
    (150, 125, 5),
    (150, 200, 7),
    (150, 315, 10),
    (150, 500, 14),
    (150, 800, 21),
    // AQL 2.5%
    (250, 5, 0),
    (250, 20, 1),
    (250, 32, 2),
    (250, 50, 3),
    (250, 80, 5),
    (250, 125, 7),
    (250, 200, 10),
    (250, 315, 14),
    (250, 500, 21),
    // AQL 4.0%
    (400, 3, 0),
    (400, 13, 1),
    (400, 20, 2),
    (400, 32, 3),
    (400, 50, 5),
    (400, 80, 7),
    (400, 125, 10),
    (400, 200, 14),
    (400, 315, 21),
    // AQL 6.5%
    (650, 2, 0),
    (650, 8, 1),
    (650, 13, 2),
    (650, 20, 3),
    (650, 32, 5),
    (650, 50, 7),
    (650, 80, 10),
    (650, 125, 14),
    (650, 200, 21),
];

/// 按检验水平在批量区间表中查样本量字码
pub fn code_letter_for(lot_size: i64, level: InspectionLevel) -> Option<char> {
    LOT_RANGE_TABLE
        .iter()
        .find(|(lo, hi, _, _, _)| lot_size >= *lo && lot_size <= *hi)
        .map(|(_, _, l1, l2, l3)| match level {
            InspectionLevel::I => *l1,
            InspectionLevel::II => *l2,
            InspectionLevel::III => *l3,
        })
}

/// 字码对应的样本量
pub fn sample_size_for(code: char) -> Option<i64> {
    CODE_SAMPLE_SIZE_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, n)| *n)
}

/// 查 (AQL, 样本量) 的精确接收数条目
///
/// 键为 AQL百分比 × 100 取整: 0.65% → 65, 2.5% → 250
pub fn acceptance_entry(aql_times_100: i64, sample_size: i64) -> Option<i64> {
    ACCEPTANCE_TABLE
        .iter()
        .find(|(aql, n, _)| *aql == aql_times_100 && *n == sample_size)
        .map(|(_, _, ac)| *ac)
}
