// ==========================================
// 定制生产订单编排系统 - 工序依赖图排程器
// ==========================================
// 依据: Order_Orchestration_Specs.md - 4.4 DependencyGraphScheduler
// 职责: 并行层级划分、关键路径、瓶颈识别
// 红线: 图校验前置 (未解析前置/环路), 任何遍历前完成, 禁止无界递归
// 红线: 关键路径搜索每个分支持有自己的路径状态,
//       禁止跨兄弟分支共享可变 visited 集合
// ==========================================

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::domain::order::ProductionStep;
use crate::domain::types::StepStatus;
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// StepView - 工序视图
// ==========================================
// 排程输出用的轻量投影 (不回写工序本体)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub name: String,
    pub workcenter: String,
    pub status: StepStatus,
    pub work_minutes: i64,
}

impl StepView {
    fn of(step: &ProductionStep) -> Self {
        Self {
            name: step.name.clone(),
            workcenter: step.workcenter.clone(),
            status: step.status,
            work_minutes: step.work_minutes(),
        }
    }
}

// ==========================================
// 内部索引图
// ==========================================
// 以下标建图, 避免遍历期间反复按名称查找
struct IndexedGraph {
    /// predecessors[i] = 第 i 道工序的前置下标
    predecessors: Vec<Vec<usize>>,
    /// successors[i] = 依赖第 i 道工序的下标
    successors: Vec<Vec<usize>>,
}

// ==========================================
// StepGraphScheduler - 依赖图排程器
// ==========================================
pub struct StepGraphScheduler;

impl StepGraphScheduler {
    /// 图校验前置检查
    ///
    /// # 规则
    /// 1. 工序名订单内唯一
    /// 2. 每个前置名必须能在工序集合内解析
    /// 3. Kahn 层级消解必须消耗全部工序, 否则判定环路
    ///
    /// # 返回
    /// - Ok(()): 图合法 (无环 DAG)
    /// - Err(EngineError): DuplicateStep / UnknownPredecessor / DependencyCycle
    pub fn validate(steps: &[ProductionStep]) -> EngineResult<()> {
        Self::build_graph(steps).map(|_| ())
    }

    /// 并行层级划分
    ///
    /// # 规则
    /// - 根工序 (无前置) 层级 0
    /// - 其他工序层级 = 1 + max(前置层级)
    /// - 同层工序彼此无 (直接或传递) 依赖, 可并行执行
    /// - 层内顺序与输入顺序一致 (确定性输出)
    pub fn levels(steps: &[ProductionStep]) -> EngineResult<BTreeMap<usize, Vec<StepView>>> {
        let graph = Self::build_graph(steps)?;
        let levels = Self::assign_levels(steps, &graph);

        let mut result: BTreeMap<usize, Vec<StepView>> = BTreeMap::new();
        for (idx, step) in steps.iter().enumerate() {
            result
                .entry(levels[idx])
                .or_default()
                .push(StepView::of(step));
        }
        Ok(result)
    }

    /// 关键路径计算
    ///
    /// # 规则
    /// - 从任意根 (无前置) 到任意汇 (无后继) 的最长加权路径
    /// - 权重 = 数量 × 单件标准工时
    /// - 并列时保留输入顺序中先被发现的路径 (严格大于才替换)
    ///
    /// # 实现
    /// 显式栈穷举所有根→汇路径; 每个分支帧持有自己的路径副本,
    /// 不共享可变状态。典型工艺路线为几十道工序, 穷举可接受。
    pub fn critical_path(steps: &[ProductionStep]) -> EngineResult<(Vec<String>, i64)> {
        let graph = Self::build_graph(steps)?;
        if steps.is_empty() {
            return Ok((Vec::new(), 0));
        }

        let weights: Vec<i64> = steps.iter().map(|s| s.work_minutes()).collect();

        // 分支帧: (当前下标, 根到当前的路径, 路径累计权重)
        struct Frame {
            node: usize,
            path: Vec<usize>,
            total: i64,
        }

        let mut best_path: Vec<usize> = Vec::new();
        let mut best_total: i64 = -1;

        // 栈为 LIFO: 逆序压栈保证按输入顺序展开
        let mut stack: Vec<Frame> = Vec::new();
        for (idx, _) in steps.iter().enumerate().rev() {
            if graph.predecessors[idx].is_empty() {
                stack.push(Frame {
                    node: idx,
                    path: vec![idx],
                    total: weights[idx],
                });
            }
        }

        while let Some(frame) = stack.pop() {
            let succs = &graph.successors[frame.node];
            if succs.is_empty() {
                // 到达汇点: 严格大于才替换, 保证并列取先发现者
                if frame.total > best_total {
                    best_total = frame.total;
                    best_path = frame.path;
                }
                continue;
            }
            for &succ in succs.iter().rev() {
                // 每个分支拿自己的路径副本 (校验已排除环路)
                let mut path = frame.path.clone();
                path.push(succ);
                stack.push(Frame {
                    node: succ,
                    path,
                    total: frame.total + weights[succ],
                });
            }
        }

        let names = best_path
            .into_iter()
            .map(|idx| steps[idx].name.clone())
            .collect();
        Ok((names, best_total.max(0)))
    }

    /// 瓶颈工序识别
    ///
    /// # 规则
    /// - 关键路径上单道权重超过阈值的工序
    /// - 用于驱动操作建议 (拆分工序 / 增加并行产能)
    pub fn bottlenecks(
        steps: &[ProductionStep],
        threshold_minutes: i64,
    ) -> EngineResult<Vec<StepView>> {
        let (path_names, _) = Self::critical_path(steps)?;
        let by_name: HashMap<&str, &ProductionStep> =
            steps.iter().map(|s| (s.name.as_str(), s)).collect();

        Ok(path_names
            .iter()
            .filter_map(|name| by_name.get(name.as_str()))
            .filter(|s| s.work_minutes() > threshold_minutes)
            .map(|s| StepView::of(s))
            .collect())
    }

    // ==========================================
    // 内部: 建图 + 校验
    // ==========================================

    fn build_graph(steps: &[ProductionStep]) -> EngineResult<IndexedGraph> {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(steps.len());
        for (idx, step) in steps.iter().enumerate() {
            if index.insert(step.name.as_str(), idx).is_some() {
                return Err(EngineError::DuplicateStep {
                    name: step.name.clone(),
                });
            }
        }

        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); steps.len()];
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); steps.len()];
        for (idx, step) in steps.iter().enumerate() {
            for pred_name in &step.predecessors {
                let Some(&pred_idx) = index.get(pred_name.as_str()) else {
                    return Err(EngineError::UnknownPredecessor {
                        step: step.name.clone(),
                        predecessor: pred_name.clone(),
                    });
                };
                predecessors[idx].push(pred_idx);
                successors[pred_idx].push(idx);
            }
        }

        let graph = IndexedGraph {
            predecessors,
            successors,
        };

        // Kahn 消解: 消不完即有环 (自依赖也在此被捕获)
        let consumed = Self::count_consumable(steps.len(), &graph);
        if consumed != steps.len() {
            return Err(EngineError::DependencyCycle {
                remaining: steps.len() - consumed,
            });
        }

        Ok(graph)
    }

    fn count_consumable(n: usize, graph: &IndexedGraph) -> usize {
        let mut indegree: Vec<usize> = graph.predecessors.iter().map(|p| p.len()).collect();
        let mut queue: VecDeque<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
        let mut consumed = 0;

        while let Some(node) = queue.pop_front() {
            consumed += 1;
            for &succ in &graph.successors[node] {
                indegree[succ] -= 1;
                if indegree[succ] == 0 {
                    queue.push_back(succ);
                }
            }
        }
        consumed
    }

    /// 层级标注: level = 1 + max(前置层级), 根为 0
    ///
    /// 前提: 图已通过校验 (无环), 传播必然收敛
    fn assign_levels(steps: &[ProductionStep], graph: &IndexedGraph) -> Vec<usize> {
        let n = steps.len();
        let mut indegree: Vec<usize> = graph.predecessors.iter().map(|p| p.len()).collect();
        let mut levels: Vec<usize> = vec![0; n];
        let mut queue: VecDeque<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();

        while let Some(node) = queue.pop_front() {
            for &succ in &graph.successors[node] {
                levels[succ] = levels[succ].max(levels[node] + 1);
                indegree[succ] -= 1;
                if indegree[succ] == 0 {
                    queue.push_back(succ);
                }
            }
        }
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(name: &str, preds: &[&str], quantity: i64, minutes_per_unit: i64) -> ProductionStep {
        ProductionStep {
            name: name.to_string(),
            workcenter: "WC-01".to_string(),
            predecessors: preds.iter().map(|s| s.to_string()).collect(),
            status: StepStatus::NotStarted,
            quantity,
            standard_minutes_per_unit: minutes_per_unit,
        }
    }

    // ==========================================
    // 测试 1: 图校验
    // ==========================================

    #[test]
    fn test_validate_duplicate_step() {
        let steps = vec![step("裁切", &[], 1, 10), step("裁切", &[], 1, 10)];
        match StepGraphScheduler::validate(&steps) {
            Err(EngineError::DuplicateStep { name }) => assert_eq!(name, "裁切"),
            other => panic!("unexpected: {:?}", other.err()),
        }
    }

    #[test]
    fn test_validate_unknown_predecessor() {
        let steps = vec![step("焊接", &["裁切"], 1, 10)];
        match StepGraphScheduler::validate(&steps) {
            Err(EngineError::UnknownPredecessor { step, predecessor }) => {
                assert_eq!(step, "焊接");
                assert_eq!(predecessor, "裁切");
            }
            other => panic!("unexpected: {:?}", other.err()),
        }
    }

    #[test]
    fn test_validate_cycle_rejected_before_traversal() {
        let steps = vec![step("A", &["B"], 1, 10), step("B", &["A"], 1, 10)];
        match StepGraphScheduler::validate(&steps) {
            Err(EngineError::DependencyCycle { remaining }) => assert_eq!(remaining, 2),
            other => panic!("unexpected: {:?}", other.err()),
        }
        // 环路必须同样阻止关键路径计算
        assert!(StepGraphScheduler::critical_path(&steps).is_err());
    }

    #[test]
    fn test_validate_self_reference_is_cycle() {
        let steps = vec![step("A", &["A"], 1, 10)];
        assert!(matches!(
            StepGraphScheduler::validate(&steps),
            Err(EngineError::DependencyCycle { .. })
        ));
    }

    // ==========================================
    // 测试 2: 并行层级
    // ==========================================

    #[test]
    fn test_levels_roots_at_zero() {
        // A 无依赖; B/C 依赖 A → {0:[A], 1:[B,C]}
        let steps = vec![
            step("A", &[], 1, 60),
            step("B", &["A"], 1, 90),
            step("C", &["A"], 1, 30),
        ];
        let levels = StepGraphScheduler::levels(&steps).unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(
            levels[&0].iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["A"]
        );
        assert_eq!(
            levels[&1].iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["B", "C"]
        );
    }

    #[test]
    fn test_levels_strictly_above_predecessors() {
        let steps = vec![
            step("下料", &[], 1, 20),
            step("粗加工", &["下料"], 1, 40),
            step("精加工", &["粗加工"], 1, 50),
            step("表面处理", &["下料"], 1, 15),
            step("总装", &["精加工", "表面处理"], 1, 30),
        ];
        let levels = StepGraphScheduler::levels(&steps).unwrap();
        let level_of = |name: &str| -> usize {
            *levels
                .iter()
                .find_map(|(lvl, views)| {
                    views.iter().any(|v| v.name == name).then_some(lvl)
                })
                .unwrap()
        };
        assert_eq!(level_of("下料"), 0);
        assert!(level_of("粗加工") > level_of("下料"));
        assert!(level_of("精加工") > level_of("粗加工"));
        assert!(level_of("总装") > level_of("精加工"));
        assert!(level_of("总装") > level_of("表面处理"));
    }

    // ==========================================
    // 测试 3: 关键路径
    // ==========================================

    #[test]
    fn test_critical_path_simple_fork() {
        // A(60) → B(90) / C(30): 关键路径 A→B, 150 分钟
        let steps = vec![
            step("A", &[], 1, 60),
            step("B", &["A"], 1, 90),
            step("C", &["A"], 1, 30),
        ];
        let (path, total) = StepGraphScheduler::critical_path(&steps).unwrap();
        assert_eq!(path, vec!["A", "B"]);
        assert_eq!(total, 150);
    }

    #[test]
    fn test_critical_path_dominates_any_chain() {
        let steps = vec![
            step("A", &[], 2, 30),          // 60
            step("B", &["A"], 3, 30),       // 90
            step("C", &["A"], 1, 30),       // 30
            step("D", &["B", "C"], 1, 120), // 120
        ];
        let (path, total) = StepGraphScheduler::critical_path(&steps).unwrap();
        assert_eq!(path, vec!["A", "B", "D"]);
        assert_eq!(total, 270);
        // 任一独立链的时长不超过关键路径
        let chain_a_c_d = 60 + 30 + 120;
        assert!(total >= chain_a_c_d);
    }

    #[test]
    fn test_critical_path_tie_keeps_first_in_input_order() {
        // 两条等长路径 A→B 与 A→C, 保留先发现的 A→B
        let steps = vec![
            step("A", &[], 1, 10),
            step("B", &["A"], 1, 50),
            step("C", &["A"], 1, 50),
        ];
        let (path, total) = StepGraphScheduler::critical_path(&steps).unwrap();
        assert_eq!(path, vec!["A", "B"]);
        assert_eq!(total, 60);
    }

    #[test]
    fn test_critical_path_multiple_roots() {
        let steps = vec![
            step("甲线备料", &[], 1, 10),
            step("乙线备料", &[], 1, 100),
            step("合流", &["甲线备料", "乙线备料"], 1, 5),
        ];
        let (path, total) = StepGraphScheduler::critical_path(&steps).unwrap();
        assert_eq!(path, vec!["乙线备料", "合流"]);
        assert_eq!(total, 105);
    }

    #[test]
    fn test_critical_path_empty_steps() {
        let (path, total) = StepGraphScheduler::critical_path(&[]).unwrap();
        assert!(path.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn test_sibling_branches_do_not_share_path_state() {
        // 菱形 + 长尾: 若兄弟分支共享 visited, 第二条分支会被污染
        let steps = vec![
            step("S", &[], 1, 1),
            step("L", &["S"], 1, 2),
            step("R", &["S"], 1, 100),
            step("T", &["L", "R"], 1, 1),
        ];
        let (path, total) = StepGraphScheduler::critical_path(&steps).unwrap();
        assert_eq!(path, vec!["S", "R", "T"]);
        assert_eq!(total, 102);
    }

    // ==========================================
    // 测试 4: 瓶颈识别
    // ==========================================

    #[test]
    fn test_bottlenecks_on_critical_path_only() {
        let steps = vec![
            step("A", &[], 1, 60),
            step("B", &["A"], 1, 90),
            step("C", &["A"], 1, 300), // 权重大但需在关键路径上才算瓶颈
            step("D", &["C"], 1, 10),
        ];
        // 关键路径: A→C→D (370)
        let bottlenecks = StepGraphScheduler::bottlenecks(&steps, 80).unwrap();
        let names: Vec<&str> = bottlenecks.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["C"]);
    }

    #[test]
    fn test_bottlenecks_empty_when_under_threshold() {
        let steps = vec![step("A", &[], 1, 30), step("B", &["A"], 1, 40)];
        assert!(StepGraphScheduler::bottlenecks(&steps, 60)
            .unwrap()
            .is_empty());
    }
}
