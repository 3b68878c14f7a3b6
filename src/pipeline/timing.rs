use std::collections::HashMap;
use std::time::{Duration, Instant};

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Instant,
    phase_start_times: HashMap<&'static str, Instant>,
    phase_durations: Vec<(&'static str, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: HashMap::new(),
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &'static str) {
        self.phase_start_times.insert(phase_name, Instant::now());
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &'static str) -> Option<Duration> {
        let start_time = self.phase_start_times.remove(phase_name)?;
        let duration = start_time.elapsed();
        self.phase_durations.push((phase_name, duration));
        Some(duration)
    }

    /// 汇总为不可变的计时结果
    pub fn finish(self) -> StageTimings {
        StageTimings {
            phases: self.phase_durations,
            total: self.start_time.elapsed(),
        }
    }
}

/// 各阶段执行时间，按结束顺序排列
#[derive(Debug, Clone, PartialEq)]
pub struct StageTimings {
    pub phases: Vec<(&'static str, Duration)>,
    pub total: Duration,
}

impl StageTimings {
    pub fn phase(&self, phase_name: &str) -> Option<Duration> {
        self.phases
            .iter()
            .find(|(name, _)| *name == phase_name)
            .map(|(_, duration)| *duration)
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!("总执行时间: {:.2}秒\n", self.total.as_secs_f64());

        if !self.phases.is_empty() {
            report.push_str("\n各阶段执行时间:\n");
            for (phase, duration) in &self.phases {
                report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_recorded_in_end_order() {
        let mut scope = TimingScope::new();
        scope.start_phase("retrieve");
        assert!(scope.end_phase("retrieve").is_some());
        scope.start_phase("synthesize");
        assert!(scope.end_phase("synthesize").is_some());

        let timings = scope.finish();
        let names: Vec<&str> = timings.phases.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["retrieve", "synthesize"]);
        assert!(timings.phase("retrieve").is_some());
        assert!(timings.phase("compose").is_none());
        assert!(timings.total >= timings.phase("retrieve").unwrap());
    }

    #[test]
    fn test_end_without_start() {
        let mut scope = TimingScope::new();
        assert_eq!(scope.end_phase("retrieve"), None);
        assert!(scope.finish().phases.is_empty());
    }

    #[test]
    fn test_timing_report_format() {
        let timings = StageTimings {
            phases: vec![
                ("retrieve", Duration::from_millis(1500)),
                ("synthesize", Duration::from_millis(250)),
            ],
            total: Duration::from_millis(1750),
        };

        let report = timings.generate_timing_report();
        assert!(report.starts_with("总执行时间: 1.75秒"));
        assert!(report.contains("- retrieve: 1.500秒"));
        assert!(report.contains("- synthesize: 0.250秒"));
    }
}
