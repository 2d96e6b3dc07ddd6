//! Batch runner exercising every registered tool through the dispatcher.
//!
//! A run produces a [`QaReport`] with one [`ToolResult`] per tool. Reports
//! can be compared to find regressions and fed to a [`FlakinessTracker`] to
//! spot tools whose outcome changes between runs.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use chrono::Local;
use serde::Serialize;
use strum_macros::Display;

use crate::config::QaConfig;
use crate::debug;
use crate::dispatcher::Dispatcher;
use crate::error::Error;
use crate::method::{Category, TransformMethod};
use crate::options::Options;

/// Outcome of a tool over every sample of a run
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QaStatus {
    /// Every sample transformed within the slow threshold
    Passed,
    /// Every sample succeeded but some were slow, or a fallible tool
    /// rejected a sample that is not in its input format
    Warning,
    /// A sample produced any other error
    Failed,
    /// Excluded by configuration
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub name: String,
    pub category: Category,
    pub status: QaStatus,
    pub samples: usize,
    /// Samples a fallible tool rejected as badly formatted
    pub rejected: usize,
    /// Samples slower than the threshold
    pub slow: usize,
    pub failures: Vec<String>,
    pub total_time_ms: f64,
    pub slowest_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QaReport {
    pub generated_at: String,
    pub results: Vec<ToolResult>,
}

impl QaReport {
    pub fn count(&self, status: QaStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// `passed / (total - skipped)`, 0 when nothing ran
    pub fn pass_rate(&self) -> f64 {
        let ran = self.total() - self.count(QaStatus::Skipped);
        if ran == 0 {
            0.0
        } else {
            self.count(QaStatus::Passed) as f64 / ran as f64
        }
    }

    pub fn result(&self, name: &str) -> Option<&ToolResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Tools that passed in `previous` and fail in this report
    pub fn regressions<'a>(&'a self, previous: &QaReport) -> Vec<&'a ToolResult> {
        self.results
            .iter()
            .filter(|r| r.status == QaStatus::Failed)
            .filter(|r| {
                previous
                    .result(&r.name)
                    .is_some_and(|p| p.status == QaStatus::Passed)
            })
            .collect()
    }
}

/// Runs every tool of a dispatcher against the configured samples
#[derive(Debug, Clone)]
pub struct QaRunner {
    dispatcher: Dispatcher,
    config: QaConfig,
    options: HashMap<String, Options>,
}

impl QaRunner {
    pub fn new(dispatcher: Dispatcher, config: QaConfig) -> Self {
        QaRunner {
            dispatcher,
            config,
            options: HashMap::new(),
        }
    }

    /// Options passed to a tool on every call, keyed by tool name
    pub fn with_options(mut self, options: HashMap<String, Options>) -> Self {
        self.options = options;
        self
    }

    fn slow_threshold(&self) -> Duration {
        Duration::from_millis(self.config.slow_threshold_ms)
    }

    pub fn run(&self) -> QaReport {
        let results = self
            .dispatcher
            .registry()
            .all_methods()
            .iter()
            .map(|method| self.run_tool(method))
            .collect();

        QaReport {
            generated_at: Local::now().to_rfc3339(),
            results,
        }
    }

    pub fn run_tool(&self, method: &TransformMethod) -> ToolResult {
        let mut result = ToolResult {
            name: method.name().to_string(),
            category: method.category(),
            status: QaStatus::Skipped,
            samples: 0,
            rejected: 0,
            slow: 0,
            failures: Vec::new(),
            total_time_ms: 0.0,
            slowest_ms: 0.0,
        };
        if self.config.skip.iter().any(|s| s == method.name()) {
            debug!("Skipping {}", method.name());
            return result;
        }

        let empty = Options::new();
        let options = self.options.get(method.name()).unwrap_or(&empty);
        let threshold = self.slow_threshold();

        for sample in &self.config.samples {
            let start = Instant::now();
            let outcome = self.dispatcher.transform(method.name(), sample, options);
            let elapsed = start.elapsed();
            let elapsed_ms = elapsed.as_secs_f64() * 1000.0;

            result.samples += 1;
            result.total_time_ms += elapsed_ms;
            result.slowest_ms = result.slowest_ms.max(elapsed_ms);
            if elapsed > threshold {
                result.slow += 1;
            }

            match outcome {
                Ok(_) => {}
                Err(Error::Transformation(_)) if method.is_fallible() => result.rejected += 1,
                Err(e) => result.failures.push(format!("{:?}: {}", sample, e)),
            }
            debug!("{} on {:?} took {:.3}ms", method.name(), sample, elapsed_ms);
        }

        result.status = if !result.failures.is_empty() {
            QaStatus::Failed
        } else if result.slow > 0 || result.rejected > 0 {
            QaStatus::Warning
        } else {
            QaStatus::Passed
        };
        result
    }
}

/// Rolling pass/fail history per tool
#[derive(Debug, Clone)]
pub struct FlakinessTracker {
    window: usize,
    history: HashMap<String, VecDeque<bool>>,
}

/// A tool is only judged once it has more runs than this
const MIN_RUNS: usize = 5;
const FLAKY_RANGE: std::ops::RangeInclusive<f64> = 0.3..=0.9;

impl FlakinessTracker {
    pub fn new(window: usize) -> Self {
        FlakinessTracker {
            window: window.max(1),
            history: HashMap::new(),
        }
    }

    pub fn record(&mut self, name: &str, passed: bool) {
        let runs = self.history.entry(name.to_string()).or_default();
        runs.push_back(passed);
        while runs.len() > self.window {
            runs.pop_front();
        }
    }

    /// Records every non skipped tool of a report; warnings count as passes
    pub fn record_report(&mut self, report: &QaReport) {
        for result in &report.results {
            match result.status {
                QaStatus::Skipped => {}
                QaStatus::Failed => self.record(&result.name, false),
                QaStatus::Passed | QaStatus::Warning => self.record(&result.name, true),
            }
        }
    }

    /// `(passed, total)` runs inside the window
    pub fn runs(&self, name: &str) -> (usize, usize) {
        self.history.get(name).map_or((0, 0), |runs| {
            (runs.iter().filter(|&&p| p).count(), runs.len())
        })
    }

    /// `1 - passed / total` over the window, `None` without history
    pub fn score(&self, name: &str) -> Option<f64> {
        match self.runs(name) {
            (_, 0) => None,
            (passed, total) => Some(1.0 - passed as f64 / total as f64),
        }
    }

    pub fn is_flaky(&self, name: &str) -> bool {
        let (passed, total) = self.runs(name);
        total > MIN_RUNS && FLAKY_RANGE.contains(&(passed as f64 / total as f64))
    }

    /// Flaky tools with their score, worst first
    pub fn flaky_tools(&self) -> Vec<(String, f64)> {
        let mut flaky: Vec<(String, f64)> = self
            .history
            .keys()
            .filter(|name| self.is_flaky(name))
            .filter_map(|name| self.score(name).map(|s| (name.clone(), s)))
            .collect();
        flaky.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        flaky
    }
}

impl Default for FlakinessTracker {
    fn default() -> Self {
        FlakinessTracker::new(crate::constants::config::DEFAULT_FLAKINESS_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::registry::MethodRegistry;
    use std::sync::Arc;

    fn body(result: Result<String>) -> impl Fn(&str, &Options) -> Result<String> + Send + Sync {
        move |_: &str, _: &Options| -> Result<String> {
            match &result {
                Ok(s) => Ok(s.clone()),
                Err(e) => Err(Error::Msg(e.to_string())),
            }
        }
    }

    fn runner(skip: &[&str]) -> QaRunner {
        let mut registry = MethodRegistry::new();
        registry
            .register_all([
                TransformMethod::new("ok", Category::TextTools, "", body(Ok("x".into()))),
                TransformMethod::new("broken", Category::TextTools, "", body(Err("boom".into()))),
                TransformMethod::new(
                    "decoder",
                    Category::Encoding,
                    "",
                    |_: &str, _: &Options| -> Result<String> {
                        Err(Error::Transformation("bad format".into()))
                    },
                )
                .fallible(),
                TransformMethod::new(
                    "strict",
                    Category::Encoding,
                    "",
                    |_: &str, _: &Options| -> Result<String> {
                        Err(Error::Transformation("bad format".into()))
                    },
                ),
                TransformMethod::new("ignored", Category::TextTools, "", body(Err("boom".into()))),
            ])
            .unwrap();

        let config = QaConfig {
            samples: vec!["a".into(), "b".into()],
            skip: skip.iter().map(|s| s.to_string()).collect(),
            ..QaConfig::default()
        };
        QaRunner::new(Dispatcher::new(Arc::new(registry)), config)
    }

    #[test]
    fn test_statuses() {
        let report = runner(&["ignored"]).run();
        let status = |name: &str| report.result(name).unwrap().status;

        assert_eq!(status("ok"), QaStatus::Passed);
        assert_eq!(status("broken"), QaStatus::Failed);
        assert_eq!(status("decoder"), QaStatus::Warning);
        assert_eq!(status("strict"), QaStatus::Failed);
        assert_eq!(status("ignored"), QaStatus::Skipped);

        let broken = report.result("broken").unwrap();
        assert_eq!(broken.samples, 2);
        assert_eq!(broken.failures.len(), 2);
        assert_eq!(report.result("decoder").unwrap().rejected, 2);
        assert_eq!(report.result("ignored").unwrap().samples, 0);
    }

    #[test]
    fn test_pass_rate_excludes_skipped() {
        let report = runner(&["ignored"]).run();
        assert_eq!(report.total(), 5);
        assert_eq!(report.count(QaStatus::Skipped), 1);
        assert!((report.pass_rate() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_slow_calls_are_warnings() {
        let mut runner = runner(&[]);
        runner.config.slow_threshold_ms = 0;
        let mut registry = MethodRegistry::new();
        registry
            .register(TransformMethod::new(
                "sleepy",
                Category::TextTools,
                "",
                |input: &str, _: &Options| -> Result<String> {
                    std::thread::sleep(Duration::from_millis(2));
                    Ok(input.to_string())
                },
            ))
            .unwrap();
        runner.dispatcher = Dispatcher::new(Arc::new(registry));

        let report = runner.run();
        let sleepy = report.result("sleepy").unwrap();
        assert_eq!(sleepy.status, QaStatus::Warning);
        assert_eq!(sleepy.slow, 2);
        assert!(sleepy.slowest_ms >= 2.0);
    }

    #[test]
    fn test_regressions() {
        let previous = runner(&["broken"]).run();
        let mut current = runner(&[]).run();
        // "broken" was skipped before, so it is not a regression
        assert!(current.regressions(&previous).is_empty());

        let mut improved = previous.clone();
        for r in improved.results.iter_mut() {
            r.status = QaStatus::Passed;
        }
        let names: Vec<&str> = current
            .regressions(&improved)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["broken", "strict", "ignored"]);

        current.results.retain(|r| r.name != "strict");
        assert_eq!(current.regressions(&improved).len(), 2);
    }

    #[test]
    fn test_default_catalogue_has_no_failures() {
        let dispatcher = Dispatcher::with_defaults().unwrap();
        let report = QaRunner::new(dispatcher, QaConfig::default()).run();
        let failed: Vec<&str> = report
            .results
            .iter()
            .filter(|r| r.status == QaStatus::Failed)
            .map(|r| r.name.as_str())
            .collect();
        assert!(failed.is_empty(), "failed tools: {:?}", failed);
        assert!(report.count(QaStatus::Passed) > 90);
    }

    #[test]
    fn test_report_serializes_statuses_in_lowercase() {
        let report = runner(&["ignored"]).run();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["results"][0]["status"], "passed");
        assert_eq!(json["results"][0]["category"], "text-tools");
        assert_eq!(QaStatus::Warning.to_string(), "warning");
    }

    #[test]
    fn test_flakiness_window_and_score() {
        let mut tracker = FlakinessTracker::new(10);
        for i in 0..5 {
            tracker.record("tool", i % 2 == 0);
        }
        // Not enough runs yet
        assert!(!tracker.is_flaky("tool"));
        tracker.record("tool", false);
        assert_eq!(tracker.runs("tool"), (3, 6));
        assert!(tracker.is_flaky("tool"));
        assert!((tracker.score("tool").unwrap() - 0.5).abs() < 1e-9);

        for _ in 0..10 {
            tracker.record("tool", true);
        }
        assert_eq!(tracker.runs("tool"), (10, 10));
        assert!(!tracker.is_flaky("tool"));
        assert_eq!(tracker.score("tool"), Some(0.0));
        assert_eq!(tracker.score("unknown"), None);
    }

    #[test]
    fn test_flaky_bounds_are_inclusive() {
        let mut tracker = FlakinessTracker::new(20);
        // 3 of 10 passing: rate 0.3
        for i in 0..10 {
            tracker.record("low", i < 3);
            tracker.record("high", i < 9);
            tracker.record("dead", false);
        }
        assert!(tracker.is_flaky("low"));
        assert!(tracker.is_flaky("high"));
        assert!(!tracker.is_flaky("dead"));

        let flaky = tracker.flaky_tools();
        assert_eq!(flaky.len(), 2);
        assert_eq!(flaky[0].0, "low");
    }

    #[test]
    fn test_record_report() {
        let report = runner(&["ignored"]).run();
        let mut tracker = FlakinessTracker::default();
        tracker.record_report(&report);
        assert_eq!(tracker.runs("ok"), (1, 1));
        assert_eq!(tracker.runs("decoder"), (1, 1));
        assert_eq!(tracker.runs("broken"), (0, 1));
        assert_eq!(tracker.runs("ignored"), (0, 0));
    }
}
