//! Logging of statistics about a solve, as lines of the form `PREFIX name=value`.
//!
//! Nothing is logged until [`configure_statistic_logging`] has been called, which the binary does
//! when asked to. Library users which never configure it pay nothing.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stderr;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::RwLock;
use std::time::Duration;

/// The options for statistic logging: the prefix in front of every statistic, the (optional)
/// line printed after a block of statistics, and the writer the statistics go to.
pub struct StatisticOptions {
    statistic_prefix: &'static str,
    after_statistics: Option<&'static str>,
    statistics_writer: Box<dyn Write + Send + Sync>,
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("statistic_prefix", &self.statistic_prefix)
            .field("after_statistics", &self.after_statistics)
            .field("statistics_writer", &"<Writer>")
            .finish()
    }
}

static STATISTIC_OPTIONS: OnceLock<RwLock<StatisticOptions>> = OnceLock::new();

/// Configures the logging of the statistics.
///
/// If no writer is given, statistics are written to stderr so they never mix with the result
/// document on stdout. Only the first call has an effect.
pub fn configure_statistic_logging(
    prefix: &'static str,
    after: Option<&'static str>,
    writer: Option<Box<dyn Write + Send + Sync>>,
) {
    let _ = STATISTIC_OPTIONS.get_or_init(|| {
        RwLock::from(StatisticOptions {
            statistic_prefix: prefix,
            after_statistics: after,
            statistics_writer: writer.unwrap_or(Box::new(stderr())),
        })
    });
}

/// Logs the provided statistic in the format `PREFIX name=value`.
pub fn log_statistic(name: impl Display, value: impl Display) {
    if let Some(statistic_options_lock) = STATISTIC_OPTIONS.get() {
        if let Ok(mut statistic_options) = statistic_options_lock.write() {
            let prefix = statistic_options.statistic_prefix;
            let _ = writeln!(
                statistic_options.statistics_writer,
                "{prefix} {name}={value}"
            );
        }
    }
}

/// Logs the closing line of a block of statistics, if one is configured.
pub fn log_statistic_postfix() {
    if let Some(statistic_options_lock) = STATISTIC_OPTIONS.get() {
        if let Ok(mut statistic_options) = statistic_options_lock.write() {
            if let Some(post_fix) = statistic_options.after_statistics {
                let _ = writeln!(statistic_options.statistics_writer, "{post_fix}");
            }
        }
    }
}

pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}

/// The statistics of a single solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolveStatistics {
    pub num_variables: usize,
    pub num_constraints: usize,
    pub num_tracked_constraints: usize,
    pub status: &'static str,
    pub time_spent: Duration,
}

impl SolveStatistics {
    pub fn log(&self) {
        if !should_log_statistics() {
            return;
        }

        log_statistic("numVariables", self.num_variables);
        log_statistic("numConstraints", self.num_constraints);
        log_statistic("numTrackedConstraints", self.num_tracked_constraints);
        log_statistic("status", self.status);
        log_statistic("timeSpentMs", self.time_spent.as_millis());
        log_statistic_postfix();
    }
}
