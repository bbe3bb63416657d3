use std::collections::HashMap;

use util::sync::Mutex;

use super::StatsReportType;

/// StatsCollector gathers reports keyed by stats id from every component
/// asked to contribute to a single stats snapshot.
#[derive(Debug)]
pub struct StatsCollector {
    pub(crate) reports: Mutex<HashMap<String, StatsReportType>>,
}

impl Default for StatsCollector {
    fn default() -> Self {
        StatsCollector {
            reports: Mutex::new(HashMap::new()),
        }
    }
}

impl StatsCollector {
    pub fn new() -> Self {
        StatsCollector::default()
    }

    pub(crate) fn merge(&self, stats: HashMap<String, StatsReportType>) {
        let mut reports = self.reports.lock();
        reports.extend(stats)
    }

    pub fn into_reports(self) -> HashMap<String, StatsReportType> {
        self.reports.into_inner()
    }
}
