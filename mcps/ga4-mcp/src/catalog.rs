//! The report catalog
//!
//! Every tool is one row of this table. Custom reports take their columns
//! from the caller; canned and event reports carry fixed ones. Alias tools
//! (`get_custom_report`, `get_conversion_data`) are rows of their own so they
//! keep their own error label and, for conversions, their own metric.

/// Every report the server can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    QueryAnalytics,
    CustomReport,
    Realtime,
    TrafficSources,
    UserDemographics,
    PagePerformance,
    KeyEvents,
    Conversions,
}

/// Static description of one report tool
#[derive(Debug)]
pub struct ReportDefinition {
    /// Tool name as listed to clients
    pub tool: &'static str,
    /// Used in `Error <label>: <message>`
    pub error_label: &'static str,
    /// Fixed dimensions; empty for caller-defined reports
    pub dimensions: &'static [&'static str],
    /// Fixed metrics; empty for caller-defined reports
    pub metrics: &'static [&'static str],
}

static QUERY_ANALYTICS: ReportDefinition = ReportDefinition {
    tool: "query_analytics",
    error_label: "querying analytics",
    dimensions: &[],
    metrics: &[],
};

static CUSTOM_REPORT: ReportDefinition = ReportDefinition {
    tool: "get_custom_report",
    error_label: "getting custom report",
    dimensions: &[],
    metrics: &[],
};

static REALTIME: ReportDefinition = ReportDefinition {
    tool: "get_realtime_data",
    error_label: "getting real-time data",
    dimensions: &[],
    metrics: &[],
};

static TRAFFIC_SOURCES: ReportDefinition = ReportDefinition {
    tool: "get_traffic_sources",
    error_label: "getting traffic sources",
    dimensions: &["sessionDefaultChannelGroup", "sessionSource", "sessionMedium"],
    metrics: &["sessions", "totalUsers"],
};

static USER_DEMOGRAPHICS: ReportDefinition = ReportDefinition {
    tool: "get_user_demographics",
    error_label: "getting user demographics",
    dimensions: &["country", "city", "deviceCategory"],
    metrics: &["totalUsers", "newUsers"],
};

static PAGE_PERFORMANCE: ReportDefinition = ReportDefinition {
    tool: "get_page_performance",
    error_label: "getting page performance",
    dimensions: &["pagePath", "pageTitle"],
    metrics: &["screenPageViews", "activeUsers"],
};

static KEY_EVENTS: ReportDefinition = ReportDefinition {
    tool: "get_key_event_data",
    error_label: "getting key event data",
    dimensions: &["eventName"],
    metrics: &["keyEvents"],
};

static CONVERSIONS: ReportDefinition = ReportDefinition {
    tool: "get_conversion_data",
    error_label: "getting conversion data",
    dimensions: &["eventName"],
    metrics: &["conversions"],
};

impl ReportKind {
    pub const ALL: [ReportKind; 8] = [
        ReportKind::QueryAnalytics,
        ReportKind::CustomReport,
        ReportKind::Realtime,
        ReportKind::TrafficSources,
        ReportKind::UserDemographics,
        ReportKind::PagePerformance,
        ReportKind::KeyEvents,
        ReportKind::Conversions,
    ];

    pub fn definition(self) -> &'static ReportDefinition {
        match self {
            ReportKind::QueryAnalytics => &QUERY_ANALYTICS,
            ReportKind::CustomReport => &CUSTOM_REPORT,
            ReportKind::Realtime => &REALTIME,
            ReportKind::TrafficSources => &TRAFFIC_SOURCES,
            ReportKind::UserDemographics => &USER_DEMOGRAPHICS,
            ReportKind::PagePerformance => &PAGE_PERFORMANCE,
            ReportKind::KeyEvents => &KEY_EVENTS,
            ReportKind::Conversions => &CONVERSIONS,
        }
    }

    pub fn tool_name(self) -> &'static str {
        self.definition().tool
    }

    pub fn from_tool_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tool_name() == name)
    }

    /// Format a backend failure the way every tool reports it
    pub fn error_text(self, message: impl std::fmt::Display) -> String {
        format!("Error {}: {}", self.definition().error_label, message)
    }

    pub fn fixed_dimensions(self) -> Vec<String> {
        self.definition().dimensions.iter().map(|d| d.to_string()).collect()
    }

    pub fn fixed_metrics(self) -> Vec<String> {
        self.definition().metrics.iter().map(|m| m.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tool_names_are_unique_and_resolvable() {
        let names: HashSet<_> = ReportKind::ALL.iter().map(|k| k.tool_name()).collect();
        assert_eq!(names.len(), ReportKind::ALL.len());

        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::from_tool_name(kind.tool_name()), Some(kind));
        }
        assert_eq!(ReportKind::from_tool_name("get_weather"), None);
    }

    #[test]
    fn test_aliases_keep_their_own_labels() {
        assert_ne!(
            ReportKind::CustomReport.definition().error_label,
            ReportKind::QueryAnalytics.definition().error_label
        );
        assert_ne!(
            ReportKind::Conversions.fixed_metrics(),
            ReportKind::KeyEvents.fixed_metrics()
        );
    }

    #[test]
    fn test_canned_reports_have_fixed_columns() {
        for kind in [
            ReportKind::TrafficSources,
            ReportKind::UserDemographics,
            ReportKind::PagePerformance,
            ReportKind::KeyEvents,
            ReportKind::Conversions,
        ] {
            assert!(!kind.definition().dimensions.is_empty(), "{:?}", kind);
            assert!(!kind.definition().metrics.is_empty(), "{:?}", kind);
        }
    }

    #[test]
    fn test_event_reports_filter_on_event_name() {
        for kind in [ReportKind::KeyEvents, ReportKind::Conversions] {
            assert_eq!(
                kind.fixed_dimensions(),
                vec![crate::types::EVENT_NAME_DIMENSION.to_string()]
            );
        }
        assert_eq!(ReportKind::KeyEvents.fixed_metrics(), vec!["keyEvents"]);
        assert_eq!(ReportKind::Conversions.fixed_metrics(), vec!["conversions"]);
    }

    #[test]
    fn test_error_text() {
        assert_eq!(
            ReportKind::Realtime.error_text("quota exceeded"),
            "Error getting real-time data: quota exceeded"
        );
    }
}
