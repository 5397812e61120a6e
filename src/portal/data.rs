/// Hard-coded dashboard sample data
///
/// Revenue-by-quarter and compliance-by-month series plus the headline
/// metric cards. Served as-is by the dashboard API; no persistence and no
/// computation behind any of it.
use serde::Serialize;

/// One quarter of revenue collection (INR crore)
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RevenuePoint {
    pub quarter: &'static str,
    pub revenue: u64,
}

/// One month of filing compliance rate (percent)
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CompliancePoint {
    pub month: &'static str,
    pub rate: f64,
}

/// A headline metric card on the dashboard
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: &'static str,
    pub delta: &'static str,
}

/// Revenue by quarter, INR crore
pub const REVENUE_SERIES: [RevenuePoint; 6] = [
    RevenuePoint { quarter: "Q1 23", revenue: 12000 },
    RevenuePoint { quarter: "Q2 23", revenue: 18000 },
    RevenuePoint { quarter: "Q3 23", revenue: 15000 },
    RevenuePoint { quarter: "Q4 23", revenue: 22000 },
    RevenuePoint { quarter: "Q1 24", revenue: 24000 },
    RevenuePoint { quarter: "Q2 24", revenue: 28000 },
];

/// Filing compliance rate by month, percent
pub const COMPLIANCE_SERIES: [CompliancePoint; 6] = [
    CompliancePoint { month: "Jan", rate: 88.2 },
    CompliancePoint { month: "Feb", rate: 89.1 },
    CompliancePoint { month: "Mar", rate: 89.5 },
    CompliancePoint { month: "Apr", rate: 90.3 },
    CompliancePoint { month: "May", rate: 91.8 },
    CompliancePoint { month: "Jun", rate: 92.5 },
];

/// Headline metric cards
pub const METRIC_CARDS: [MetricCard; 4] = [
    MetricCard {
        title: "Total Revenue",
        value: "₹45,231.89 Cr",
        delta: "+20.1% from last month",
    },
    MetricCard {
        title: "Compliance Rate",
        value: "92.5%",
        delta: "+2.8% from last quarter",
    },
    MetricCard {
        title: "Audits in Progress",
        value: "1,254",
        delta: "+18 from yesterday",
    },
    MetricCard {
        title: "e-Filed Returns",
        value: "1.25 Cr",
        delta: "This assessment year",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_lengths() {
        assert_eq!(REVENUE_SERIES.len(), 6);
        assert_eq!(COMPLIANCE_SERIES.len(), 6);
        assert_eq!(METRIC_CARDS.len(), 4);
    }

    #[test]
    fn test_compliance_rates_are_percentages() {
        for point in COMPLIANCE_SERIES {
            assert!((0.0..=100.0).contains(&point.rate));
        }
    }
}
