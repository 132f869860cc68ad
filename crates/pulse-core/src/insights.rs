//! Insight cards for the AI insights page

use crate::models::{FinanceStats, InsightCard, Severity};

fn card(id: &str, title: &str, description: String, severity: Severity, action: &str) -> InsightCard {
    InsightCard {
        id: id.to_string(),
        title: title.to_string(),
        description,
        severity,
        action: action.to_string(),
    }
}

/// Build the insight cards for the current stats
///
/// The ROI, upsell and performance cards are always present; the cost card
/// appears only when the stats carry waste alerts.
pub fn build_insights(stats: &FinanceStats) -> Vec<InsightCard> {
    let mut cards = vec![card(
        "roi-positive",
        "ROI Trending Positive",
        format!(
            "Your ROI is at {}% with consistent growth. Revenue increased by 18% quarter-over-quarter.",
            stats.roi_percent
        ),
        Severity::Low,
        "Maintain current strategy",
    )];

    if !stats.waste_alerts.is_empty() {
        cards.push(card(
            "waste-alert",
            "Cost Optimization Opportunity",
            format!(
                "{} waste signals detected. Primary areas: Cloud infrastructure (compute), License consolidation.",
                stats.waste_alerts.len()
            ),
            Severity::Medium,
            "Review and optimize",
        ));
    }

    cards.push(card(
        "growth-opportunity",
        "Upsell Opportunity",
        "Based on client activity patterns, 6 clients are ready for service upgrades. Projected additional revenue: $42K annually.".to_string(),
        Severity::Low,
        "Launch upsell campaign",
    ));
    cards.push(card(
        "performance-health",
        "System Performance Excellent",
        "All KPIs are within optimal ranges. Client satisfaction at 4.8/5.0. System uptime: 99.97%."
            .to_string(),
        Severity::Low,
        "Continue monitoring",
    ));

    cards
}
