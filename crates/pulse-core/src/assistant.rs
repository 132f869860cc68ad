//! Keyword-driven assistant replies
//!
//! Replies are canned text chosen by the first keyword found in the
//! lower-cased message. Rules are checked in priority order. The compact
//! widget persona knows fewer topics than the full assistant page.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::FinanceStats;
use crate::stats::DEFAULT_ROI;

/// Maximum waste signals listed in a full-persona reply
const MAX_LISTED_WASTE_ALERTS: usize = 3;

pub const WIDGET_GREETING: &str =
    "Hi! Ask me: 'Show my ROI trend', 'Detect overspending', or 'Suggest growth action'.";

pub const ASSISTANT_GREETING: &str = "Hello! I'm your AI Assistant. I can help you analyze your business growth, detect cost inefficiencies, and suggest optimization strategies. Try one of the quick prompts below or ask me anything!";

/// Suggested prompts offered by the full assistant
pub const QUICK_PROMPTS: [&str; 6] = [
    "Show my ROI trend",
    "Detect overspending",
    "Suggest growth action",
    "Analyze my costs",
    "Review my performance",
    "Give optimization tips",
];

/// Which chat surface is asking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Floating chat widget
    Widget,
    /// Full-page assistant
    #[default]
    Full,
}

impl FromStr for Persona {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "widget" => Ok(Self::Widget),
            "full" | "assistant" => Ok(Self::Full),
            other => Err(Error::InvalidData(format!("unknown persona: {}", other))),
        }
    }
}

/// Topic a message was matched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Roi,
    Waste,
    Growth,
    Performance,
    Clients,
    Agents,
    Forecast,
    Unknown,
}

const WIDGET_RULES: &[(Intent, &[&str])] = &[
    (Intent::Roi, &["roi"]),
    (Intent::Waste, &["overspend", "waste"]),
    (Intent::Growth, &["suggest", "growth"]),
];

const FULL_RULES: &[(Intent, &[&str])] = &[
    (Intent::Roi, &["roi"]),
    (Intent::Waste, &["overspend", "waste", "cost"]),
    (Intent::Growth, &["suggest", "growth", "optimization"]),
    (Intent::Performance, &["performance", "review"]),
    (Intent::Clients, &["client"]),
    (Intent::Agents, &["agent", "marketplace"]),
    (Intent::Forecast, &["forecast", "predict"]),
];

/// Match a message to the first intent whose keyword it contains
pub fn classify(persona: Persona, text: &str) -> Intent {
    let lower = text.to_lowercase();
    let rules = match persona {
        Persona::Widget => WIDGET_RULES,
        Persona::Full => FULL_RULES,
    };
    rules
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Unknown)
}

/// Produce the assistant's reply
///
/// `stats` is `None` when the caller has no live session; ROI then falls back
/// to the default figure and waste questions get the all-clear answer.
pub fn reply(persona: Persona, text: &str, stats: Option<&FinanceStats>) -> String {
    let intent = classify(persona, text);
    match persona {
        Persona::Widget => widget_reply(intent, stats),
        Persona::Full => full_reply(intent, stats),
    }
}

fn roi_of(stats: Option<&FinanceStats>) -> i64 {
    stats.map(|s| s.roi_percent).unwrap_or(DEFAULT_ROI)
}

fn widget_reply(intent: Intent, stats: Option<&FinanceStats>) -> String {
    match intent {
        Intent::Roi => format!(
            "Current ROI: {}% with steady upward trend.",
            roi_of(stats)
        ),
        Intent::Waste => match stats.and_then(|s| s.waste_alerts.first().map(|a| (s, a))) {
            Some((s, top)) => format!(
                "I detect {} waste signals. Top: {}.",
                s.waste_alerts.len(),
                top.message
            ),
            None => "No major overspending detected. Keep monitoring cloud and licenses."
                .to_string(),
        },
        Intent::Growth => "Consider activating License Optimizer and targeting upsells for Microsoft 365. Expected ROI +12%.".to_string(),
        _ => "Try: 'Show my ROI trend', 'Detect overspending', or 'Suggest growth action'."
            .to_string(),
    }
}

fn full_reply(intent: Intent, stats: Option<&FinanceStats>) -> String {
    match intent {
        Intent::Roi => format!(
            "📊 **ROI Analysis**: Your current ROI is {}% with a steady upward trend. This indicates healthy business growth. Keep monitoring your expenses and revenue streams to maintain this momentum.",
            roi_of(stats)
        ),
        Intent::Waste => {
            let alerts = stats.map(|s| s.waste_alerts.as_slice()).unwrap_or(&[]);
            if alerts.is_empty() {
                return "✅ **Cost Analysis**: No major overspending detected. However, I recommend regularly auditing your cloud usage and license subscriptions to prevent future issues.".to_string();
            }
            let listed = alerts
                .iter()
                .take(MAX_LISTED_WASTE_ALERTS)
                .map(|a| format!("• {}", a.message))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "⚠️ **Cost Optimization**: I detected {} areas for improvement:\n\n{}\n\nConsider automating your cloud infrastructure and consolidating your software licenses.",
                alerts.len(),
                listed
            )
        }
        Intent::Growth => "🚀 **Growth Recommendations**:\n\n1. **License Optimizer**: Consolidate and optimize your Microsoft 365 licenses - potential savings of 15-20%\n2. **Cloud Efficiency**: Implement auto-scaling to reduce idle compute costs\n3. **Upsell Strategy**: Target clients with complementary services - expected ROI +12%\n4. **Process Automation**: Automate routine tasks to improve operational efficiency".to_string(),
        Intent::Performance => "📈 **Performance Review**:\n\n• Revenue Growth: +18% YoY\n• Operational Efficiency: 92%\n• Client Satisfaction: 4.8/5.0\n• Cost-to-Revenue Ratio: 0.35 (excellent)\n\nYour business is performing well. Focus on scaling without sacrificing quality.".to_string(),
        Intent::Clients => "👥 **Client Management**: You currently have 12 active clients with a 95% retention rate. Revenue per client has increased by 22% this quarter. Consider implementing automated onboarding to improve efficiency.".to_string(),
        Intent::Agents => "🤖 **Agent Marketplace**: We have several AI agents available to automate your workflow:\n\n• License Optimizer - Save on software costs\n• Cloud Auditor - Monitor cloud usage in real-time\n• Revenue Forecaster - Predict quarterly revenue\n• Client Retention Specialist - Reduce churn\n\nActivate agents from your dashboard for immediate benefits!".to_string(),
        Intent::Forecast => "🔮 **Revenue Forecast**: Based on current trends, your projected Q4 revenue is $485K (+12% from Q3). Growth is accelerating, and profitability margins are improving. Maintain your current trajectory.".to_string(),
        Intent::Unknown => "I'm here to help! Ask me about: ROI trends, cost optimization, growth strategies, performance metrics, client management, or available AI agents. What would you like to know?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Severity, WasteAlert};

    fn stats_with(roi: i64, waste: usize) -> FinanceStats {
        FinanceStats {
            roi_percent: roi,
            profitability_series: vec![],
            waste_alerts: (0..waste)
                .map(|i| WasteAlert {
                    id: format!("w{}", i),
                    message: format!("Signal {}", i),
                    severity: Severity::High,
                })
                .collect(),
        }
    }

    #[test]
    fn test_first_matching_keyword_wins() {
        // Mentions both ROI and waste; ROI has priority
        assert_eq!(
            classify(Persona::Full, "Is waste hurting my ROI?"),
            Intent::Roi
        );
        assert_eq!(
            classify(Persona::Full, "Suggest a client strategy"),
            Intent::Growth
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(classify(Persona::Widget, "SHOW MY ROI"), Intent::Roi);
        assert_eq!(classify(Persona::Full, "Detect OVERSPENDING"), Intent::Waste);
    }

    #[test]
    fn test_widget_knows_fewer_topics() {
        assert_eq!(classify(Persona::Widget, "Analyze my costs"), Intent::Unknown);
        assert_eq!(classify(Persona::Full, "Analyze my costs"), Intent::Waste);
        assert_eq!(classify(Persona::Widget, "forecast please"), Intent::Unknown);
        assert_eq!(classify(Persona::Full, "forecast please"), Intent::Forecast);
    }

    #[test]
    fn test_roi_reply_interpolates_stats() {
        let stats = stats_with(87, 0);
        assert_eq!(
            reply(Persona::Widget, "roi?", Some(&stats)),
            "Current ROI: 87% with steady upward trend."
        );
        assert_eq!(
            reply(Persona::Widget, "roi?", None),
            "Current ROI: 42% with steady upward trend."
        );
    }

    #[test]
    fn test_widget_waste_reply() {
        let stats = stats_with(10, 2);
        assert_eq!(
            reply(Persona::Widget, "any waste?", Some(&stats)),
            "I detect 2 waste signals. Top: Signal 0."
        );
        assert!(reply(Persona::Widget, "any waste?", None).starts_with("No major overspending"));
    }

    #[test]
    fn test_full_waste_reply_lists_at_most_three() {
        let stats = stats_with(10, 5);
        let text = reply(Persona::Full, "where is the waste", Some(&stats));
        assert!(text.contains("I detected 5 areas"));
        assert!(text.contains("• Signal 2"));
        assert!(!text.contains("• Signal 3"));
    }

    #[test]
    fn test_fallback_reply() {
        assert!(reply(Persona::Full, "hello there", None).starts_with("I'm here to help!"));
        assert!(reply(Persona::Widget, "hello there", None).starts_with("Try:"));
    }

    #[test]
    fn test_quick_prompts_all_match_a_topic() {
        for prompt in QUICK_PROMPTS {
            assert_ne!(classify(Persona::Full, prompt), Intent::Unknown, "{}", prompt);
        }
    }

    #[test]
    fn test_parse_persona() {
        assert_eq!("Widget".parse::<Persona>().unwrap(), Persona::Widget);
        assert_eq!("full".parse::<Persona>().unwrap(), Persona::Full);
        assert!("robot".parse::<Persona>().is_err());
    }
}
