//! Agent actions
//!
//! Each agent is a canned automation. Running one may record a savings
//! adjustment (a negative ledger entry) and always raises an alert. There is
//! no idempotency guard: repeated runs keep compounding.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Licenses reclaimed per license-optimizer run
pub const LICENSES_REMOVED: i64 = 5;

/// Monthly cost of one reclaimed license
pub const LICENSE_UNIT_COST: i64 = 20;

/// Share of gross spend cut by the cloud spend guard
pub const CLOUD_REDUCTION_RATE: f64 = 0.08;

pub const LICENSE_CLEANUP_PROJECT: &str = "License Cleanup";
pub const CLOUD_REDUCTION_PROJECT: &str = "Cloud Spend Reduction";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentType {
    LicenseOptimizer,
    CloudSpendGuard,
    SalesPitchAssistant,
}

impl AgentType {
    pub const ALL: [AgentType; 3] = [
        Self::LicenseOptimizer,
        Self::CloudSpendGuard,
        Self::SalesPitchAssistant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LicenseOptimizer => "license-optimizer",
            Self::CloudSpendGuard => "cloud-spend-guard",
            Self::SalesPitchAssistant => "sales-pitch-assistant",
        }
    }

    /// Work out what this agent does given the current gross spend
    pub fn plan(&self, gross_spend: i64) -> AgentEffect {
        match self {
            Self::LicenseOptimizer => AgentEffect {
                adjustment: Some(LedgerAdjustment {
                    project: LICENSE_CLEANUP_PROJECT,
                    amount: -(LICENSES_REMOVED * LICENSE_UNIT_COST),
                }),
                message: format!("{} Unused Licenses Found and Removed", LICENSES_REMOVED),
                alert_title: "License Cleanup Completed",
            },
            Self::CloudSpendGuard => AgentEffect {
                adjustment: Some(LedgerAdjustment {
                    project: CLOUD_REDUCTION_PROJECT,
                    amount: -((gross_spend as f64 * CLOUD_REDUCTION_RATE).round() as i64),
                }),
                message: "Cloud Expenses Reduced by 8%".to_string(),
                alert_title: "Cloud Optimization Applied",
            },
            Self::SalesPitchAssistant => AgentEffect {
                adjustment: None,
                message: "3 New Upsell Opportunities Generated".to_string(),
                alert_title: "Upsell Opportunities Ready",
            },
        }
    }
}

impl std::fmt::Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|agent| agent.as_str() == s.trim())
            .ok_or_else(|| Error::UnknownAgent(s.to_string()))
    }
}

/// A savings entry an agent records in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerAdjustment {
    pub project: &'static str,
    /// Always zero or negative
    pub amount: i64,
}

/// Everything an agent run changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentEffect {
    pub adjustment: Option<LedgerAdjustment>,
    pub message: String,
    pub alert_title: &'static str,
}
