//! Dashboard overview, campaign, community and analytics pages
//!
//! View models for the peripheral dashboard pages. They share nothing with
//! the content flow and never touch the content store.

mod data;

use serde::Serialize;

pub use data::{analytics, campaigns, community, overview};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Scheduled,
    Planning,
}

impl CampaignStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "Active",
            CampaignStatus::Scheduled => "Scheduled",
            CampaignStatus::Planning => "Planning",
        }
    }
}

/// Headline figure with its change note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
    pub change: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentCampaign {
    pub name: String,
    pub status: CampaignStatus,
    pub reach: String,
    pub engagement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewPage {
    pub stats: Vec<SummaryCard>,
    pub recent_campaigns: Vec<RecentCampaign>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Campaign {
    pub id: u32,
    pub name: String,
    pub theme: String,
    pub status: CampaignStatus,
    pub start_date: String,
    /// "-" until the campaign has run
    pub reach: String,
    pub engagement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignsPage {
    pub campaigns: Vec<Campaign>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    pub initials: String,
    pub email: String,
    pub role: String,
    pub join_date: String,
    pub contributions: u32,
}

impl Member {
    pub fn new(name: &str, email: &str, role: &str, join_date: &str, contributions: u32) -> Self {
        Self {
            name: name.to_string(),
            initials: initials(name),
            email: email.to_string(),
            role: role.to_string(),
            join_date: join_date.to_string(),
            contributions,
        }
    }
}

/// First letter of every word in `name`
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunityPage {
    pub summary: Vec<SummaryCard>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsPage {
    pub summary: Vec<SummaryCard>,
    /// Monthly engagement
    pub engagement: Vec<SeriesPoint>,
    /// Weekly reach
    pub reach: Vec<SeriesPoint>,
    /// Conversation volume per focus area
    pub themes: Vec<SeriesPoint>,
}
