//! Fixed dashboard figures
//!
//! These pages are not backed by the content store; the figures are the
//! ones shown while analytics ingestion is not wired up.

use super::{
    AnalyticsPage, Campaign, CampaignStatus, CampaignsPage, CommunityPage, Member, OverviewPage,
    RecentCampaign, SeriesPoint, SummaryCard,
};

fn card(title: &str, value: &str, change: &str) -> SummaryCard {
    SummaryCard {
        title: title.to_string(),
        value: value.to_string(),
        change: change.to_string(),
    }
}

fn point(name: &str, value: u32) -> SeriesPoint {
    SeriesPoint {
        name: name.to_string(),
        value,
    }
}

pub fn overview() -> OverviewPage {
    OverviewPage {
        stats: vec![
            card("Active Campaigns", "24", "+3 this month"),
            card("Community Members", "15.2k", "+18% this year"),
            card("Tweets Analyzed", "450k", "+12k this week"),
            card("Engagement Rate", "89%", "+5% this year"),
        ],
        recent_campaigns: vec![
            RecentCampaign {
                name: "Mental Health Awareness Week".into(),
                status: CampaignStatus::Active,
                reach: "45.2k".into(),
                engagement: "92%".into(),
            },
            RecentCampaign {
                name: "Disability Rights Forum".into(),
                status: CampaignStatus::Active,
                reach: "38.1k".into(),
                engagement: "87%".into(),
            },
            RecentCampaign {
                name: "End VAW Campaign".into(),
                status: CampaignStatus::Scheduled,
                reach: "-".into(),
                engagement: "-".into(),
            },
        ],
    }
}

pub fn campaigns() -> CampaignsPage {
    let campaign = |id: u32, name: &str, theme: &str, status, start: &str, reach: &str, eng: &str| {
        Campaign {
            id,
            name: name.to_string(),
            theme: theme.to_string(),
            status,
            start_date: start.to_string(),
            reach: reach.to_string(),
            engagement: eng.to_string(),
        }
    };

    CampaignsPage {
        campaigns: vec![
            campaign(
                1,
                "Mental Health Awareness Week",
                "Mental Health & Wellness",
                CampaignStatus::Active,
                "2025-01-15",
                "45.2k",
                "92%",
            ),
            campaign(
                2,
                "Disability Rights Forum",
                "Persons with Disabilities",
                CampaignStatus::Active,
                "2025-01-10",
                "38.1k",
                "87%",
            ),
            campaign(
                3,
                "End VAW Campaign",
                "Violence Against Women",
                CampaignStatus::Scheduled,
                "2025-02-01",
                "-",
                "-",
            ),
            campaign(
                4,
                "LGBTQ+ Rights Initiative",
                "LGBTQ+ Rights",
                CampaignStatus::Planning,
                "2025-02-15",
                "-",
                "-",
            ),
        ],
    }
}

pub fn community() -> CommunityPage {
    let member = |name: &str, email: &str, role: &str, joined: &str, contributions: u32| {
        Member::new(name, email, role, joined, contributions)
    };

    CommunityPage {
        summary: vec![
            card("Total Members", "15,247", "+342 this month"),
            card("Active Contributors", "1,284", "+89 this month"),
            card("New This Week", "87", "+12 from last week"),
        ],
        members: vec![
            member("Sarah Johnson", "sarah.j@example.com", "Admin", "2024-01-15", 142),
            member("Michael Asante", "m.asante@example.com", "Moderator", "2024-02-20", 98),
            member("Ama Mensah", "ama.m@example.com", "Contributor", "2024-03-10", 67),
            member("Kwame Osei", "kwame.o@example.com", "Contributor", "2024-03-15", 54),
            member("Abena Gyasi", "abena.g@example.com", "Contributor", "2024-04-01", 43),
        ],
    }
}

pub fn analytics() -> AnalyticsPage {
    AnalyticsPage {
        summary: vec![
            card("Total Impressions", "2.3M", "+23% from last month"),
            card("Click-through Rate", "3.8%", "+0.5% from last month"),
            card("Share Rate", "12.4%", "+2.1% from last month"),
        ],
        engagement: vec![
            point("Jan", 4000),
            point("Feb", 3000),
            point("Mar", 5000),
            point("Apr", 4500),
            point("May", 6000),
            point("Jun", 5500),
        ],
        reach: vec![
            point("Week 1", 12000),
            point("Week 2", 15000),
            point("Week 3", 18000),
            point("Week 4", 22000),
        ],
        themes: vec![
            point("Disabilities", 125),
            point("VAW", 98),
            point("Mental Health", 142),
            point("LGBTQ+", 87),
        ],
    }
}
