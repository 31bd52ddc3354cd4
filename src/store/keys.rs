use chrono::NaiveDate;
use uuid::Uuid;

pub const STATS: &str = "early-bird-stats";
pub const SYSTEM_STATUS: &str = "system-status";
pub const TOOLS_STATUS: &str = "tools-status";
pub const WORKFLOW_PROGRESS: &str = "workflow-progress";
pub const ECOSYSTEM_NODES: &str = "ecosystem-nodes";

pub fn user_by_email(email: &str) -> String {
    format!("early-bird-user:{}", email)
}

pub fn user_by_id(id: &Uuid) -> String {
    format!("early-bird-id:{}", id)
}

pub fn daily_signups(day: NaiveDate) -> String {
    format!("daily-signups:{}", day.format("%Y-%m-%d"))
}
