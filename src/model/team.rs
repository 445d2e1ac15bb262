use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use super::{month_label, previous_months};

/// Months of performance history a team retains.
pub const MAX_HISTORY: usize = 6;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
    ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TeamStatus {
    #[default]
    Active,
    Inactive,
    OnHold,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PerformancePoint {
    #[schema(example = "Mar")]
    pub month: String,
    #[schema(example = 88.0)]
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(rename = "_id")]
    #[schema(example = "665f1f77bcf86cd799439012")]
    pub id: String,
    #[schema(example = "Core")]
    pub name: String,
    #[schema(example = "Platform and infrastructure")]
    pub description: String,
    #[schema(example = "Alice")]
    pub lead: String,
    #[schema(example = 5)]
    pub members: i32,
    #[serde(default)]
    pub status: TeamStatus,
    #[serde(default)]
    pub completed_projects: i32,
    #[serde(default)]
    pub ongoing_projects: i32,
    #[schema(example = 90.0)]
    pub performance: f64,
    #[serde(default)]
    pub team_performance: Vec<PerformancePoint>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Range and required-field checks on a full document, used after a
    /// partial update merge.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("Team name is required".into());
        }
        if self.description.trim().is_empty() {
            errors.push("Team description is required".into());
        }
        if self.lead.trim().is_empty() {
            errors.push("Team lead name is required".into());
        }
        if self.members < 1 {
            errors.push("members must be at least 1".into());
        }
        if self.completed_projects < 0 {
            errors.push("completedProjects must be at least 0".into());
        }
        if self.ongoing_projects < 0 {
            errors.push("ongoingProjects must be at least 0".into());
        }
        if !(0.0..=100.0).contains(&self.performance) {
            errors.push("performance must be between 0 and 100".into());
        }
        for point in &self.team_performance {
            if !(0.0..=100.0).contains(&point.score) {
                errors.push(format!("teamPerformance score for {} must be between 0 and 100", point.month));
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Record a performance score for the current month: overwrite the
    /// current month's history entry in place if one exists, append
    /// otherwise, then drop the oldest entries beyond the retention window.
    pub fn record_performance(&mut self, score: f64, today: NaiveDate) {
        self.performance = score;
        let month = month_label(today);
        match self.team_performance.iter_mut().find(|p| p.month == month) {
            Some(point) => point.score = score,
            None => self.team_performance.push(PerformancePoint { month, score }),
        }
        let len = self.team_performance.len();
        if len > MAX_HISTORY {
            self.team_performance.drain(..len - MAX_HISTORY);
        }
    }

    /// Synthesized history for teams created without one: five preceding
    /// months scored in [80,89], the current month at the team's own
    /// performance score (75 when that is absent too).
    pub fn default_history(
        today: NaiveDate,
        performance: Option<f64>,
        rng: &mut impl Rng,
    ) -> Vec<PerformancePoint> {
        let mut points: Vec<PerformancePoint> = previous_months(today, 5)
            .into_iter()
            .map(|month| PerformancePoint { month, score: rng.gen_range(80..90) as f64 })
            .collect();
        points.push(PerformancePoint {
            month: month_label(today),
            score: performance.unwrap_or(75.0),
        });
        points
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeam {
    pub name: Option<String>,
    pub description: Option<String>,
    pub lead: Option<String>,
    pub members: Option<i32>,
    #[schema(example = "active")]
    pub status: Option<String>,
    pub completed_projects: Option<i32>,
    pub ongoing_projects: Option<i32>,
    pub performance: Option<f64>,
    pub team_performance: Option<Vec<PerformancePoint>>,
}

impl CreateTeam {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.name.as_deref().is_none_or(|s| s.trim().is_empty()) {
            errors.push("Team name is required".into());
        }
        if self.description.as_deref().is_none_or(|s| s.trim().is_empty()) {
            errors.push("Team description is required".into());
        }
        if self.lead.as_deref().is_none_or(|s| s.trim().is_empty()) {
            errors.push("Team lead name is required".into());
        }
        match self.members {
            None => errors.push("Number of team members is required".into()),
            Some(m) if m < 1 => errors.push("members must be at least 1".into()),
            _ => {}
        }
        if let Some(status) = &self.status {
            if status.parse::<TeamStatus>().is_err() {
                errors.push(format!("`{status}` is not a valid status"));
            }
        }
        if self.completed_projects.is_some_and(|n| n < 0) {
            errors.push("completedProjects must be at least 0".into());
        }
        if self.ongoing_projects.is_some_and(|n| n < 0) {
            errors.push("ongoingProjects must be at least 0".into());
        }
        match self.performance {
            None => errors.push("Performance score is required".into()),
            Some(p) if !(0.0..=100.0).contains(&p) => {
                errors.push("performance must be between 0 and 100".into());
            }
            _ => {}
        }
        if let Some(points) = &self.team_performance {
            for point in points {
                if !(0.0..=100.0).contains(&point.score) {
                    errors.push(format!(
                        "teamPerformance score for {} must be between 0 and 100",
                        point.month
                    ));
                }
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Consume the validated payload into a document, synthesizing the
    /// history when the caller supplied none (or an empty list).
    pub fn into_team(self, now: DateTime<Utc>, rng: &mut impl Rng) -> Team {
        let team_performance = match self.team_performance {
            Some(points) if !points.is_empty() => points,
            _ => Team::default_history(now.date_naive(), self.performance, rng),
        };
        Team {
            id: ObjectId::new().to_hex(),
            name: self.name.unwrap_or_default().trim().to_string(),
            description: self.description.unwrap_or_default().trim().to_string(),
            lead: self.lead.unwrap_or_default().trim().to_string(),
            members: self.members.unwrap_or_default(),
            status: self.status.and_then(|s| s.parse().ok()).unwrap_or_default(),
            completed_projects: self.completed_projects.unwrap_or(0),
            ongoing_projects: self.ongoing_projects.unwrap_or(0),
            performance: self.performance.unwrap_or_default(),
            team_performance,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeam {
    pub name: Option<String>,
    pub description: Option<String>,
    pub lead: Option<String>,
    pub members: Option<i32>,
    #[schema(example = "on-hold")]
    pub status: Option<String>,
    pub completed_projects: Option<i32>,
    pub ongoing_projects: Option<i32>,
    pub performance: Option<f64>,
    pub team_performance: Option<Vec<PerformancePoint>>,
}

impl UpdateTeam {
    /// Overwrite only the fields the caller supplied. An unknown status
    /// label is a validation failure.
    pub fn apply(self, team: &mut Team) -> Result<(), Vec<String>> {
        if let Some(name) = self.name {
            team.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            team.description = description.trim().to_string();
        }
        if let Some(lead) = self.lead {
            team.lead = lead.trim().to_string();
        }
        if let Some(members) = self.members {
            team.members = members;
        }
        if let Some(status) = self.status {
            team.status = status
                .parse()
                .map_err(|_| vec![format!("`{status}` is not a valid status")])?;
        }
        if let Some(completed) = self.completed_projects {
            team.completed_projects = completed;
        }
        if let Some(ongoing) = self.ongoing_projects {
            team.ongoing_projects = ongoing;
        }
        if let Some(performance) = self.performance {
            team.performance = performance;
        }
        if let Some(points) = self.team_performance {
            team.team_performance = points;
        }
        Ok(())
    }
}

/// Body of `PUT /api/teams/{id}/performance`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTeamPerformance {
    #[schema(example = 92.0)]
    pub performance: Option<f64>,
}
