use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{month_label, previous_months};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NamedValue {
    #[schema(example = "Technical")]
    pub name: String,
    #[schema(example = 40.0)]
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlyScore {
    #[schema(example = "Mar")]
    pub month: String,
    #[schema(example = 85.0)]
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePerformance {
    #[serde(default)]
    pub skill_distribution: Vec<NamedValue>,
    #[serde(default)]
    pub monthly_performance: Vec<MonthlyScore>,
    #[serde(default)]
    pub project_completion: Vec<NamedValue>,
    #[serde(default)]
    pub code_quality: Vec<NamedValue>,
}

impl EmployeePerformance {
    /// Default performance block for employees created without one:
    /// five preceding months scored in [70,89], the current month pinned
    /// at 85, plus fixed-shape distribution breakdowns.
    pub fn default_for(today: NaiveDate, rng: &mut impl Rng) -> Self {
        let mut monthly: Vec<MonthlyScore> = previous_months(today, 5)
            .into_iter()
            .map(|month| MonthlyScore { month, score: rng.gen_range(70..90) as f64 })
            .collect();
        monthly.push(MonthlyScore { month: month_label(today), score: 85.0 });

        Self {
            skill_distribution: vec![
                NamedValue { name: "Technical".into(), value: 40.0 },
                NamedValue { name: "Soft Skills".into(), value: 30.0 },
                NamedValue { name: "Problem Solving".into(), value: 20.0 },
                NamedValue { name: "Leadership".into(), value: 10.0 },
            ],
            monthly_performance: monthly,
            project_completion: vec![
                NamedValue { name: "Completed".into(), value: 80.0 },
                NamedValue { name: "Pending".into(), value: 20.0 },
            ],
            code_quality: vec![
                NamedValue { name: "Clean Code".into(), value: 75.0 },
                NamedValue { name: "Needs Improvement".into(), value: 25.0 },
            ],
        }
    }
}

/// An employee document. `team` is free text, matched by string equality
/// in the team filter routes; it is not a foreign key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id")]
    #[schema(example = "665f1f77bcf86cd799439011")]
    pub id: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "Backend Engineer")]
    pub role: String,
    #[schema(example = "Core")]
    pub team: String,
    #[schema(example = 4.5)]
    pub years_experience: f64,
    #[schema(example = "john.doe@company.com")]
    pub email: String,
    #[schema(example = "+8801712345678")]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub costing: Vec<String>,
    #[serde(default)]
    pub available: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub performance: EmployeePerformance,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Required-field check on a full document, used after a partial
    /// update merge. Returns one message per violated field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        for (value, field) in [
            (&self.name, "name"),
            (&self.role, "role"),
            (&self.team, "team"),
            (&self.email, "email"),
            (&self.phone, "phone"),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("{field} is required"));
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    pub name: Option<String>,
    pub role: Option<String>,
    pub team: Option<String>,
    pub years_experience: Option<f64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub costing: Vec<String>,
    #[serde(default)]
    pub available: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub performance: Option<EmployeePerformance>,
}

impl CreateEmployee {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        for (value, field) in [
            (&self.name, "name"),
            (&self.role, "role"),
            (&self.team, "team"),
            (&self.email, "email"),
            (&self.phone, "phone"),
        ] {
            if value.as_deref().is_none_or(|s| s.trim().is_empty()) {
                errors.push(format!("{field} is required"));
            }
        }
        if self.years_experience.is_none() {
            errors.push("yearsExperience is required".into());
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Consume the validated payload into a document, synthesizing the
    /// performance block when the caller supplied none.
    pub fn into_employee(self, now: DateTime<Utc>, rng: &mut impl Rng) -> Employee {
        let performance = self
            .performance
            .unwrap_or_else(|| EmployeePerformance::default_for(now.date_naive(), rng));
        Employee {
            id: ObjectId::new().to_hex(),
            name: self.name.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            team: self.team.unwrap_or_default(),
            years_experience: self.years_experience.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            bio: self.bio,
            skills: self.skills,
            projects: self.projects,
            costing: self.costing,
            available: self.available,
            certifications: self.certifications,
            performance,
            created_at: now,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub role: Option<String>,
    pub team: Option<String>,
    pub years_experience: Option<f64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub projects: Option<Vec<String>>,
    pub costing: Option<Vec<String>>,
    pub available: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub performance: Option<EmployeePerformance>,
}

impl UpdateEmployee {
    /// Overwrite only the fields the caller supplied.
    pub fn apply(self, employee: &mut Employee) {
        if let Some(name) = self.name {
            employee.name = name;
        }
        if let Some(role) = self.role {
            employee.role = role;
        }
        if let Some(team) = self.team {
            employee.team = team;
        }
        if let Some(years) = self.years_experience {
            employee.years_experience = years;
        }
        if let Some(email) = self.email {
            employee.email = email;
        }
        if let Some(phone) = self.phone {
            employee.phone = phone;
        }
        if let Some(bio) = self.bio {
            employee.bio = Some(bio);
        }
        if let Some(skills) = self.skills {
            employee.skills = skills;
        }
        if let Some(projects) = self.projects {
            employee.projects = projects;
        }
        if let Some(costing) = self.costing {
            employee.costing = costing;
        }
        if let Some(available) = self.available {
            employee.available = available;
        }
        if let Some(certifications) = self.certifications {
            employee.certifications = certifications;
        }
        if let Some(performance) = self.performance {
            employee.performance = performance;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn full_payload() -> CreateEmployee {
        serde_json::from_value(serde_json::json!({
            "name": "John Doe",
            "role": "Backend Engineer",
            "team": "Core",
            "yearsExperience": 4.5,
            "email": "john.doe@company.com",
            "phone": "+8801712345678"
        }))
        .unwrap()
    }

    #[test]
    fn default_performance_has_six_months_ending_now() {
        let mut rng = StdRng::seed_from_u64(7);
        let perf = EmployeePerformance::default_for(today(), &mut rng);

        assert_eq!(perf.monthly_performance.len(), 6);
        let labels: Vec<&str> =
            perf.monthly_performance.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);

        let last = perf.monthly_performance.last().unwrap();
        assert_eq!(last.score, 85.0);
        for point in &perf.monthly_performance[..5] {
            assert!((70.0..=89.0).contains(&point.score), "score {}", point.score);
        }
    }

    #[test]
    fn default_performance_has_fixed_breakdowns() {
        let mut rng = StdRng::seed_from_u64(1);
        let perf = EmployeePerformance::default_for(today(), &mut rng);

        assert_eq!(perf.skill_distribution.len(), 4);
        assert_eq!(perf.skill_distribution[0].name, "Technical");
        assert_eq!(perf.project_completion.len(), 2);
        assert_eq!(perf.code_quality.len(), 2);
    }

    #[test]
    fn default_performance_is_deterministic_under_a_seed() {
        let a = EmployeePerformance::default_for(today(), &mut StdRng::seed_from_u64(42));
        let b = EmployeePerformance::default_for(today(), &mut StdRng::seed_from_u64(42));
        let scores = |p: &EmployeePerformance| {
            p.monthly_performance.iter().map(|m| m.score).collect::<Vec<_>>()
        };
        assert_eq!(scores(&a), scores(&b));
    }

    #[test]
    fn create_validation_lists_each_missing_field() {
        let payload: CreateEmployee = serde_json::from_value(serde_json::json!({
            "name": "Jane",
            "role": "QA",
            "team": "Core",
            "yearsExperience": 2,
            "phone": "123"
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        assert_eq!(errors, vec!["email is required"]);

        let empty: CreateEmployee = serde_json::from_value(serde_json::json!({})).unwrap();
        let errors = empty.validate().unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(errors.contains(&"yearsExperience is required".to_string()));
    }

    #[test]
    fn into_employee_keeps_supplied_performance() {
        let mut payload = full_payload();
        payload.performance = Some(EmployeePerformance {
            skill_distribution: vec![],
            monthly_performance: vec![MonthlyScore { month: "Jun".into(), score: 99.0 }],
            project_completion: vec![],
            code_quality: vec![],
        });
        let employee = payload.into_employee(Utc::now(), &mut StdRng::seed_from_u64(0));
        assert_eq!(employee.performance.monthly_performance.len(), 1);
        assert_eq!(employee.performance.monthly_performance[0].score, 99.0);
    }

    #[test]
    fn into_employee_generates_a_hex_object_id() {
        let employee = full_payload().into_employee(Utc::now(), &mut StdRng::seed_from_u64(0));
        assert!(ObjectId::parse_str(&employee.id).is_ok());
    }

    #[test]
    fn wire_format_is_camel_case_with_underscore_id() {
        let employee = full_payload().into_employee(Utc::now(), &mut StdRng::seed_from_u64(3));
        let json = serde_json::to_value(&employee).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("yearsExperience").is_some());
        assert!(json.get("createdAt").is_some());
        // optional bio is omitted, not null
        assert!(json.get("bio").is_none());
    }

    #[test]
    fn partial_update_only_touches_supplied_fields() {
        let mut employee =
            full_payload().into_employee(Utc::now(), &mut StdRng::seed_from_u64(5));
        let update: UpdateEmployee = serde_json::from_value(serde_json::json!({
            "role": "Staff Engineer",
            "skills": ["rust"]
        }))
        .unwrap();
        update.apply(&mut employee);

        assert_eq!(employee.role, "Staff Engineer");
        assert_eq!(employee.skills, vec!["rust"]);
        assert_eq!(employee.name, "John Doe");
        assert_eq!(employee.email, "john.doe@company.com");
        assert!(employee.validate().is_ok());
    }

    #[test]
    fn merged_document_with_blanked_field_fails_validation() {
        let mut employee =
            full_payload().into_employee(Utc::now(), &mut StdRng::seed_from_u64(5));
        let update: UpdateEmployee =
            serde_json::from_value(serde_json::json!({ "email": " " })).unwrap();
        update.apply(&mut employee);
        assert_eq!(employee.validate().unwrap_err(), vec!["email is required"]);
    }
}
