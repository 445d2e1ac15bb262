use crate::model::employee::{
    CreateEmployee, Employee, EmployeePerformance, MonthlyScore, NamedValue, UpdateEmployee,
};
use crate::model::team::{
    CreateTeam, PerformancePoint, Team, TeamStatus, UpdateTeam, UpdateTeamPerformance,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Teams API",
        version = "1.0.0",
        description = r#"
## Team & Employee Management API

REST backend over two MongoDB collections.

### Key Features
- **Employee Management**
  - CRUD plus team-scoped lookups; default performance data is synthesized on create
- **Team Management**
  - CRUD plus a dedicated monthly performance upsert with a 6-month retention window

### Response Format
Every endpoint wraps its payload in `{success, count?, message?, data?}`;
validation failures return `{success: false, message, errors}`.

---
Built with **Rust**, **Actix Web**, **MongoDB**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::employees_by_team,
        crate::api::employee::employees_by_team_name,

        crate::api::team::list_teams,
        crate::api::team::get_team,
        crate::api::team::create_team,
        crate::api::team::update_team,
        crate::api::team::update_team_performance,
        crate::api::team::delete_team,
    ),
    components(
        schemas(
            Employee,
            EmployeePerformance,
            NamedValue,
            MonthlyScore,
            CreateEmployee,
            UpdateEmployee,
            Team,
            TeamStatus,
            PerformancePoint,
            CreateTeam,
            UpdateTeam,
            UpdateTeamPerformance
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Team", description = "Team management APIs"),
    )
)]
pub struct ApiDoc;
