use actix_web::{HttpResponse, web};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};
use serde_json::json;

use super::response::Envelope;
use super::validate_doc_id;
use crate::error::ApiError;
use crate::model::employee::{CreateEmployee, Employee, UpdateEmployee};

const NOT_FOUND: &str = "Employee not found";

fn employees(db: &Database) -> Collection<Employee> {
    db.collection("employees")
}

async fn find_by_team(db: &Database, team: &str) -> Result<Vec<Employee>, ApiError> {
    employees(db)
        .find(doc! { "team": team })
        .sort(doc! { "name": 1 })
        .await
        .map_err(|e| ApiError::db("Error fetching employees by team", e))?
        .try_collect()
        .await
        .map_err(|e| ApiError::db("Error fetching employees by team", e))
}

/// List employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, sorted by name", body = Object, example = json!({
            "success": true, "count": 0, "data": []
        }))
    ),
    tag = "Employee"
)]
pub async fn list_employees(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let all: Vec<Employee> = employees(&db)
        .find(doc! {})
        .sort(doc! { "name": 1 })
        .await
        .map_err(|e| ApiError::db("Error fetching employees", e))?
        .try_collect()
        .await
        .map_err(|e| ApiError::db("Error fetching employees", e))?;

    Ok(HttpResponse::Ok().json(Envelope::list(all)))
}

/// Get employee by id
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "success": false, "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = validate_doc_id(&path, NOT_FOUND)?;
    let employee = employees(&db)
        .find_one(doc! { "_id": id })
        .await
        .map_err(|e| ApiError::db("Error fetching employee", e))?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    Ok(HttpResponse::Ok().json(Envelope::data(employee)))
}

/// Create employee
///
/// Synthesizes a default performance block when the payload has none.
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation error", body = Object, example = json!({
            "success": false, "message": "Validation error", "errors": ["email is required"]
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    db: web::Data<Database>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(ApiError::Validation)?;

    let employee = payload.into_employee(Utc::now(), &mut rand::thread_rng());
    employees(&db)
        .insert_one(&employee)
        .await
        .map_err(|e| ApiError::db("Error creating employee", e))?;

    Ok(HttpResponse::Created().json(Envelope::message("Employee created successfully", employee)))
}

/// Update employee
///
/// Partial merge: only the supplied fields overwrite, then the merged
/// document is re-validated before the replace.
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    db: web::Data<Database>,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let id = validate_doc_id(&path, NOT_FOUND)?;
    let mut employee = employees(&db)
        .find_one(doc! { "_id": id })
        .await
        .map_err(|e| ApiError::db("Error updating employee", e))?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;

    payload.into_inner().apply(&mut employee);
    employee.validate().map_err(ApiError::Validation)?;

    employees(&db)
        .replace_one(doc! { "_id": id }, &employee)
        .await
        .map_err(|e| ApiError::db("Error updating employee", e))?;

    Ok(HttpResponse::Ok().json(Envelope::message("Employee updated successfully", employee)))
}

/// Delete employee
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted", body = Object, example = json!({
            "success": true, "message": "Employee deleted successfully", "data": {}
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = validate_doc_id(&path, NOT_FOUND)?;
    let result = employees(&db)
        .delete_one(doc! { "_id": id })
        .await
        .map_err(|e| ApiError::db("Error deleting employee", e))?;

    if result.deleted_count == 0 {
        return Err(ApiError::NotFound(NOT_FOUND));
    }

    Ok(HttpResponse::Ok().json(Envelope::message("Employee deleted successfully", json!({}))))
}

/// List employees by team id
#[utoipa::path(
    get,
    path = "/api/employees/team/{team_id}",
    params(("team_id", Path, description = "Value of the employee `team` field")),
    responses(
        (status = 200, description = "Employees on the team, sorted by name", body = Object)
    ),
    tag = "Employee"
)]
pub async fn employees_by_team(
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let matches = find_by_team(&db, &path).await?;
    Ok(HttpResponse::Ok().json(Envelope::list(matches)))
}

/// List employees by team name
///
/// Same filter as the team-id route; both match the free-text `team`
/// field by string equality. Kept as a separate entry point for the
/// historical call site.
#[utoipa::path(
    get,
    path = "/api/employees/team/name/{team_name}",
    params(("team_name", Path, description = "Value of the employee `team` field")),
    responses(
        (status = 200, description = "Employees on the team, sorted by name", body = Object)
    ),
    tag = "Employee"
)]
pub async fn employees_by_team_name(
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let matches = find_by_team(&db, &path).await?;
    Ok(HttpResponse::Ok().json(Envelope::list(matches)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web::Data};
    use mongodb::{Client, Database};

    use crate::routes;

    // The driver connects lazily, so routes that fail before their first
    // store operation are testable without a running mongod.
    async fn test_db() -> Database {
        Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap()
            .database("teamsdb_test")
    }

    #[actix_web::test]
    async fn create_with_missing_fields_returns_field_errors() {
        let app = test::init_service(
            App::new().app_data(Data::new(test_db().await)).configure(routes::configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(serde_json::json!({ "name": "Jane" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Validation error");
        let errors = body["errors"].as_array().unwrap();
        assert!(errors.contains(&serde_json::json!("email is required")));
        assert!(errors.contains(&serde_json::json!("yearsExperience is required")));
    }

    #[actix_web::test]
    async fn malformed_id_is_not_found() {
        let app = test::init_service(
            App::new().app_data(Data::new(test_db().await)).configure(routes::configure),
        )
        .await;
        for req in [
            test::TestRequest::get().uri("/api/employees/nope").to_request(),
            test::TestRequest::delete().uri("/api/employees/nope").to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "Employee not found");
        }
    }

    #[actix_web::test]
    async fn malformed_body_is_shaped_into_the_envelope() {
        let app = test::init_service(
            App::new().app_data(Data::new(test_db().await)).configure(routes::configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/employees")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["errors"].as_array().is_some());
    }
}
