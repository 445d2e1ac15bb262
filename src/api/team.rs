use actix_web::{HttpResponse, web};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};
use serde_json::json;

use super::response::Envelope;
use super::validate_doc_id;
use crate::error::ApiError;
use crate::model::team::{CreateTeam, Team, UpdateTeam, UpdateTeamPerformance};

const NOT_FOUND: &str = "Team not found";

fn teams(db: &Database) -> Collection<Team> {
    db.collection("teams")
}

async fn find_team(db: &Database, id: &str, context: &'static str) -> Result<Team, ApiError> {
    teams(db)
        .find_one(doc! { "_id": id })
        .await
        .map_err(|e| ApiError::db(context, e))?
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

/// List teams
#[utoipa::path(
    get,
    path = "/api/teams",
    responses(
        (status = 200, description = "All teams, newest first", body = Object, example = json!({
            "success": true, "count": 0, "data": []
        }))
    ),
    tag = "Team"
)]
pub async fn list_teams(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let all: Vec<Team> = teams(&db)
        .find(doc! {})
        .sort(doc! { "createdAt": -1 })
        .await
        .map_err(|e| ApiError::db("Error fetching teams", e))?
        .try_collect()
        .await
        .map_err(|e| ApiError::db("Error fetching teams", e))?;

    Ok(HttpResponse::Ok().json(Envelope::list(all)))
}

/// Get team by id
#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    params(("id", Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team found", body = Team),
        (status = 404, description = "Team not found", body = Object, example = json!({
            "success": false, "message": "Team not found"
        }))
    ),
    tag = "Team"
)]
pub async fn get_team(
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = validate_doc_id(&path, NOT_FOUND)?;
    let team = find_team(&db, id, "Error fetching team").await?;
    Ok(HttpResponse::Ok().json(Envelope::data(team)))
}

/// Create team
///
/// Synthesizes the six-month performance history when the payload has
/// none; the current month takes the supplied performance score.
#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeam,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Validation error", body = Object, example = json!({
            "success": false, "message": "Validation error", "errors": ["Team name is required"]
        }))
    ),
    tag = "Team"
)]
pub async fn create_team(
    db: web::Data<Database>,
    payload: web::Json<CreateTeam>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(ApiError::Validation)?;

    let team = payload.into_team(Utc::now(), &mut rand::thread_rng());
    teams(&db)
        .insert_one(&team)
        .await
        .map_err(|e| ApiError::db("Error creating team", e))?;

    Ok(HttpResponse::Created().json(Envelope::message("Team created successfully", team)))
}

/// Update team
#[utoipa::path(
    put,
    path = "/api/teams/{id}",
    params(("id", Path, description = "Team ID")),
    request_body = UpdateTeam,
    responses(
        (status = 200, description = "Team updated", body = Team),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Team not found")
    ),
    tag = "Team"
)]
pub async fn update_team(
    db: web::Data<Database>,
    path: web::Path<String>,
    payload: web::Json<UpdateTeam>,
) -> Result<HttpResponse, ApiError> {
    let id = validate_doc_id(&path, NOT_FOUND)?;
    let mut team = find_team(&db, id, "Error updating team").await?;

    payload.into_inner().apply(&mut team).map_err(ApiError::Validation)?;
    team.validate().map_err(ApiError::Validation)?;
    team.updated_at = Utc::now();

    teams(&db)
        .replace_one(doc! { "_id": id }, &team)
        .await
        .map_err(|e| ApiError::db("Error updating team", e))?;

    Ok(HttpResponse::Ok().json(Envelope::message("Team updated successfully", team)))
}

/// Update team performance
///
/// Sets the scalar performance score and upserts the current month's
/// history entry; the history keeps at most the six most recent months.
/// Read-modify-write: concurrent updates to the same team may race.
#[utoipa::path(
    put,
    path = "/api/teams/{id}/performance",
    params(("id", Path, description = "Team ID")),
    request_body = UpdateTeamPerformance,
    responses(
        (status = 200, description = "Performance recorded", body = Team),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Team not found")
    ),
    tag = "Team"
)]
pub async fn update_team_performance(
    db: web::Data<Database>,
    path: web::Path<String>,
    payload: web::Json<UpdateTeamPerformance>,
) -> Result<HttpResponse, ApiError> {
    let id = validate_doc_id(&path, NOT_FOUND)?;
    let score = payload
        .performance
        .ok_or_else(|| ApiError::Validation(vec!["Performance score is required".into()]))?;
    if !(0.0..=100.0).contains(&score) {
        return Err(ApiError::Validation(vec![
            "performance must be between 0 and 100".into(),
        ]));
    }

    let mut team = find_team(&db, id, "Error updating team performance").await?;
    team.record_performance(score, Utc::now().date_naive());
    team.updated_at = Utc::now();

    teams(&db)
        .replace_one(doc! { "_id": id }, &team)
        .await
        .map_err(|e| ApiError::db("Error updating team performance", e))?;

    Ok(HttpResponse::Ok().json(Envelope::message("Team performance updated successfully", team)))
}

/// Delete team
#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    params(("id", Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team deleted", body = Object, example = json!({
            "success": true, "message": "Team deleted successfully", "data": {}
        })),
        (status = 404, description = "Team not found")
    ),
    tag = "Team"
)]
pub async fn delete_team(
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = validate_doc_id(&path, NOT_FOUND)?;
    let result = teams(&db)
        .delete_one(doc! { "_id": id })
        .await
        .map_err(|e| ApiError::db("Error deleting team", e))?;

    if result.deleted_count == 0 {
        return Err(ApiError::NotFound(NOT_FOUND));
    }

    Ok(HttpResponse::Ok().json(Envelope::message("Team deleted successfully", json!({}))))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web::Data};
    use mongodb::Client;
    use mongodb::bson::oid::ObjectId;

    use crate::routes;

    async fn test_db() -> mongodb::Database {
        Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap()
            .database("teamsdb_test")
    }

    #[actix_web::test]
    async fn create_with_empty_body_lists_schema_messages() {
        let app = test::init_service(
            App::new().app_data(Data::new(test_db().await)).configure(routes::configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/teams")
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let errors = body["errors"].as_array().unwrap();
        assert!(errors.contains(&serde_json::json!("Team name is required")));
        assert!(errors.contains(&serde_json::json!("Performance score is required")));
    }

    #[actix_web::test]
    async fn malformed_id_is_not_found() {
        let app = test::init_service(
            App::new().app_data(Data::new(test_db().await)).configure(routes::configure),
        )
        .await;
        for req in [
            test::TestRequest::get().uri("/api/teams/xyz").to_request(),
            test::TestRequest::delete().uri("/api/teams/xyz").to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "Team not found");
        }
    }

    #[actix_web::test]
    async fn performance_update_rejects_out_of_range_scores_before_lookup() {
        let app = test::init_service(
            App::new().app_data(Data::new(test_db().await)).configure(routes::configure),
        )
        .await;
        let id = ObjectId::new().to_hex();

        for body in [
            serde_json::json!({}),
            serde_json::json!({ "performance": 120 }),
        ] {
            let req = test::TestRequest::put()
                .uri(&format!("/api/teams/{id}/performance"))
                .set_json(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }
}
