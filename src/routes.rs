use actix_web::web;

use crate::api::{employee, team};
use crate::error::json_error_handler;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));

    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // team filters must register before the bare {id} route
                    .service(
                        web::resource("/team/name/{team_name}")
                            .route(web::get().to(employee::employees_by_team_name)),
                    )
                    .service(
                        web::resource("/team/{team_id}")
                            .route(web::get().to(employee::employees_by_team)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/teams")
                    // /teams
                    .service(
                        web::resource("")
                            .route(web::get().to(team::list_teams))
                            .route(web::post().to(team::create_team)),
                    )
                    // /teams/{id}/performance
                    .service(
                        web::resource("/{id}/performance")
                            .route(web::put().to(team::update_team_performance)),
                    )
                    // /teams/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(team::get_team))
                            .route(web::put().to(team::update_team))
                            .route(web::delete().to(team::delete_team)),
                    ),
            ),
    );
}
