// src/router.rs

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::AppState,
    docs::ApiDoc,
    handlers,
    middleware::{
        auth::auth_guard,
        gate::{admin_gate, counter_gate},
    },
};

// PDFs de checklist
const UPLOAD_LIMIT_BYTES: usize = 20 * 1024 * 1024;

/// Monta o router principal com todas as seções.
pub fn app(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login));

    // Sessão (exige token, não exige perfil)
    let session_routes = Router::new()
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::get_me))
        .route("/me/stream", get(handlers::auth::stream_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let admin_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route(
            "/technicians",
            get(handlers::technicians::list_technicians)
                .post(handlers::technicians::create_technician),
        )
        .route(
            "/technicians/goal-distribution",
            post(handlers::technicians::distribute_goal),
        )
        .route(
            "/technicians/{id}",
            put(handlers::technicians::update_technician)
                .delete(handlers::technicians::delete_technician),
        )
        .route(
            "/technicians/{id}/goal",
            put(handlers::technicians::set_technician_goal),
        )
        .route(
            "/drivers",
            get(handlers::drivers::list_drivers).post(handlers::drivers::create_driver),
        )
        .route(
            "/drivers/{id}",
            put(handlers::drivers::update_driver).delete(handlers::drivers::delete_driver),
        )
        .route(
            "/presets",
            get(handlers::presets::list_presets).post(handlers::presets::create_preset),
        )
        .route(
            "/presets/{id}",
            put(handlers::presets::update_preset).delete(handlers::presets::delete_preset),
        )
        .route("/codes", get(handlers::presets::get_code_catalogs))
        .route("/codes/{category}", put(handlers::presets::put_code_catalog))
        .route(
            "/chargebacks",
            get(handlers::chargebacks::list_chargebacks)
                .post(handlers::chargebacks::create_chargeback),
        )
        .route(
            "/chargebacks/{id}",
            put(handlers::chargebacks::update_chargeback)
                .delete(handlers::chargebacks::delete_chargeback),
        )
        .route(
            "/checklists",
            get(handlers::checklists::list_checklists)
                .post(handlers::checklists::create_checklist)
                .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route(
            "/checklists/{id}",
            axum::routing::delete(handlers::checklists::delete_checklist),
        )
        .route(
            "/checklists/{id}/file",
            get(handlers::checklists::get_checklist_file),
        )
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/users/{uid}",
            put(handlers::users::update_user).delete(handlers::users::delete_user),
        )
        .route(
            "/counter-budgets",
            get(handlers::counter::list_counter_budgets),
        )
        .route(
            "/service-orders",
            get(handlers::dashboard::list_service_orders),
        )
        .route("/dashboard", get(handlers::dashboard::get_summary))
        .route(
            "/configs/counter-goal",
            get(handlers::settings::get_counter_goal).put(handlers::settings::update_counter_goal),
        )
        .route(
            "/text-templates/visit-announcement",
            get(handlers::settings::get_visit_announcement)
                .put(handlers::settings::update_visit_announcement),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_gate,
        ));

    // Portal do técnico de balcão
    let counter_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/technicians", get(handlers::technicians::list_technicians))
        .route(
            "/budgets",
            get(handlers::counter::list_own_budgets).post(handlers::counter::create_budget),
        )
        .route("/chargebacks", post(handlers::chargebacks::create_chargeback))
        .route("/goal", get(handlers::counter::get_goal_progress))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            counter_gate,
        ));

    // Combina tudo no router principal
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes.merge(session_routes))
        .nest("/api/admin", admin_routes)
        .nest("/api/counter", counter_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}
