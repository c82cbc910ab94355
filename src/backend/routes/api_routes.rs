/**
 * API Route Configuration
 *
 * One router per resource, each nested under its prefix by
 * [`create_router`](crate::backend::routes::router::create_router).
 *
 * # Authentication
 *
 * Every `/groups`, `/lists` and `/items` route and the two `GET /users`
 * routes sit behind [`auth_middleware`]. Signup, login and the
 * password-reset flow are public.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::auth::handlers::{
    get_user, get_users, login, password_reset_email, password_reset_form, password_reset_page, signup,
};
use crate::backend::groups::handlers::{
    add_group_users, create_group, delete_all_groups, delete_group, get_group, get_groups, modify_group,
    remove_group_user,
};
use crate::backend::items::handlers::{create_item, delete_item, get_item, get_items, get_items_of_list, modify_item};
use crate::backend::lists::handlers::{
    add_list_items, add_list_users, create_list, delete_list, get_list, get_lists, modify_list, remove_list_items,
    remove_list_user,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Routes mounted under `/users`
///
/// - `POST /signup`, `POST /login` - Public
/// - `POST /password-reset-email` - Public
/// - `GET /password-reset/{token}/{id}` - Public
/// - `PUT /password-reset/{token}/{id}/password-form` - Public
/// - `GET /`, `GET /{id_or_email}` - Requires authentication
pub fn user_routes(app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(get_users))
        .route("/{id_or_email}", get(get_user))
        .route_layer(from_fn_with_state(app_state, auth_middleware));

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/password-reset-email", post(password_reset_email))
        .route("/password-reset/{token}/{id}", get(password_reset_page))
        .route("/password-reset/{token}/{id}/password-form", put(password_reset_form))
        .merge(protected)
}

/// Routes mounted under `/groups`
pub fn group_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_groups).post(create_group))
        .route("/addUser/{id}", put(add_group_users))
        .route("/removeUser/{id}", put(remove_group_user))
        .route("/delete_all", delete(delete_all_groups))
        .route("/{id}", get(get_group).put(modify_group).delete(delete_group))
        .route_layer(from_fn_with_state(app_state, auth_middleware))
}

/// Routes mounted under `/lists`
pub fn list_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_lists))
        .route("/create", post(create_list))
        .route("/modify/{id}", put(modify_list))
        .route("/addUser/{id}", put(add_list_users))
        .route("/removeUser/{id}", put(remove_list_user))
        .route("/addItem/{id}", put(add_list_items))
        .route("/removeItem/{id}", delete(remove_list_items))
        .route("/delete/{id}", delete(delete_list))
        .route("/{id}", get(get_list))
        .route_layer(from_fn_with_state(app_state, auth_middleware))
}

/// Routes mounted under `/items`
pub fn item_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_items))
        .route("/create", post(create_item))
        .route("/modify/{id}", put(modify_item))
        .route("/delete/{id}", delete(delete_item))
        .route("/list/{id}", get(get_items_of_list))
        .route("/{id}", get(get_item))
        .route_layer(from_fn_with_state(app_state, auth_middleware))
}
