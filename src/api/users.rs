use actix_web::{web, HttpResponse};

use crate::database::UserStore;
use crate::models::{DeleteUserResponse, NewUser, User, UserUpdate};
use crate::utils::ErrorBody;

/// Rotas montadas sob `/users`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::post().to(create_user))
            .route("", web::get().to(list_users))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::patch().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}

/// POST /users - Cria usuário
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Payload rejected", body = ErrorBody)
    )
)]
pub async fn create_user(
    store: web::Data<dyn UserStore>,
    body: web::Json<NewUser>,
) -> HttpResponse {
    let user = body.into_inner();

    if let Err(e) = user.validate() {
        log::warn!("⚠️ POST /users rejected: {}", e);
        return HttpResponse::BadRequest().json(e.body());
    }

    match store.create(user).await {
        Ok(created) => {
            log::info!("✅ User created: {}", created.id);
            HttpResponse::Created().json(created)
        }
        Err(e) => {
            log::error!("❌ Error creating user: {}", e);
            HttpResponse::BadRequest().json(e.body())
        }
    }
}

/// GET /users - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_users(store: web::Data<dyn UserStore>) -> HttpResponse {
    match store.list().await {
        Ok(users) => {
            log::info!("📋 Listed {} users", users.len());
            HttpResponse::Ok().json(users)
        }
        Err(e) => {
            log::error!("❌ Error listing users: {}", e);
            HttpResponse::InternalServerError().json(e.body())
        }
    }
}

/// GET /users/{id} - Busca usuário
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "No user with this id"),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn get_user(store: web::Data<dyn UserStore>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();

    match store.get(&id).await {
        Ok(Some(user)) => HttpResponse::Ok().json(user),
        Ok(None) => {
            log::warn!("⚠️ User {} not found", id);
            HttpResponse::NotFound().finish()
        }
        Err(e) => {
            log::error!("❌ Error fetching user {}: {}", id, e);
            HttpResponse::InternalServerError().json(e.body())
        }
    }
}

/// PATCH /users/{id} - Atualiza usuário e retorna o registro atualizado
///
/// `null` em `email` ou `age` remove o campo.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "User after the update", body = User),
        (status = 404, description = "No user with this id"),
        (status = 400, description = "Update rejected", body = ErrorBody)
    )
)]
pub async fn update_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
    body: web::Json<UserUpdate>,
) -> HttpResponse {
    let id = path.into_inner();
    let update = body.into_inner();

    if let Err(e) = update.validate() {
        log::warn!("⚠️ PATCH /users/{} rejected: {}", id, e);
        return HttpResponse::BadRequest().json(e.body());
    }

    match store.update(&id, update).await {
        Ok(Some(user)) => {
            log::info!("✅ User updated: {}", id);
            HttpResponse::Ok().json(user)
        }
        Ok(None) => {
            log::warn!("⚠️ User {} not found", id);
            HttpResponse::NotFound().finish()
        }
        Err(e) => {
            log::error!("❌ Error updating user {}: {}", id, e);
            HttpResponse::BadRequest().json(e.body())
        }
    }
}

/// DELETE /users/{id} - Remove usuário
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponse),
        (status = 404, description = "No user with this id", body = String),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn delete_user(store: web::Data<dyn UserStore>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();

    match store.delete(&id).await {
        Ok(Some(user)) => {
            log::info!("🗑️  User deleted: {}", id);
            HttpResponse::Ok().json(DeleteUserResponse::for_user(&user))
        }
        Ok(None) => {
            log::warn!("⚠️ User {} not found", id);
            HttpResponse::NotFound().body("User not found")
        }
        Err(e) => {
            log::error!("❌ Error deleting user {}: {}", id, e);
            HttpResponse::InternalServerError().json(e.body())
        }
    }
}
