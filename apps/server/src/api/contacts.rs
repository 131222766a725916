use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    routing::{get, put},
    Extension, Json, Router,
};

use agentplay_core::{
    contacts::{Contact, ContactFilter, NewContact},
    Mutation,
};

use crate::{auth::SessionScope, error::ApiResult, main_lib::AppState};

async fn list_contacts(
    Extension(scope): Extension<SessionScope>,
    Query(filter): Query<ContactFilter>,
) -> ApiResult<Json<Vec<Contact>>> {
    let contacts = scope.services.contacts.list_contacts(&filter).await?;
    Ok(Json(contacts))
}

async fn create_contact(
    Extension(scope): Extension<SessionScope>,
    Json(new_contact): Json<NewContact>,
) -> ApiResult<Json<Mutation<Contact>>> {
    let created = scope.services.contacts.create_contact(new_contact).await?;
    Ok(Json(created))
}

async fn update_contact(
    Path(id): Path<String>,
    Extension(scope): Extension<SessionScope>,
    Json(changes): Json<NewContact>,
) -> ApiResult<Json<Mutation<Contact>>> {
    let updated = scope.services.contacts.update_contact(&id, changes).await?;
    Ok(Json(updated))
}

async fn delete_contact(
    Path(id): Path<String>,
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<Json<Mutation<()>>> {
    let deleted = scope.services.contacts.delete_contact(&id).await?;
    Ok(Json(deleted))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route("/contacts/{id}", put(update_contact).delete(delete_contact))
}
