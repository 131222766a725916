use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    routing::{get, post},
    Extension, Json, Router,
};

use agentplay_core::{
    payments::{Payment, PaymentFilter, PaymentStats},
    Mutation,
};

use crate::{auth::SessionScope, error::ApiResult, main_lib::AppState};

async fn list_payments(
    Extension(scope): Extension<SessionScope>,
    Query(filter): Query<PaymentFilter>,
) -> ApiResult<Json<Vec<Payment>>> {
    let payments = scope.services.payments.list_payments(&filter).await?;
    Ok(Json(payments))
}

async fn payment_stats(Extension(scope): Extension<SessionScope>) -> ApiResult<Json<PaymentStats>> {
    let stats = scope.services.payments.stats().await?;
    Ok(Json(stats))
}

async fn payment_years(Extension(scope): Extension<SessionScope>) -> ApiResult<Json<Vec<i32>>> {
    let years = scope.services.payments.available_years().await?;
    Ok(Json(years))
}

async fn mark_paid(
    Path(id): Path<String>,
    Extension(scope): Extension<SessionScope>,
) -> ApiResult<Json<Mutation<Payment>>> {
    let payment = scope.services.payments.mark_as_paid(&id).await?;
    Ok(Json(payment))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/payments", get(list_payments))
        .route("/payments/stats", get(payment_stats))
        .route("/payments/years", get(payment_years))
        .route("/payments/{id}/paid", post(mark_paid))
}
