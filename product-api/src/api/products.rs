use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::domain::models::product::{NewProduct, Product, ProductChanges};
use crate::error::AppError;
use crate::server::AppState;
use crate::validation::{self, FieldError};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(update_product)
                .patch(toggle_availability)
                .delete(delete_product),
        )
}

/// Public view of a product: the system timestamps never leave the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            availability: product.availability,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductBody {
    pub data: ProductResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListBody {
    pub data: Vec<ProductResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedBody {
    /// Always `"Product was deleted"`.
    pub data: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    #[serde(default = "default_availability")]
    pub availability: bool,
}

/// PUT replaces all three mutable fields; an omitted `availability` takes the
/// column default rather than the stored value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: f64,
    #[serde(default = "default_availability")]
    pub availability: bool,
}

fn default_availability() -> bool {
    true
}

fn ensure_id(raw: &str) -> Result<i64, AppError> {
    validation::check_id(raw).map_err(|err| AppError::Validation(vec![err]))
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    summary = "List all products, newest first",
    responses(
        (status = 200, description = "Every stored product, ordered by id descending", body = ProductListBody),
    ),
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProductListBody>, AppError> {
    let products = state.store.find_all().await?;

    Ok(Json(ProductListBody {
        data: products.into_iter().map(ProductResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    summary = "Fetch one product by id",
    params(("id" = String, Path, description = "Product id, must be an integer")),
    responses(
        (status = 200, description = "The matching product", body = ProductBody),
        (status = 400, description = "Non-integer id", body = crate::error::ValidationBody),
        (status = 404, description = "No product with that id", body = crate::error::ErrorBody),
    ),
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProductBody>, AppError> {
    let id = ensure_id(&raw_id)?;

    let product = state
        .store
        .find(id)
        .await?
        .ok_or_else(AppError::product_not_found)?;

    Ok(Json(ProductBody {
        data: product.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    summary = "Create a product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Created; id freshly assigned, availability defaults to true", body = ProductBody),
        (status = 400, description = "One error per violated rule", body = crate::error::ValidationBody),
    ),
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ProductBody>), AppError> {
    let errors = validation::run(validation::CREATE_RULES, &body);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let payload: CreateProductRequest = serde_json::from_value(body)?;

    let product = state
        .store
        .insert(NewProduct {
            name: payload.name,
            price: payload.price,
            availability: payload.availability,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductBody {
            data: product.into(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    summary = "Replace a product's name, price and availability",
    params(("id" = String, Path, description = "Product id, must be an integer")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "The updated product", body = ProductBody),
        (status = 400, description = "Id and body errors collected into one list", body = crate::error::ValidationBody),
        (status = 404, description = "No product with that id", body = crate::error::ErrorBody),
    ),
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<ProductBody>, AppError> {
    // Id and body failures go out together, id first.
    let mut errors: Vec<FieldError> = Vec::new();
    let id = match validation::check_id(&raw_id) {
        Ok(id) => Some(id),
        Err(err) => {
            errors.push(err);
            None
        }
    };
    errors.extend(validation::run(validation::UPDATE_RULES, &body));

    let (Some(id), true) = (id, errors.is_empty()) else {
        return Err(AppError::Validation(errors));
    };

    let payload: UpdateProductRequest = serde_json::from_value(body)?;

    let updated = state
        .store
        .update(
            id,
            ProductChanges {
                name: payload.name,
                price: payload.price,
                availability: payload.availability,
            },
        )
        .await?
        .ok_or_else(AppError::product_not_found)?;

    Ok(Json(ProductBody {
        data: updated.into(),
    }))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "products",
    summary = "Toggle a product's availability",
    params(("id" = String, Path, description = "Product id, must be an integer")),
    responses(
        (status = 200, description = "Availability flipped; applying twice restores the original value", body = ProductBody),
        (status = 400, description = "Non-integer id", body = crate::error::ValidationBody),
        (status = 404, description = "No product with that id", body = crate::error::ErrorBody),
    ),
)]
pub async fn toggle_availability(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProductBody>, AppError> {
    let id = ensure_id(&raw_id)?;

    let product = state
        .store
        .find(id)
        .await?
        .ok_or_else(AppError::product_not_found)?;

    let updated = state
        .store
        .update(
            id,
            ProductChanges {
                availability: !product.availability,
                name: product.name,
                price: product.price,
            },
        )
        .await?
        .ok_or_else(AppError::product_not_found)?;

    Ok(Json(ProductBody {
        data: updated.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    summary = "Delete a product permanently",
    params(("id" = String, Path, description = "Product id, must be an integer")),
    responses(
        (status = 200, description = "Removed; the payload is the literal string", body = DeletedBody),
        (status = 400, description = "Non-integer id", body = crate::error::ValidationBody),
        (status = 404, description = "No product with that id (including repeat deletes)", body = crate::error::ErrorBody),
    ),
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeletedBody>, AppError> {
    let id = ensure_id(&raw_id)?;

    if !state.store.delete(id).await? {
        return Err(AppError::product_not_found());
    }

    Ok(Json(DeletedBody {
        data: "Product was deleted".to_string(),
    }))
}
