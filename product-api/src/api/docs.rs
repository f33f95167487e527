use utoipa::OpenApi;

use crate::api::products;
use crate::error::{ErrorBody, ValidationBody};
use crate::validation::FieldError;

/// Machine-readable description of the whole HTTP surface, assembled from the
/// route metadata on each handler. Rendered at `/docs`, raw JSON at
/// `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product API",
        description = "CRUD over the product catalog: list, fetch, create, replace, toggle availability, delete."
    ),
    paths(
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::toggle_availability,
        products::delete_product,
    ),
    components(schemas(
        products::ProductResponse,
        products::CreateProductRequest,
        products::UpdateProductRequest,
        products::ProductBody,
        products::ProductListBody,
        products::DeletedBody,
        FieldError,
        ErrorBody,
        ValidationBody,
    )),
    tags(
        (name = "products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;
