//! Product creation route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use catalog_core::{Price, ProductName};

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::NewProduct;
use crate::state::AppState;

/// Product form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl ProductForm {
    /// Validate the submitted fields.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` naming the first invalid field.
    pub fn validate(self) -> Result<NewProduct> {
        let name =
            ProductName::parse(&self.name).map_err(|e| AppError::BadRequest(e.to_string()))?;

        let description = self.description.trim();
        if description.is_empty() {
            return Err(AppError::BadRequest(
                "description cannot be empty".to_string(),
            ));
        }

        let price = Price::parse(&self.price).map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(NewProduct {
            name,
            description: description.to_string(),
            price,
        })
    }
}

/// New product page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/new.html")]
pub struct NewProductTemplate {
    pub current_user: Option<String>,
}

/// Display the product creation form.
pub async fn new_page(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    NewProductTemplate {
        current_user: user.map(|u| u.username.into_inner()),
    }
}

/// Handle product form submission.
///
/// Nothing is written unless every field validates.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let new_product = form.validate()?;
    let product = ProductRepository::new(state.pool())
        .create(&new_product)
        .await?;

    tracing::info!(product_id = %product.id, price = %product.price, "product created");
    Ok(Redirect::to("/"))
}
