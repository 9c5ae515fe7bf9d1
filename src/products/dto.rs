use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::products::repo_types::{NewProduct, Product, ProductPatch};

/// Body for POST /product. Numeric fields arrive as JSON numbers or as
/// numeric strings (the form submits strings) and go through an explicit
/// parse step; anything else is a validation error, never a silent coercion.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Value>,
    pub category: Option<String>,
    pub rating: Option<Value>,
    pub image: Option<String>,
}

/// Body for PATCH /product: the target id plus any subset of fields.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Value>,
    pub category: Option<String>,
    pub rating: Option<Value>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Uuid,
}

/// Mutation responses wrap the product under `data`.
#[derive(Debug, Serialize)]
pub struct ProductData {
    pub data: Product,
}

fn parse_number(field: &str, value: &Value) -> Result<f64, ApiError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::Validation(format!("{field} must be a number")))
}

fn required_text(field: &str, value: Option<String>) -> Result<String, ApiError> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation(format!("{field} is required")))
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn check_price(price: f64) -> Result<f64, ApiError> {
    if price < 0.0 {
        return Err(ApiError::Validation("price must be non-negative".into()));
    }
    Ok(price)
}

impl CreateProductRequest {
    pub fn validate(self) -> Result<NewProduct, ApiError> {
        let name = required_text("name", self.name)?;
        let description = required_text("description", self.description)?;
        let category = required_text("category", self.category)?;
        let price = check_price(parse_number(
            "price",
            self.price
                .as_ref()
                .ok_or_else(|| ApiError::Validation("price is required".into()))?,
        )?)?;
        // Rating range (0-5) is a client expectation, deliberately unenforced.
        let rating = parse_number(
            "rating",
            self.rating
                .as_ref()
                .ok_or_else(|| ApiError::Validation("rating is required".into()))?,
        )?;
        let image = optional_text(self.image);

        Ok(NewProduct {
            name,
            description,
            price,
            category,
            rating,
            image,
        })
    }
}

impl UpdateProductRequest {
    pub fn validate(self) -> Result<(Uuid, ProductPatch), ApiError> {
        let price = self
            .price
            .as_ref()
            .map(|v| parse_number("price", v).and_then(check_price))
            .transpose()?;
        let rating = self
            .rating
            .as_ref()
            .map(|v| parse_number("rating", v))
            .transpose()?;

        let patch = ProductPatch {
            name: optional_text(self.name),
            description: optional_text(self.description),
            price,
            category: optional_text(self.category),
            rating,
            image: optional_text(self.image),
        };
        Ok((self.id, patch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_request(body: Value) -> CreateProductRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn create_accepts_json_numbers() {
        let new = create_request(json!({
            "name": "Widget",
            "description": "A widget",
            "price": 10,
            "category": "tools",
            "rating": 4.5,
        }))
        .validate()
        .unwrap();
        assert_eq!(new.price, 10.0);
        assert_eq!(new.rating, 4.5);
        assert_eq!(new.image, None);
    }

    #[test]
    fn create_parses_numeric_strings() {
        let new = create_request(json!({
            "name": "Widget",
            "description": "A widget",
            "price": "19.99",
            "category": "tools",
            "rating": " 3 ",
        }))
        .validate()
        .unwrap();
        assert_eq!(new.price, 19.99);
        assert_eq!(new.rating, 3.0);
    }

    #[test]
    fn create_rejects_unparseable_price() {
        let err = create_request(json!({
            "name": "Widget",
            "description": "A widget",
            "price": "ten dollars",
            "category": "tools",
            "rating": 4,
        }))
        .validate()
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn create_rejects_negative_price() {
        let err = create_request(json!({
            "name": "Widget",
            "description": "A widget",
            "price": -1,
            "category": "tools",
            "rating": 4,
        }))
        .validate()
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn create_rejects_missing_required_fields() {
        for missing in ["name", "description", "price", "category", "rating"] {
            let mut body = json!({
                "name": "Widget",
                "description": "A widget",
                "price": 10,
                "category": "tools",
                "rating": 4,
            });
            body.as_object_mut().unwrap().remove(missing);
            let err = create_request(body).validate().unwrap_err();
            assert!(err.to_string().contains(missing), "field {missing}");
        }
    }

    #[test]
    fn create_does_not_cap_rating() {
        let new = create_request(json!({
            "name": "Widget",
            "description": "A widget",
            "price": 10,
            "category": "tools",
            "rating": 11,
        }))
        .validate()
        .unwrap();
        assert_eq!(new.rating, 11.0);
    }

    #[test]
    fn update_keeps_unsupplied_fields_as_none() {
        let req: UpdateProductRequest = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "price": "25",
        }))
        .unwrap();
        let (_, patch) = req.validate().unwrap();
        assert_eq!(patch.price, Some(25.0));
        assert_eq!(patch.name, None);
        assert_eq!(patch.rating, None);
    }

    #[test]
    fn update_rejects_bad_rating() {
        let req: UpdateProductRequest = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "rating": {"value": 3},
        }))
        .unwrap();
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("rating"));
    }
}
