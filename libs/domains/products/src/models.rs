use chrono::{DateTime, SecondsFormat, Utc};
use resource::{Resource, ResourceError, ResourceResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::entity;

pub const NAME_MIN_LENGTH: usize = 3;
pub const NAME_MAX_LENGTH: usize = 200;
/// Largest value a `NUMERIC(10,2)` column holds
pub const PRICE_MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

const NAME_TOO_SHORT: &str = "name must be at least 3 characters long";
const NAME_TOO_LONG: &str = "name must be at most 200 characters long";
const PRICE_NEGATIVE: &str = "price must not be negative";
const PRICE_TOO_LARGE: &str = "price must be at most 99999999.99";
const STOCK_NEGATIVE: &str = "stock must not be negative";

fn name_violation(name: &str) -> Option<&'static str> {
    let length = name.trim().chars().count();
    if length < NAME_MIN_LENGTH {
        Some(NAME_TOO_SHORT)
    } else if length > NAME_MAX_LENGTH {
        Some(NAME_TOO_LONG)
    } else {
        None
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    match name_violation(name) {
        Some(message) => Err(ValidationError::new("name").with_message(Cow::Borrowed(message))),
        None => Ok(()),
    }
}

fn price_violation(price: &Decimal) -> Option<&'static str> {
    if *price < Decimal::ZERO {
        Some(PRICE_NEGATIVE)
    } else if *price > PRICE_MAX {
        Some(PRICE_TOO_LARGE)
    } else {
        None
    }
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    match price_violation(price) {
        Some(message) => Err(ValidationError::new("price").with_message(Cow::Borrowed(message))),
        None => Ok(()),
    }
}

/// Keeps an explicit `null` apart from an absent field: absent stays `None`,
/// `null` becomes `Some(None)`.
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Validated product
///
/// `name` is kept trimmed and `price` is rounded to cents, matching the
/// `NUMERIC(10,2)` column.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// `0` until persisted
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    fn check(self) -> ResourceResult<Self> {
        let mut violations = Vec::new();

        if let Some(message) = name_violation(&self.name) {
            violations.push(message.to_string());
        }
        if let Some(message) = price_violation(&self.price) {
            violations.push(message.to_string());
        }
        if self.stock < 0 {
            violations.push(STOCK_NEGATIVE.to_string());
        }

        if violations.is_empty() {
            Ok(self)
        } else {
            Err(ResourceError::Validation(violations))
        }
    }

    fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        // Halves away from zero, as PostgreSQL rounds NUMERIC
        self.price = self
            .price
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        self
    }
}

/// DTO for creating a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    /// At least 3 characters once trimmed; unique across products
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "Mechanical keyboard")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(example = 79.9)]
    pub price: Decimal,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    #[schema(example = 25)]
    pub stock: i32,
}

/// DTO for replacing a product (PUT)
///
/// Every field except `description` is required; an omitted description
/// clears it.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: i32,
}

/// DTO for changing some fields of a product (PATCH)
///
/// An absent `description` is left alone; an explicit `null` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PatchProduct {
    #[validate(custom(function = "validate_name"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<String>, nullable)]
    pub description: Option<Option<String>>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: Option<i32>,
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    /// RFC 3339, millisecond precision, UTC
    #[schema(example = "2025-01-04T10:15:30.123Z")]
    pub created_at: String,
}

impl Resource for Product {
    type Record = entity::Model;
    type Create = CreateProduct;
    type Update = UpdateProduct;
    type Patch = PatchProduct;
    type View = ProductView;

    const KIND: &'static str = "Product";
    const UNIQUE_FIELD: &'static str = "name";

    fn unique_key_of(input: &CreateProduct) -> String {
        input.name.trim().to_string()
    }

    fn from_creation_input(input: CreateProduct) -> ResourceResult<Self> {
        Product {
            id: 0,
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            created_at: Utc::now(),
        }
        .check()
        .map(Product::normalized)
    }

    fn from_stored_record(record: entity::Model) -> Self {
        Product {
            id: record.id,
            name: record.name,
            description: record.description,
            price: record.price,
            stock: record.stock,
            created_at: record.created_at.into(),
        }
    }

    fn to_stored_record(&self) -> entity::Model {
        entity::Model {
            id: self.id.max(0),
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            stock: self.stock,
            created_at: self.created_at.into(),
        }
    }

    fn to_public(&self) -> ProductView {
        ProductView {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price.to_f64().unwrap_or_default(),
            stock: self.stock,
            created_at: self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    fn apply_full_update(self, input: UpdateProduct) -> ResourceResult<Self> {
        Product {
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            ..self
        }
        .check()
        .map(Product::normalized)
    }

    fn apply_partial_update(self, input: PatchProduct) -> ResourceResult<Self> {
        Product {
            name: input.name.unwrap_or(self.name),
            description: input.description.unwrap_or(self.description),
            price: input.price.unwrap_or(self.price),
            stock: input.stock.unwrap_or(self.stock),
            ..self
        }
        .check()
        .map(Product::normalized)
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn unique_key(&self) -> &str {
        &self.name
    }
}
