//! Bill and Bill Item Models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::AppError;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

/// Customer label used when the caller supplies none
pub const ANONYMOUS_CUSTOMER: &str = "Anonymous Customer";

/// Payment mode enum, stored as the Postgres `payment_mode` type
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "payment_mode", rename_all = "lowercase")]
pub enum PaymentMode {
    #[default]
    Cash,
    Online,
}

impl PaymentMode {
    /// Parse a caller-supplied mode; anything unrecognized falls back to cash
    pub fn parse_or_cash(value: Option<&str>) -> Self {
        match value {
            Some("online") => PaymentMode::Online,
            _ => PaymentMode::Cash,
        }
    }
}

/// Bill model
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Bill {
    pub id: i32,
    pub customer_name: String,
    pub total: Decimal,
    pub payment_mode: PaymentMode,
    pub created_at: DateTime<Utc>,
}

/// Bill item row: quantity plus the unit price frozen at sale time
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BillItem {
    pub id: i32,
    pub bill_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price: Decimal,
}

/// Bill item enriched with its product name for API responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItemDetail {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price: Decimal,
    pub product_name: String,
}

/// Bill together with its line items
#[derive(Debug, Clone, Serialize)]
pub struct BillWithItems {
    pub id: i32,
    pub customer_name: String,
    pub total: Decimal,
    pub payment_mode: PaymentMode,
    pub created_at: DateTime<Utc>,
    pub items: Vec<BillItemDetail>,
}

/// Create bill payload (field names match the HTTP API)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillCreate {
    #[serde(default)]
    pub customer_name: Option<String>,
    pub items: Vec<BillLineInput>,
    #[serde(default)]
    pub payment_mode: Option<String>,
    #[serde(default)]
    pub custom_total: Option<Decimal>,
}

/// One requested line: product and quantity
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineInput {
    pub product_id: i32,
    pub quantity: i32,
}

/// Validated and normalized bill request, ready for the billing transaction
#[derive(Debug, Clone)]
pub struct NewBill {
    pub customer_name: String,
    pub items: Vec<BillLineInput>,
    pub payment_mode: PaymentMode,
    pub custom_total: Option<Decimal>,
}

impl BillCreate {
    /// Validate the payload and normalize it into a [`NewBill`]
    ///
    /// - blank / missing customer name falls back to [`ANONYMOUS_CUSTOMER`]
    /// - the item list must be non-empty, with positive quantities
    /// - unrecognized payment modes fall back to cash
    /// - a negative total override is rejected
    pub fn normalize(self) -> Result<NewBill, AppError> {
        let customer_name = match self.customer_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                validate_required_text(name, "customerName", MAX_NAME_LEN)?;
                name.to_string()
            }
            _ => ANONYMOUS_CUSTOMER.to_string(),
        };

        if self.items.is_empty() {
            return Err(AppError::validation("At least one item is required."));
        }

        for item in &self.items {
            if item.product_id <= 0 || item.quantity <= 0 {
                return Err(AppError::validation(
                    "Each item must have a valid productId and quantity.",
                ));
            }
        }

        if let Some(total) = self.custom_total
            && total.is_sign_negative()
        {
            return Err(AppError::validation("customTotal must be non-negative."));
        }

        Ok(NewBill {
            customer_name,
            items: self.items,
            payment_mode: PaymentMode::parse_or_cash(self.payment_mode.as_deref()),
            custom_total: self.custom_total,
        })
    }
}
