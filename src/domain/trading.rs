//! Trade-entry form types. Validation only; nothing here places orders.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::domain::errors::{AppError, ValidationResult};
use crate::domain::market_data::{Price, Symbol};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay, EnumString, EnumIter, AsRefStr,
    Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    #[default]
    #[strum(serialize = "buy")]
    Buy,
    #[strum(serialize = "sell")]
    Sell,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay, EnumString, EnumIter, AsRefStr,
    Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    #[strum(serialize = "market")]
    Market,
    #[strum(serialize = "limit")]
    Limit,
}

/// Raw values as typed into the trade ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeForm {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: String,
    pub limit_price: String,
}

/// A validated ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeOrder {
    pub symbol: Symbol,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: f64,
    pub limit_price: Option<Price>,
}

impl TradeForm {
    pub fn validate(&self) -> ValidationResult<TradeOrder> {
        let symbol = Symbol::new(&self.symbol).map_err(AppError::ValidationError)?;
        let quantity = parse_positive("quantity", &self.quantity)?;

        let limit_input = self.limit_price.trim();
        let limit_price = match self.order_type {
            OrderType::Limit if limit_input.is_empty() => {
                return Err(AppError::ValidationError(
                    "limit orders need a limit price".to_string(),
                ));
            }
            OrderType::Limit => Some(Price::from(parse_positive("limit price", limit_input)?)),
            OrderType::Market if !limit_input.is_empty() => {
                return Err(AppError::ValidationError(
                    "market orders cannot carry a limit price".to_string(),
                ));
            }
            OrderType::Market => None,
        };

        Ok(TradeOrder {
            symbol,
            side: self.side,
            order_type: self.order_type,
            quantity,
            limit_price,
        })
    }
}

impl TradeOrder {
    /// Quantity times the reference price; limit price when present.
    pub fn notional(&self, market_price: Price) -> f64 {
        let price = self.limit_price.unwrap_or(market_price);
        self.quantity * price.value()
    }
}

fn parse_positive(field: &str, raw: &str) -> ValidationResult<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::ValidationError(format!("{} must be a number", field)))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::ValidationError(format!("{} must be greater than zero", field)));
    }
    Ok(value)
}
