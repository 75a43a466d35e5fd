//! Order summary for the merchant dashboard order list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{OrderId, TenantId};
use super::price::Price;

/// A single row in the merchant's order list.
///
/// Carries just the fields the dashboard sorts and displays; full order
/// detail lives outside the catalog core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub tenant: TenantId,
    pub customer_name: String,
    pub total: Price,
    pub placed_at: DateTime<Utc>,
}
