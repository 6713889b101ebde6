use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SalePhase {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "migrated")]
    Migrated,
}

/// Creation inputs for a sale. Validated by `bonding_curve::create`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SaleParams {
    #[serde(default)]
    pub token_symbol: String,
    pub sale_supply: f64,
    pub lp_supply: f64,
    pub start_price: f64,
    pub slope: f64,
}

/// Liquidity-pool record produced once, at migration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LpRecord {
    pub token: String,
    pub token_amount: f64,
    pub reserve_amount: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SaleState {
    pub token_symbol: String,
    pub sale_supply: f64,
    pub lp_supply: f64,
    pub start_price: f64,
    pub slope: f64,
    pub sold: f64,
    pub reserve: f64,
    pub migrated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lp: Option<LpRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SaleState {
    pub fn phase(&self) -> SalePhase {
        if self.migrated {
            SalePhase::Migrated
        } else {
            SalePhase::Active
        }
    }

    pub fn remaining(&self) -> f64 {
        (self.sale_supply - self.sold).max(0.0)
    }

    pub fn progress_percent(&self) -> f64 {
        (self.sold / self.sale_supply * 100.0).min(100.0)
    }
}

/// Priced purchase of `amount_tokens` from the current point on the curve.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Quote {
    pub amount_tokens: f64,
    pub cost: f64,
    pub avg_price: f64,
    pub start_price: f64,
    pub end_price: f64,
}

// Unit the store persists: one file per record
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SaleRecord {
    pub id: String,
    pub state: SaleState,
}

impl SaleRecord {
    pub fn new(state: SaleState) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            state,
        }
    }
}

/// Read view of a sale with the derived curve figures filled in.
#[derive(Debug, Serialize, Clone)]
pub struct SaleSummary {
    #[serde(flatten)]
    pub state: SaleState,
    pub phase: SalePhase,
    pub spot_price: f64,
    pub remaining: f64,
    pub progress_percent: f64,
    pub can_migrate: bool,
}

#[derive(Debug, Serialize, Clone)]
pub struct SaleResponse {
    pub id: String,
    pub sale: SaleSummary,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub amount_tokens: Option<f64>,
    pub budget: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct BuyRequest {
    pub amount_tokens: f64,
}

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub sold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub sold: f64,
    pub price: f64,
}

#[derive(Debug, Serialize)]
pub struct BuyResponse {
    pub quote: Quote,
    pub sale: SaleSummary,
}

#[derive(Debug, Serialize)]
pub struct MigrationStatus {
    pub can_migrate: bool,
    pub phase: SalePhase,
}

#[derive(Debug, Serialize)]
pub struct MigrateResponse {
    pub lp: LpRecord,
    pub sale: SaleSummary,
}
