use std::sync::Arc;
use log::{info, warn, error};

use crate::models::{
    ApiError, BuyResponse, LpRecord, MigrateResponse, MigrationStatus, PriceResponse, Quote,
    QuoteRequest, SaleError, SaleParams, SaleRecord, SaleResponse, SaleState, SaleSummary,
};
use crate::services::SaleStore;
use crate::utils::bonding_curve;
use crate::utils::clock::Clock;
use crate::utils::migration;

/// Sale state with the derived curve figures filled in.
pub fn summary(state: &SaleState) -> SaleSummary {
    SaleSummary {
        state: state.clone(),
        phase: state.phase(),
        spot_price: bonding_curve::price_at(state, state.sold),
        remaining: state.remaining(),
        progress_percent: state.progress_percent(),
        can_migrate: migration::can_migrate(state),
    }
}

pub fn summarize(record: &SaleRecord) -> SaleResponse {
    SaleResponse {
        id: record.id.clone(),
        sale: summary(&record.state),
    }
}

fn log_rejection(id: &str, op: &str, e: SaleError) -> ApiError {
    warn!("Rejected {} on sale {}: {}", op, id, e);
    e.into()
}

/// Serializes mutations per sale: `buy` and `migrate` hold the sale's lock
/// across validate, mutate-a-copy, persist and commit.
#[derive(Clone)]
pub struct SaleService {
    store: Arc<SaleStore>,
    clock: Arc<dyn Clock>,
}

impl SaleService {
    pub fn new(store: Arc<SaleStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    async fn handle(&self, id: &str) -> Result<crate::services::SaleHandle, ApiError> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| ApiError::NotFound(format!("Sale {} not found", id)))
    }

    pub async fn create_sale(&self, params: SaleParams) -> Result<SaleResponse, ApiError> {
        let state = bonding_curve::create(&params, self.clock.as_ref())
            .map_err(|e| log_rejection("-", "create", e))?;
        let record = SaleRecord::new(state);

        self.store.persist(&record).await.map_err(|e| {
            error!("Failed to persist new sale {}: {}", record.id, e);
            ApiError::from(e)
        })?;

        info!(
            "Created sale {} for {}: supply={}, lp_supply={}, start_price={}, slope={}",
            record.id, record.state.token_symbol, record.state.sale_supply,
            record.state.lp_supply, record.state.start_price, record.state.slope
        );

        let response = summarize(&record);
        self.store.insert(record).await;
        Ok(response)
    }

    pub async fn get_sale(&self, id: &str) -> Result<SaleResponse, ApiError> {
        let handle = self.handle(id).await?;
        let record = handle.lock().await;
        Ok(summarize(&record))
    }

    pub async fn list_sales(&self) -> Vec<SaleResponse> {
        let mut sales = Vec::new();
        for handle in self.store.handles().await {
            sales.push(summarize(&*handle.lock().await));
        }
        sales.sort_by(|a, b| a.sale.state.created_at.cmp(&b.sale.state.created_at));
        sales
    }

    pub async fn price(&self, id: &str, sold: Option<f64>) -> Result<PriceResponse, ApiError> {
        let handle = self.handle(id).await?;
        let record = handle.lock().await;

        let sold = sold.unwrap_or(record.state.sold);
        if !sold.is_finite() || sold < 0.0 {
            return Err(ApiError::ValidationError("sold must be a finite number >= 0".to_string()));
        }

        Ok(PriceResponse {
            sold,
            price: bonding_curve::price_at(&record.state, sold),
        })
    }

    /// Quotes either an exact token amount or the tokens a spend buys.
    pub async fn quote(&self, id: &str, request: QuoteRequest) -> Result<Quote, ApiError> {
        let handle = self.handle(id).await?;
        let state = handle.lock().await.state.clone();

        let amount_tokens = match (request.amount_tokens, request.budget) {
            (Some(amount), None) => amount,
            (None, Some(budget)) => {
                let tokens = bonding_curve::tokens_for_budget(&state, budget)
                    .map_err(|e| log_rejection(id, "quote", e))?;
                if tokens <= 0.0 {
                    return Err(SaleError::Capacity("insufficient sale supply".to_string()).into());
                }
                tokens
            }
            _ => {
                return Err(ApiError::ValidationError(
                    "exactly one of amount_tokens or budget is required".to_string(),
                ))
            }
        };

        bonding_curve::quote(&state, amount_tokens).map_err(|e| log_rejection(id, "quote", e))
    }

    pub async fn buy(&self, id: &str, amount_tokens: f64) -> Result<BuyResponse, ApiError> {
        let handle = self.handle(id).await?;
        let mut record = handle.lock().await;

        let mut next = record.clone();
        let applied = bonding_curve::buy(&mut next.state, amount_tokens, self.clock.as_ref())
            .map_err(|e| log_rejection(id, "buy", e))?;

        self.store.persist(&next).await.map_err(|e| {
            error!("Failed to persist buy on sale {}: {}", id, e);
            ApiError::from(e)
        })?;
        *record = next;

        info!(
            "Buy on sale {} ({}): amount={}, cost={}, avg_price={}, sold={}, reserve={}",
            id, record.state.token_symbol, applied.amount_tokens, applied.cost,
            applied.avg_price, record.state.sold, record.state.reserve
        );

        Ok(BuyResponse {
            quote: applied,
            sale: summary(&record.state),
        })
    }

    pub async fn migration_status(&self, id: &str) -> Result<MigrationStatus, ApiError> {
        let handle = self.handle(id).await?;
        let record = handle.lock().await;
        Ok(MigrationStatus {
            can_migrate: migration::can_migrate(&record.state),
            phase: record.state.phase(),
        })
    }

    pub async fn migrate(&self, id: &str) -> Result<MigrateResponse, ApiError> {
        let handle = self.handle(id).await?;
        let mut record = handle.lock().await;

        let mut next = record.clone();
        let lp: LpRecord = migration::migrate(&mut next.state, self.clock.as_ref())
            .map_err(|e| log_rejection(id, "migrate", e))?;

        self.store.persist(&next).await.map_err(|e| {
            error!("Failed to persist migration of sale {}: {}", id, e);
            ApiError::from(e)
        })?;
        *record = next;

        info!(
            "Migrated sale {} ({}): lp token_amount={}, reserve_amount={}",
            id, lp.token, lp.token_amount, lp.reserve_amount
        );

        Ok(MigrateResponse {
            lp,
            sale: summary(&record.state),
        })
    }
}
