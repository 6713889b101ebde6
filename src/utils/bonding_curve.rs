use crate::models::{Quote, SaleError, SaleParams, SaleState};
use crate::utils::clock::Clock;

/// Linear price curve: price = base_price + slope * tokens_sold
#[derive(Debug, Clone, Copy)]
pub struct BondingCurve {
    pub base_price: f64,
    pub slope: f64,
}

impl BondingCurve {
    pub fn from_state(state: &SaleState) -> Self {
        Self {
            base_price: state.start_price,
            slope: state.slope,
        }
    }

    pub fn calculate_price(&self, tokens_sold: f64) -> f64 {
        self.base_price + (self.slope * tokens_sold)
    }

    /// Integral of the price function from `current_tokens_sold` to `current_tokens_sold + tokens`.
    pub fn calculate_cost(&self, tokens: f64, current_tokens_sold: f64) -> f64 {
        self.base_price * tokens + self.slope * (current_tokens_sold * tokens + tokens * tokens / 2.0)
    }

    /// Inverse of `calculate_cost`: how many tokens `amount` buys from `current_tokens_sold`.
    pub fn calculate_tokens_for_amount(&self, amount: f64, current_tokens_sold: f64) -> f64 {
        // Positive root of (slope/2)x² + p0·x − amount = 0, in the form that stays
        // finite when slope is zero
        let current_price = self.calculate_price(current_tokens_sold);
        let discriminant = current_price * current_price + 2.0 * self.slope * amount;
        if discriminant < 0.0 {
            return 0.0;
        }

        let tokens = 2.0 * amount / (current_price + discriminant.sqrt());

        log::debug!("Bonding curve calc: amount={}, current_tokens={}, current_price={}, result={} tokens",
                  amount, current_tokens_sold, current_price, tokens);

        tokens
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), SaleError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SaleError::Validation(format!("{} must be a finite number greater than 0", name)));
    }
    Ok(())
}

pub fn create(params: &SaleParams, clock: &dyn Clock) -> Result<SaleState, SaleError> {
    let token_symbol = params.token_symbol.trim().to_uppercase();
    if token_symbol.is_empty() {
        return Err(SaleError::Validation("token_symbol is required".to_string()));
    }

    require_positive("sale_supply", params.sale_supply)?;
    require_positive("lp_supply", params.lp_supply)?;
    require_positive("start_price", params.start_price)?;
    if !params.slope.is_finite() || params.slope < 0.0 {
        return Err(SaleError::Validation("slope must be a finite number >= 0".to_string()));
    }

    // Selling the whole curve must stay within f64 range
    let curve = BondingCurve { base_price: params.start_price, slope: params.slope };
    let full_cost = curve.calculate_cost(params.sale_supply, 0.0);
    if !full_cost.is_finite() || !curve.calculate_price(params.sale_supply).is_finite() {
        return Err(SaleError::Validation("curve parameters overflow the representable price range".to_string()));
    }

    let now = clock.now();
    Ok(SaleState {
        token_symbol,
        sale_supply: params.sale_supply,
        lp_supply: params.lp_supply,
        start_price: params.start_price,
        slope: params.slope,
        sold: 0.0,
        reserve: 0.0,
        migrated: false,
        lp: None,
        created_at: now,
        updated_at: now,
    })
}

/// Spot price once `sold` tokens have been bought.
pub fn price_at(state: &SaleState, sold: f64) -> f64 {
    BondingCurve::from_state(state).calculate_price(sold)
}

pub fn quote(state: &SaleState, amount_tokens: f64) -> Result<Quote, SaleError> {
    require_positive("amount_tokens", amount_tokens)?;
    if state.migrated {
        return Err(SaleError::State("sale migrated".to_string()));
    }
    if state.sold + amount_tokens > state.sale_supply {
        return Err(SaleError::Capacity("insufficient sale supply".to_string()));
    }

    let curve = BondingCurve::from_state(state);
    let cost = curve.calculate_cost(amount_tokens, state.sold);

    let quoted = Quote {
        amount_tokens,
        cost,
        avg_price: cost / amount_tokens,
        start_price: curve.calculate_price(state.sold),
        end_price: curve.calculate_price(state.sold + amount_tokens),
    };
    let figures = [quoted.cost, quoted.avg_price, quoted.start_price, quoted.end_price];
    if figures.iter().any(|v| !v.is_finite()) {
        return Err(SaleError::Validation("amount_tokens prices outside the representable range".to_string()));
    }

    Ok(quoted)
}

/// Applies a fresh quote for `amount_tokens` to `state`. On error the state is untouched.
pub fn buy(state: &mut SaleState, amount_tokens: f64, clock: &dyn Clock) -> Result<Quote, SaleError> {
    let applied = quote(state, amount_tokens)?;
    if !(state.reserve + applied.cost).is_finite() {
        return Err(SaleError::Validation("reserve would overflow the representable range".to_string()));
    }

    state.sold += applied.amount_tokens;
    state.reserve += applied.cost;
    state.updated_at = clock.now();

    Ok(applied)
}

/// Tokens a spend of `budget` buys at the current point, capped at the remaining supply.
pub fn tokens_for_budget(state: &SaleState, budget: f64) -> Result<f64, SaleError> {
    require_positive("budget", budget)?;
    if state.migrated {
        return Err(SaleError::State("sale migrated".to_string()));
    }

    let tokens = BondingCurve::from_state(state).calculate_tokens_for_amount(budget, state.sold);
    if !tokens.is_finite() {
        return Err(SaleError::Validation("budget is outside the representable range".to_string()));
    }
    Ok(tokens.min(state.remaining()))
}
