use crate::models::{LpRecord, SaleError, SaleState};
use crate::utils::clock::Clock;

/// True once the curve is fully subscribed and the sale has not yet moved to the pool.
pub fn can_migrate(state: &SaleState) -> bool {
    !state.migrated && state.sold >= state.sale_supply
}

/// Moves the whole reserve into a new pool record and closes the sale.
/// Either every field changes or, on error, none do.
pub fn migrate(state: &mut SaleState, clock: &dyn Clock) -> Result<LpRecord, SaleError> {
    if !can_migrate(state) {
        let reason = if state.migrated {
            "cannot migrate: sale already migrated"
        } else {
            "cannot migrate: sale not fully subscribed"
        };
        return Err(SaleError::State(reason.to_string()));
    }

    let now = clock.now();
    let lp = LpRecord {
        token: state.token_symbol.clone(),
        token_amount: state.lp_supply,
        reserve_amount: state.reserve,
        created_at: now,
    };

    state.lp = Some(lp.clone());
    state.reserve = 0.0;
    state.migrated = true;
    state.updated_at = now;

    Ok(lp)
}
