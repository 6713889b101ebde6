//! Replays a sequence of buys against a fresh sale and prints each quote.
//!
//! cargo run --bin curve_sim -- --symbol FENNEC --sale-supply 1000 --lp-supply 250 \
//!     --start-price 1 --slope 0.01 --buy 400 --buy 600 --migrate

use clap::Parser;
use token_sale_backend::models::SaleParams;
use token_sale_backend::utils::bonding_curve;
use token_sale_backend::utils::clock::SystemClock;
use token_sale_backend::utils::migration;

#[derive(Parser, Debug)]
#[command(name = "curve_sim", about = "Simulate buys along a linear bonding curve")]
struct Args {
    #[arg(long, default_value = "DEMO")]
    symbol: String,

    #[arg(long)]
    sale_supply: f64,

    #[arg(long)]
    lp_supply: f64,

    #[arg(long)]
    start_price: f64,

    #[arg(long)]
    slope: f64,

    /// Token amount to buy; repeat for several buys
    #[arg(long = "buy")]
    buys: Vec<f64>,

    /// Spend to convert into tokens at the final point on the curve
    #[arg(long)]
    budget: Option<f64>,

    /// Migrate once the buys are applied
    #[arg(long)]
    migrate: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let params = SaleParams {
        token_symbol: args.symbol,
        sale_supply: args.sale_supply,
        lp_supply: args.lp_supply,
        start_price: args.start_price,
        slope: args.slope,
    };

    let mut state = bonding_curve::create(&params, &SystemClock)?;
    println!(
        "{}: supply={} start_price={} slope={}",
        state.token_symbol, state.sale_supply, state.start_price, state.slope
    );

    for amount in args.buys {
        let q = bonding_curve::buy(&mut state, amount, &SystemClock)?;
        println!(
            "buy {:>12.4} cost={:>14.4} avg={:>10.6} price {:.6} -> {:.6} | sold={:.4} reserve={:.4}",
            q.amount_tokens, q.cost, q.avg_price, q.start_price, q.end_price, state.sold, state.reserve
        );
    }

    if let Some(budget) = args.budget {
        let tokens = bonding_curve::tokens_for_budget(&state, budget)?;
        println!("budget {:.4} buys {:.4} tokens at the current point", budget, tokens);
    }

    println!("can migrate: {}", migration::can_migrate(&state));
    if args.migrate {
        let lp = migration::migrate(&mut state, &SystemClock)?;
        println!("migrated: lp tokens={} reserve={:.4}", lp.token_amount, lp.reserve_amount);
    }

    Ok(())
}
