pub mod bonding_curve;
pub mod clock;
pub mod migration;
