//! Pure computation engines for partner economics.
//!
//! Everything here is synchronous, deterministic, and free of shared state;
//! handlers call in with records read from the repository.

pub mod commission;
pub mod forecast;
pub mod nudge;
pub mod rates;

pub use commission::{quote, Quote, QuoteError, QuoteRequest};
pub use forecast::{project, Forecast};
pub use nudge::{generate, Nudge, NudgePriority};
pub use rates::{
    base_rate, forecast_multiplier, service_partner_incentive, stage_probability, RateSchedule,
};
