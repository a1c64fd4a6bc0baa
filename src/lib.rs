pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod seed;

pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{
    ActivityEntry, Commission, CommissionDetails, CommissionId, CommissionStatus, Decimal,
    Partner, PartnerId, PartnerRole, Platform, Product, Referral, ReferralId, Stage, TimeMs,
    Vertical, DAY_MS,
};
pub use error::AppError;
