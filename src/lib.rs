pub mod autotagger;
pub mod config;
pub mod models;
pub mod raindrop;
pub mod runner;

pub use autotagger::{CycleOutcome, TaggingWorkflow};
pub use config::{Config, ConfigError};
pub use models::{IgnoredTagSet, Item, ItemBuilder, ItemId};
pub use raindrop::{RaindropClient, RaindropClientBuilder, RaindropClientTrait, RaindropError};
pub use runner::CycleRunner;
