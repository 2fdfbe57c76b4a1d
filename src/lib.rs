pub mod api;
pub mod config;
pub mod directories;
pub mod errors;
pub mod plan;
pub mod preview;
pub mod seeder;
mod utils;

pub use api::{load_config, plan, scaffold, ScaffoldError, Summary};
pub use config::ScaffoldConfig;
