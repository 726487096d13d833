mod config;
mod hoister;

pub use config::{HeaderStyle, HoistConfig, ScopeMode};
pub use hoister::Hoister;
