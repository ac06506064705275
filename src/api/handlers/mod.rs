mod health;
mod redirect;
mod shorten;
mod stats;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::create_alias_handler;
pub use stats::stats_handler;
