pub mod geoip;
pub mod log_ship;
pub mod persistence;
