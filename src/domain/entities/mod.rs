mod alias;
mod click;

pub use alias::{Alias, NewAlias};
pub use click::{ClickEvent, DIRECT_REFERRER, UNKNOWN_LOCATION};
