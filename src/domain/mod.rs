pub mod click_worker;
pub mod entities;
pub mod repositories;
pub mod visit_event;
