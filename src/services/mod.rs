pub mod activity;
pub mod assistant;
pub mod crm;
pub mod session;
pub mod validation;
