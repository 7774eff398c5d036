pub mod builder;
pub mod dto;
pub mod errors;
pub mod ports;
pub mod reports;
pub mod use_cases;
pub mod validation;
