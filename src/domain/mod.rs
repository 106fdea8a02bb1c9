pub mod capture;
pub mod errors;
pub mod logging;
pub mod market_data;
pub mod theme;
pub mod trading;
