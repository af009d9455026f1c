pub mod clock;
pub mod config;
pub mod lookup;
pub mod resolve;
pub mod scan;
pub mod warn;
