pub mod accounts;
pub mod review;
pub mod stats;
pub mod strategy;
pub mod submissions;
