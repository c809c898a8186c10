pub mod account;
pub mod comment;
pub mod review;
pub mod stats;
pub mod strategy;
pub mod submission;
