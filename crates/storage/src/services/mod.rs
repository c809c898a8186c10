pub mod accounts;
pub mod authorization;
pub mod comments;
pub mod features;
pub mod rescoring;
pub mod review;
pub mod scoring;
pub mod stats;
pub mod strategy;
pub mod submissions;
