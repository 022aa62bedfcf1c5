pub mod answer;
pub mod dispatch;
pub mod maintain;
pub mod quiz;
pub mod review;
pub mod serve;
pub mod stats;
pub mod sweep;
pub mod word;
