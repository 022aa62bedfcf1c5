pub mod review;
pub mod word;

pub use review::ReviewCommands;
pub use word::WordCommands;
