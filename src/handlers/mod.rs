pub mod health;
pub mod history;
pub mod search;
pub mod sources;

pub use health::*;
pub use history::*;
pub use search::*;
pub use sources::*;
