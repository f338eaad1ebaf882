pub mod hashing;
pub mod scorer;

pub use hashing::*;
pub use scorer::*;
