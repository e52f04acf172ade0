mod elements;
mod vehicles;

// Re-export test fixtures
pub use elements::*;
pub use vehicles::*;
