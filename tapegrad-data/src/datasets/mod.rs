pub mod in_memory;
pub mod traits;

pub use in_memory::InMemoryDataset;
pub use traits::{Dataset, Sample};
