pub mod memory;
pub mod traits;

pub use memory::{MemoryMessageStore, MemoryStoreConfig};
pub use traits::{MessageStore, WriteOutcome};
