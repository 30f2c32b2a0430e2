mod memory;
mod store;

pub use memory::InMemoryRevocationStore;
pub use store::RevocationStore;
