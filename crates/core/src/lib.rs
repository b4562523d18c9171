//! Domain types shared by the binary, the storage layer and the C ABI.
pub mod greeter;
pub mod record;

pub use greeter::Greeter;
pub use record::GreetingRecord;
