pub mod list_store;
pub mod scheduler;
pub mod sync;

pub use list_store::ListStore;
pub use scheduler::Scheduler;
