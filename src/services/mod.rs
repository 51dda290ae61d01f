pub mod films;
pub mod providers;
pub mod sync;
pub mod users;
