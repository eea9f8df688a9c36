pub mod lists;
pub mod providers;
pub mod recommendations;
