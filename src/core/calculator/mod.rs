pub mod chart;
pub mod hourly;
pub mod streak;
pub mod suggest;
pub mod window;
