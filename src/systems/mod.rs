mod bookkeeping;
mod economy;
mod pollution;
mod schedule;
mod weather;

pub use bookkeeping::BookkeepingSystem;
pub use economy::EconomySystem;
pub use pollution::PollutionSystem;
pub use schedule::ScheduleSystem;
pub use weather::WeatherSystem;
