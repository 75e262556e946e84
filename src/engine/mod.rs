//! Game controller: owns a round, its timers and the best time.

pub mod controller;
pub mod snapshot;

pub use controller::MatchGame;
pub use snapshot::GameSnapshot;
