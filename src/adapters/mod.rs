//! Port implementations: live platform access plus record/replay decorators.

pub mod live;
pub mod recording;
pub mod replaying;
