//! Decision engines (spec §4.8): each is `Decide(Context) -> Decision`, a
//! pure function of a [`GameContext`](crate::game::context::GameContext),
//! coaching tendencies, and the random source. Mechanics (play executors,
//! rule actions) are invoked downstream of whatever is decided here.

pub mod conversion;
pub mod fair_catch;
pub mod fourth_down;
pub mod onside;
pub mod penalty_accept;
pub mod play_call;
pub mod timeout;
