//! The Patron's Cup tournament: teams, the match schedule, score entry and
//! the derived standings.

pub mod matches;
pub mod scores;
pub mod stableford;
pub mod standings;
pub mod teams;
pub mod view;
