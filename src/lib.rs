//! Scorekeeping core for doubles (and singles) rally matches.
//!
//! This crate owns the match state machine: scores, who stands in which service
//! court, who serves next, win detection, and bounded undo. It has no knowledge
//! of how the match is displayed. A host layer (browser widget, terminal,
//! test harness) implements [`view::View`], feeds discrete user actions into a
//! [`controller::MatchController`], and redraws from the plain-data
//! [`view::RenderState`] it receives after every successful mutation.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Action surface, history bookkeeping, render dispatch |
//! | [`state`] | Teams, sides, court slots, and the mutable match state |
//! | [`rotation`] | Positional serving: current server and court swaps |
//! | [`win`] | Pure win evaluation (21 points, win by 2, cap at 30) |
//! | [`history`] | Bounded snapshot stack for undo |
//! | [`view`] | Render payload and the `View` callback trait |
//! | [`config`] | Match setup defaults and environment overrides |
//! | [`consts`] | Rule constants and default identities |

pub mod config;
pub mod consts;
pub mod controller;
pub mod history;
pub mod rotation;
pub mod state;
pub mod view;
pub mod win;
