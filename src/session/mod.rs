pub mod controller;

pub use controller::{
    format_mmss, GuardChoice, PendingAction, SessionController, SessionEffect, SessionState,
};
