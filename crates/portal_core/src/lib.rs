//! Session controller for the maintainer portal: wires visitor commands to
//! the README and permission flows and drives whatever page surface hosts it.

pub mod controller;
pub mod fragments;
pub mod surface;

pub use controller::{
    events::{CommandOutcome, LoginOutcome, UiCommand},
    session::SessionController,
};
pub use fragments::{FragmentEngine, FragmentError, HttpFragmentEngine, NoopFragmentEngine};
pub use surface::{validate_page, ElementRole, PageModel, PageSnapshot, PageSurface};
