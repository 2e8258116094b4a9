//! Application Layer
//!
//! Drives the oracle clients on a timer and presents the results.

pub mod poller;
pub mod widget;

pub use poller::{PollEvent, PollState, Poller, SharedPollState, DEFAULT_POLL_INTERVAL};
pub use widget::{App, FeedStatus, WidgetView};
