mod progress;
mod publisher;
mod session;
mod view;
mod workflow;

pub use crate::error::{ResultError, TestFlowError};
pub use progress::TestProgress;
pub use publisher::ResultPublisher;
pub use session::TestSession;
pub use view::ResultReader;
pub use workflow::{FlowStep, TestFlowService};
