mod error;
mod io;
mod report;
mod tracker;


pub use error::{Result, WorkflowError};
pub use io::{load_report, save_report};
pub use report::{WorkflowReport, WorkflowStep};
pub use tracker::WorkflowLog;
