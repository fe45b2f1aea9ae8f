pub mod bounty;
pub mod deadline_sweep;
pub mod dispatcher;
pub mod notification_log;
pub mod store;
pub mod submission;
