pub mod address;
pub mod duration;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod log_record;
pub mod log_viewer;
pub mod query;
pub mod regex_handler;
pub mod response;
pub mod server;

pub use handler::{Handler, HandlerChain};
pub use log_record::LogRecord;
pub use log_viewer::LogViewer;
pub use query::Query;
pub use response::Response;
