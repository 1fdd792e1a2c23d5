pub(crate) mod errors;
pub(crate) mod forms;
pub(crate) mod handlers;
pub(crate) mod request_tracing;
pub(crate) mod view;
