pub mod logger;
pub mod time_utils;
pub mod watch_stream;
