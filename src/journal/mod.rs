pub mod audit;
pub mod clock;
pub mod codec;
pub mod config;
pub mod dispatcher;
pub mod entry;
pub mod filename;
pub mod messages;
pub mod paths;
pub mod prompt;
pub mod session;
pub mod store;
pub mod timestamp;
pub mod util;
pub mod warn;
