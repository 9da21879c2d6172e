pub mod check;
pub mod common;
pub mod config;
pub mod sync;
pub mod verify;

pub use check::Check;
pub use common::CommandOptions;
pub use config::Config;
pub use sync::Sync;
pub use verify::Verify;
