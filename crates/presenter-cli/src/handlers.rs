//! Command handlers
//!
//! One module per subcommand; [`utils`] holds the document loading they share.

mod completions;
mod config;
mod inspect;
mod transform;
mod utils;

pub use completions::handle_completions;
pub use config::handle_config;
pub use inspect::handle_inspect;
pub use transform::handle_transform;
