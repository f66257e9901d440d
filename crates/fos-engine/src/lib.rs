//! fOS Engine
//!
//! Hosts `<object>` elements: owns the document, its task queue and the
//! resource loader, and pumps loader completions back into tasks.
//!
//! # Example
//! ```rust,ignore
//! use fos_engine::{Config, Page};
//!
//! let mut page = Page::in_memory("https://example.com/", Config::default())?;
//! let object = page.create_object();
//! page.set_attribute(object, "data", "logo.png")?;
//! page.run_until_idle();
//! ```

mod config;
mod page;

pub use config::Config;
pub use page::{LayoutUpdate, Page};

// Re-export sub-crates for advanced usage
pub use fos_dom as dom;
pub use fos_html as html;
pub use fos_net as net;
pub use fos_render as render;

use fos_dom::{DomError, NodeId};
use tracing_subscriber::EnvFilter;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine-level errors
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("No object element with id {0:?}")]
    UnknownNode(NodeId),
}

/// Install the global `fmt` subscriber. `RUST_LOG` overrides `filter`.
/// Later calls are no-ops.
pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
