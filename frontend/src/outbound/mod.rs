//! Outbound adapters implementing domain ports.
//!
//! - **http**: reqwest transport carrying credentialed API calls
//! - **cookies**: in-memory jar and a jar over the transport's cookie store
//! - **navigation**: recording navigator for headless hosts and tests
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod cookies;
pub mod http;
pub mod navigation;

pub use cookies::{MemoryCookieJar, ReqwestCookieJar};
pub use http::ReqwestTransport;
pub use navigation::HistoryNavigator;
