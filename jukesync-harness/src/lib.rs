pub mod document;
pub mod error;
pub mod fake;
pub mod render;

pub use document::TestDocument;
pub use error::HarnessError;
pub use fake::{FakeAudioElement, FakeControl, FakeRefresh};
pub use render::{TemplateRenderer, BODY_FRAGMENT, HEAD_FRAGMENT};
