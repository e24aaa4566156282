pub mod post;
pub mod state;

pub use post::{Post, PostCollection};
pub use state::{ErrorCategory, RenderState};
