pub mod draft;
pub mod event;
pub mod link;
pub mod provider;
pub mod validate;

pub use draft::{Edit, EventDraft, Field, DESCRIPTION_MAX_CHARS};
pub use event::ValidatedEvent;
pub use link::GeneratedLink;
pub use provider::Provider;
pub use validate::{validate, FieldErrors};
