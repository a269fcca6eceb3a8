pub mod event_form;
pub mod help;
pub mod link_panel;
pub mod provider_picker;
pub mod status_bar;

pub use event_form::EventForm;
pub use link_panel::LinkPanel;
pub use provider_picker::ProviderPicker;
pub use status_bar::StatusBar;
