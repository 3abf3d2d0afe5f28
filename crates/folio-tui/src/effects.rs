//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer only mutates state and returns effects; it never touches the
//! terminal, the clipboard, or the system opener itself.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Open a link with the system opener (browser or mail client).
    OpenLink { url: String },

    /// Read the system clipboard and feed it back as a paste.
    ReadClipboard,
}
