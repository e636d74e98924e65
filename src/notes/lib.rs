//! # Staffingly Notes Architecture
//!
//! A small contact/notes pad: a form is filled in and saved into an ordered
//! collection, which can be listed, searched, edited, deleted and exported as CSV.
//! Everything is stored locally as a single JSON snapshot.
//!
//! Like any UI-agnostic core, the library knows nothing about terminals. The
//! `snotes` binary is one client; a GUI or web front end could drive the same API.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, print.rs)                     │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the collection, the form and the capabilities       │
//! │  - Returns structured `CmdResult`s                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - save, edit, view, list, delete, clear, export, config    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (collection.rs, form.rs, export.rs, prompt.rs)        │
//! │  Storage (store/): KeyValueStore, FileStore, InMemoryStore  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Capabilities
//!
//! The core never prompts, downloads or touches a particular storage medium
//! directly. Three traits stand in for the outside world:
//!
//! - [`store::KeyValueStore`]: `get(key)` / `set(key, bytes)` persistence
//! - [`prompt::UserPrompt`]: blocking yes/no confirmation
//! - [`export::FileExporter`]: delivery of a finished export file
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each operation
//! - [`collection`]: `NoteCollection`, id generation, clock
//! - [`form`]: `FormState`
//! - [`export`]: CSV rendering and exporters
//! - [`editor`]: Filling the form in `$EDITOR`
//! - [`config`]: Configuration management
//! - [`model`]: `Note`
//! - [`error`]: Error types

pub mod api;
pub mod collection;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod form;
pub mod model;
pub mod prompt;
pub mod store;
