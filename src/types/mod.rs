pub mod note;
pub mod note_methods;
pub mod store;
