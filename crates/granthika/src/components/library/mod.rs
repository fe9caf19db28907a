//! Library view: the uploaded-file collection and its rows.

mod file_card;
mod filter_bar;
mod library_view;
mod upload_card;

pub use library_view::LibraryView;
