//! HTML pages assembled from loaded articles.
//!
//! | Page          | Route               | Builder                 |
//! |---------------|---------------------|-------------------------|
//! | Article       | `/academy/{slug}`   | [`render_article_page`] |
//! | Index         | `/academy`          | [`render_index_page`]   |
//! | Load failure  | any article route   | [`render_error_page`]   |
//!
//! Every page is wrapped in the same layout shell.

mod article;
mod index;
mod layout;
mod share;
mod toc;

pub use article::{render_article_page, render_card, render_error_page};
pub use index::render_index_page;
pub use share::ShareLinks;
pub use toc::{format_toc_text, render_toc};
