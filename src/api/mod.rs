//! HTTP edge: menu-tree fetch and image preloading.

pub mod client;

pub use client::{FetchError, ImageInfo, fetch_menu_tree, preload_image};
