pub mod grid;
pub mod nav_bar;
pub mod toast;
pub mod toc_overlay;
