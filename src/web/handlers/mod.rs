pub mod metadata;
pub mod pages;
