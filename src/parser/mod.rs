pub mod album;
pub mod links;
