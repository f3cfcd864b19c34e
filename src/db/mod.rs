pub use activities::*;
pub use admins::*;
pub use banners::*;
pub use document::*;
pub use financial::*;
pub use gallery::*;
pub use members::*;
pub use memory::*;
pub use pages::*;
pub use postgres::*;
pub use promotions::*;
pub use singletons::*;
pub use store::*;

mod activities;
mod admins;
mod banners;
mod document;
mod financial;
mod gallery;
mod members;
mod memory;
mod pages;
mod postgres;
mod promotions;
mod singletons;
mod store;
