pub use auth::*;
pub use finance::*;
pub use media::*;
pub use members::*;
pub use pages::*;
pub use registration::*;

mod auth;
mod finance;
mod media;
mod members;
mod pages;
mod registration;
