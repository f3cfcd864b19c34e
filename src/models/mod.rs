pub use activity::*;
pub use admin::*;
pub use banner::*;
pub use custom_page::*;
pub use financial::*;
pub use gallery::*;
pub use history::*;
pub use member::*;
pub use member_status::*;
pub use member_type::*;
pub use promotion::*;
pub use settings::*;

mod activity;
mod admin;
mod banner;
mod custom_page;
mod financial;
mod gallery;
mod history;
mod member;
mod member_status;
mod member_type;
mod promotion;
mod settings;
