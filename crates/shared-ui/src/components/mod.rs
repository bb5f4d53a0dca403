// Building blocks
pub mod badge;
pub mod button;
pub mod card;
pub mod page_header;
pub mod sheet;

// Navigation and shop widgets, built on the blocks above
pub mod bottom_nav;
pub mod mobile_nav;
pub mod nav_icon;
pub mod role_badge;
pub mod stat_card;

pub use badge::*;
pub use bottom_nav::*;
pub use button::*;
pub use card::*;
pub use mobile_nav::*;
pub use nav_icon::*;
pub use page_header::*;
pub use role_badge::*;
pub use sheet::*;
pub use stat_card::*;
