mod page;
pub use self::page::{SoldPage, SoldResponse};

mod property;
pub use self::property::{Address, Location, Position, Region, SoldProperty, Source};
