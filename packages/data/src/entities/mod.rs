pub mod items;

pub use items::Entity as Items;
pub use items::Model as Item;
