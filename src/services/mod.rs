pub mod cart;
pub mod notification;
pub mod page;
pub mod shop;
pub mod storage;
pub mod wishlist;
