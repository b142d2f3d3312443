pub mod country;
pub mod country_customer;
pub mod customer;
pub mod order;
pub mod order_item;
pub mod order_item_review;
