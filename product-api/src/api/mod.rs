pub mod docs;
pub mod products;
