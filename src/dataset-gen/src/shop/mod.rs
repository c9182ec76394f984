pub mod customers;
pub mod products;
pub mod scenario;
pub mod stores;
