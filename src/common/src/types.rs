pub const MONEY_SCALE: u32 = 2;

pub const CUSTOMERS_FILE: &str = "Customers.csv";
pub const PRODUCTS_FILE: &str = "Products.csv";
pub const STORES_FILE: &str = "Stores.csv";
pub const ORDERS_FILE: &str = "Orders.csv";
pub const ORDER_DETAILS_FILE: &str = "OrderDetails.csv";

pub const CUSTOMERS_HEADER: [&str; 3] = ["CustomerId", "LevelOfDiscount", "RegistrationDate"];
pub const PRODUCTS_HEADER: [&str; 4] = ["ProductId", "ProductName", "ProductCategory", "Price"];
pub const STORES_HEADER: [&str; 7] = [
    "StoreId",
    "StoreName",
    "District",
    "City",
    "Address",
    "Latitude",
    "Longitude",
];
pub const ORDERS_HEADER: [&str; 9] = [
    "OrderId",
    "OrderDate",
    "OrderType",
    "CustomerId",
    "StoreId",
    "SubTotal",
    "TotalAmount",
    "DiscountApplied",
    "DiscountAmount",
];
pub const ORDER_DETAILS_HEADER: [&str; 4] = ["OrderDetailId", "OrderId", "ProductId", "Quantity"];

/// CSV file to warehouse table mapping, in load order.
pub const WAREHOUSE_TABLES: [(&str, &str); 5] = [
    (CUSTOMERS_FILE, "customers"),
    (ORDERS_FILE, "orders"),
    (PRODUCTS_FILE, "products"),
    (ORDER_DETAILS_FILE, "order_details"),
    (STORES_FILE, "stores"),
];
