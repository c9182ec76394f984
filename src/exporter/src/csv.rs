use std::fs;
use std::path::Path;
use std::path::PathBuf;

use common::types::CUSTOMERS_FILE;
use common::types::CUSTOMERS_HEADER;
use common::types::ORDERS_FILE;
use common::types::ORDERS_HEADER;
use common::types::ORDER_DETAILS_FILE;
use common::types::ORDER_DETAILS_HEADER;
use common::types::PRODUCTS_FILE;
use common::types::PRODUCTS_HEADER;
use common::types::STORES_FILE;
use common::types::STORES_HEADER;
use csv::WriterBuilder;
use dataset_gen::Dataset;
use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// Writes the five tables into `dir`, creating it if needed. Returns the
/// written file paths. Header rows are always present, even for empty tables.
pub fn write_dataset(dataset: &Dataset, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    Ok(vec![
        write_table(dir, CUSTOMERS_FILE, &CUSTOMERS_HEADER, &dataset.customers)?,
        write_table(dir, PRODUCTS_FILE, &PRODUCTS_HEADER, &dataset.products)?,
        write_table(dir, STORES_FILE, &STORES_HEADER, &dataset.stores)?,
        write_table(dir, ORDERS_FILE, &ORDERS_HEADER, &dataset.orders)?,
        write_table(
            dir,
            ORDER_DETAILS_FILE,
            &ORDER_DETAILS_HEADER,
            &dataset.order_details,
        )?,
    ])
}

fn write_table<T: Serialize>(dir: &Path, file: &str, header: &[&str], rows: &[T]) -> Result<PathBuf> {
    let path = dir.join(file);
    // the header is written by hand so empty tables still get one
    let mut wtr = WriterBuilder::new().has_headers(false).from_path(&path)?;
    wtr.write_record(header)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    info!("saved {} ({} rows)", path.display(), rows.len());

    Ok(path)
}
