#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use shopping_trends::loader::{Table, Transaction};
use std::fs;
use std::path::{Path, PathBuf};

pub const TWO_ROW_CSV: &str = "\
Date,Product,Category,Price,Quantity,Total_Sales
2024-01-01,Laptop,Electronics,500,2,1000
2024-01-01,Shoes,Fashion,50,1,50
";

pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

pub fn tx(date: NaiveDateTime, product: &str, category: &str, price: f64, quantity: u32) -> Transaction {
    Transaction {
        date,
        product: product.to_string(),
        category: category.to_string(),
        price,
        quantity,
        total_sales: price * quantity as f64,
    }
}

pub fn two_row_table() -> Table {
    Table::new(vec![
        tx(at(2024, 1, 1, 0), "Laptop", "Electronics", 500.0, 2),
        tx(at(2024, 1, 1, 0), "Shoes", "Fashion", 50.0, 1),
    ])
}
