//! Database module for SwiftLine fulfillment
//!
//! Provides the SQLite-backed order table the service reads from.

mod schema;

use schema::{is_valid_table_name, schema_sql};

use crate::orders::{Customer, Delivery, OrderDetails, OrderItem, OrderRecord};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid table name: {0}")]
    InvalidTableName(String),
    #[error("Order {tracking_id} is corrupt: {reason}")]
    CorruptRecord { tracking_id: String, reason: String },
    #[error("Failed to read seed file: {0}")]
    SeedIo(#[from] std::io::Error),
    #[error("Seed file is not a list of orders: {0}")]
    SeedFormat(#[from] serde_json::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    table: String,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P, table: &str) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn, table)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory(table: &str) -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, table)
    }

    fn with_connection(conn: Connection, table: &str) -> DbResult<Self> {
        if !is_valid_table_name(table) {
            return Err(DbError::InvalidTableName(table.to_string()));
        }
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            table: table.to_string(),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(&schema_sql(&self.table))?;
        Ok(())
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    // ==================== Order Operations ====================

    /// Point read of an order by its exact tracking id
    pub fn get_order(&self, tracking_id: &str) -> DbResult<Option<OrderRecord>> {
        let conn = self.conn.lock().unwrap();
        let table = &self.table;

        let order = conn
            .query_row(
                &format!(
                    "SELECT tracking_id, customer_name, customer_email, customer_phone,
                            delivery_status, carrier, estimated_date, order_date
                     FROM {table} WHERE tracking_id = ?1"
                ),
                params![tracking_id],
                |row| {
                    Ok(OrderRecord {
                        tracking_id: row.get(0)?,
                        customer: Customer {
                            name: row.get(1)?,
                            email: row.get(2)?,
                            phone: row.get(3)?,
                        },
                        delivery: Delivery {
                            status: row.get(4)?,
                            carrier: row.get(5)?,
                            estimated_date: row.get(6)?,
                        },
                        order_details: OrderDetails::default(),
                        order_date: row.get(7)?,
                    })
                },
            )
            .optional()
            .map_err(|e| match e {
                rusqlite::Error::FromSqlConversionFailure(..)
                | rusqlite::Error::InvalidColumnType(..)
                | rusqlite::Error::IntegralValueOutOfRange(..) => DbError::CorruptRecord {
                    tracking_id: tracking_id.to_string(),
                    reason: e.to_string(),
                },
                other => DbError::Sqlite(other),
            })?;

        let Some(mut order) = order else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(&format!(
            "SELECT name, quantity, vendor FROM {table}_items
             WHERE tracking_id = ?1 ORDER BY position"
        ))?;
        let items = stmt
            .query_map(params![tracking_id], |row| {
                Ok(OrderItem {
                    name: row.get(0)?,
                    quantity: row.get(1)?,
                    vendor: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::CorruptRecord {
                tracking_id: tracking_id.to_string(),
                reason: e.to_string(),
            })?;
        order.order_details.items = items;

        Ok(Some(order))
    }

    /// Insert or replace an order and its items
    pub fn put_order(&self, order: &OrderRecord) -> DbResult<()> {
        let mut conn = self.conn.lock().unwrap();
        let table = &self.table;
        let tx = conn.transaction()?;

        tx.execute(
            &format!("DELETE FROM {table}_items WHERE tracking_id = ?1"),
            params![order.tracking_id],
        )?;
        tx.execute(
            &format!(
                "INSERT OR REPLACE INTO {table} (tracking_id, customer_name, customer_email, customer_phone,
                                                 delivery_status, carrier, estimated_date, order_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
            ),
            params![
                order.tracking_id,
                order.customer.name,
                order.customer.email,
                order.customer.phone,
                order.delivery.status,
                order.delivery.carrier,
                order.delivery.estimated_date,
                order.order_date,
            ],
        )?;

        for (position, item) in order.order_details.items.iter().enumerate() {
            tx.execute(
                &format!(
                    "INSERT INTO {table}_items (tracking_id, position, name, quantity, vendor)
                     VALUES (?1, ?2, ?3, ?4, ?5)"
                ),
                params![
                    order.tracking_id,
                    i64::try_from(position).unwrap_or(i64::MAX),
                    item.name,
                    item.quantity,
                    item.vendor,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Number of orders in the table
    pub fn order_count(&self) -> DbResult<u64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.table),
            [],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Load a JSON array of order records, replacing any with the same id.
    /// Returns how many were written.
    pub fn load_seed_file<P: AsRef<Path>>(&self, path: P) -> DbResult<usize> {
        let data = std::fs::read_to_string(path)?;
        let orders: Vec<OrderRecord> = serde_json::from_str(&data)?;
        for order in &orders {
            self.put_order(order)?;
        }
        Ok(orders.len())
    }
}
