//! Database schema for order records

/// Tables are named from configuration, so only plain identifiers are allowed
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// SQL schema for initialization of `table` and its item table
pub fn schema_sql(table: &str) -> String {
    format!(
        r"
CREATE TABLE IF NOT EXISTS {table} (
    tracking_id TEXT PRIMARY KEY,
    customer_name TEXT,
    customer_email TEXT,
    customer_phone TEXT,
    delivery_status TEXT,
    carrier TEXT,
    estimated_date TEXT,
    order_date TEXT
);

CREATE TABLE IF NOT EXISTS {table}_items (
    tracking_id TEXT NOT NULL,
    position INTEGER NOT NULL,
    name TEXT NOT NULL,
    quantity INTEGER,
    vendor TEXT,

    PRIMARY KEY (tracking_id, position),
    FOREIGN KEY (tracking_id) REFERENCES {table}(tracking_id) ON DELETE CASCADE
);
"
    )
}
