//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Timestamps are stored as fixed-width RFC 3339 text so
//! lexical order matches chronological order.

/// Pragmas applied to every new connection.
pub const CONNECTION_PRAGMAS: &str = r#"
PRAGMA foreign_keys = ON;
"#;

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Lists table
CREATE TABLE IF NOT EXISTS lists (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    created_date TEXT NOT NULL,
    updated_date TEXT
);

-- Items table
CREATE TABLE IF NOT EXISTS items (
    id TEXT PRIMARY KEY,
    list_id TEXT NOT NULL,
    name TEXT NOT NULL,
    description TEXT,
    state TEXT NOT NULL,
    due_date TEXT,
    completed_date TEXT,
    created_date TEXT NOT NULL,
    updated_date TEXT,
    FOREIGN KEY (list_id) REFERENCES lists(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_lists_created ON lists(created_date, id);
CREATE INDEX IF NOT EXISTS idx_items_list_created ON items(list_id, created_date, id);
CREATE INDEX IF NOT EXISTS idx_items_list_state ON items(list_id, state);
"#;

// List queries
pub const INSERT_LIST: &str = r#"
INSERT INTO lists (id, name, description, created_date, updated_date)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_LIST_BY_ID: &str = r#"
SELECT id, name, description, created_date, updated_date
FROM lists
WHERE id = ?1
"#;

/// `LIMIT -1` means no limit in SQLite.
pub const SELECT_LISTS_PAGE: &str = r#"
SELECT id, name, description, created_date, updated_date
FROM lists
ORDER BY created_date ASC, id ASC
LIMIT ?1 OFFSET ?2
"#;

pub const UPDATE_LIST: &str = r#"
UPDATE lists
SET name = ?2, description = ?3, updated_date = ?4
WHERE id = ?1
"#;

pub const DELETE_LIST: &str = r#"
DELETE FROM lists
WHERE id = ?1
"#;

// Item queries
pub const INSERT_ITEM: &str = r#"
INSERT INTO items (id, list_id, name, description, state, due_date, completed_date, created_date, updated_date)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

pub const SELECT_ITEM_BY_ID: &str = r#"
SELECT id, list_id, name, description, state, due_date, completed_date, created_date, updated_date
FROM items
WHERE list_id = ?1 AND id = ?2
"#;

/// A NULL state matches every item.
pub const SELECT_ITEMS_BY_LIST: &str = r#"
SELECT id, list_id, name, description, state, due_date, completed_date, created_date, updated_date
FROM items
WHERE list_id = ?1 AND (?2 IS NULL OR state = ?2)
ORDER BY created_date ASC, id ASC
LIMIT ?3 OFFSET ?4
"#;

pub const UPDATE_ITEM: &str = r#"
UPDATE items
SET name = ?3, description = ?4, state = ?5, due_date = ?6, completed_date = ?7, updated_date = ?8
WHERE list_id = ?1 AND id = ?2
"#;

pub const DELETE_ITEM: &str = r#"
DELETE FROM items
WHERE list_id = ?1 AND id = ?2
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS lists"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS items"));
        assert!(CREATE_TABLES.contains("ON DELETE CASCADE"));
    }

    #[test]
    fn test_foreign_keys_enabled() {
        assert!(CONNECTION_PRAGMAS.contains("foreign_keys = ON"));
    }

    #[test]
    fn test_item_queries_are_scoped_to_list() {
        for query in [SELECT_ITEM_BY_ID, UPDATE_ITEM, DELETE_ITEM] {
            assert!(query.contains("list_id = ?1 AND id = ?2"));
        }
        assert!(SELECT_ITEMS_BY_LIST.contains("ORDER BY created_date ASC, id ASC"));
    }
}
