//! Schema-related data models.
//!
//! Descriptors are built from catalog rows, rendered once, and dropped.

/// A base table as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub name: String,
    /// Empty when the table has no comment
    pub comment: String,
}

impl TableDescriptor {
    /// Create a table descriptor without a comment.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
        }
    }

    /// Set the table comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Section title: the table name, or `name (comment)` when a comment is set.
    pub fn header(&self) -> String {
        if self.comment.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.comment)
        }
    }
}

/// A column of one table as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// 1-based position within the table
    pub ordinal_position: u32,
    pub name: String,
    /// Raw catalog type expression, e.g. `varchar(255)`
    pub column_type: String,
    /// Raw catalog flag, "YES" or "NO"
    pub is_nullable: String,
    /// Empty when the column has no comment
    pub comment: String,
}

impl ColumnDescriptor {
    /// Create a column descriptor without a comment.
    pub fn new(
        ordinal_position: u32,
        name: impl Into<String>,
        column_type: impl Into<String>,
        is_nullable: impl Into<String>,
    ) -> Self {
        Self {
            ordinal_position,
            name: name.into(),
            column_type: column_type.into(),
            is_nullable: is_nullable.into(),
            comment: String::new(),
        }
    }

    /// Set the column comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}
