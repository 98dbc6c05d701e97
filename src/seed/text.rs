use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoremKind {
    Sentence,
    Paragraph,
}

/// Random lorem text; no guarantees about content beyond being non-empty
pub fn fake_text<R: Rng + ?Sized>(kind: LoremKind, rng: &mut R) -> String {
    match kind {
        LoremKind::Sentence => Sentence(4..10).fake_with_rng(rng),
        LoremKind::Paragraph => Paragraph(3..6).fake_with_rng(rng),
    }
}

pub const TABLE_NAMES: [&str; 6] = ["warehouse", "customer", "order", "item", "stock", "history"];

/// Title and statement of a sample schema change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaChange {
    pub title: String,
    pub sql: String,
}

impl SchemaChange {
    fn new(title: String, sql: String) -> Self {
        Self { title, sql }
    }
}

/// Every schema change template applied to one table
pub fn schema_changes(table: &str) -> Vec<SchemaChange> {
    vec![
        SchemaChange::new(
            format!("Create table {}", table),
            format!(
                "CREATE TABLE {} (\n  id INT NOT NULL,\n  name TEXT,\n  age INT,\n  PRIMARY KEY (name)\n);",
                table
            ),
        ),
        SchemaChange::new(
            format!("Add index to {}", table),
            format!("CREATE INDEX {0}_idx\nON {0} (name);", table),
        ),
        SchemaChange::new(
            format!("Drop index from {}", table),
            format!("ALTER TABLE {0}\nDROP INDEX {0}_idx;", table),
        ),
        SchemaChange::new(
            format!("Add column to {}", table),
            format!("ALTER TABLE {}\nADD email VARCHAR(255);", table),
        ),
        SchemaChange::new(
            format!("Drop column from {}", table),
            format!("ALTER TABLE {}\nDROP COLUMN email;", table),
        ),
        SchemaChange::new(
            format!("Alter column to {}", table),
            format!("ALTER TABLE {}\nMODIFY COLUMN email TEXT;", table),
        ),
        SchemaChange::new(
            format!("Add foreign key to {}", table),
            format!(
                "ALTER TABLE {0}\nADD CONSTRAINT FK_{0}\nFOREIGN KEY (id) REFERENCES {0}(ID);",
                table
            ),
        ),
        SchemaChange::new(
            format!("Drop foreign key from {}", table),
            format!("ALTER TABLE {0}\nDROP FOREIGN KEY FK_{0};", table),
        ),
    ]
}

/// A random schema change on a random sample table
pub fn random_schema_change<R: Rng + ?Sized>(rng: &mut R) -> SchemaChange {
    let table = TABLE_NAMES.choose(rng).copied().unwrap_or(TABLE_NAMES[0]);
    let mut changes = schema_changes(table);
    let index = rng.gen_range(0..changes.len());
    changes.swap_remove(index)
}
