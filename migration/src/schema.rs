use sea_orm::DbBackend;
use sea_orm_migration::prelude::*;

use crate::MigrationError;

/// Storage type of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Bounded `varchar` when `len` is set, unbounded text otherwise
    /// (`longtext` on MySQL, where `text` stops at 64 KiB).
    String { len: Option<u32> },
    Integer,
    BigInteger,
    Double,
    Boolean,
    Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldShape {
    pub name: &'static str,
    pub kind: FieldKind,
    /// `None` declares a nullable column. Required columns need a default
    /// so rows that predate them stay valid.
    pub default: Option<Value>,
}

/// The columns a migration expects an existing table to have.
#[derive(Debug, Clone, PartialEq)]
pub struct TableShape {
    pub table: &'static str,
    pub fields: Vec<FieldShape>,
}

impl FieldShape {
    pub fn nullable(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            default: None,
        }
    }

    pub fn required<V: Into<Value>>(name: &'static str, kind: FieldKind, default: V) -> Self {
        Self {
            name,
            kind,
            default: Some(default.into()),
        }
    }

    pub fn is_nullable(&self) -> bool {
        self.default.is_none()
    }

    pub fn column_def(&self, backend: DbBackend) -> ColumnDef {
        let mut def = ColumnDef::new(Alias::new(self.name));
        match self.kind {
            FieldKind::String { len: None } if backend == DbBackend::MySql => {
                def.custom(Alias::new("longtext"))
            }
            FieldKind::String { len: None } => def.text(),
            FieldKind::String { len: Some(len) } => def.string_len(len),
            FieldKind::Integer => def.integer(),
            FieldKind::BigInteger => def.big_integer(),
            FieldKind::Double => def.double(),
            FieldKind::Boolean => def.boolean(),
            FieldKind::Timestamp => def.timestamp_with_time_zone(),
        };
        match &self.default {
            None => def.null(),
            Some(value) => def.not_null().default(value.clone()),
        };
        def
    }
}

impl TableShape {
    pub fn new(table: &'static str, fields: Vec<FieldShape>) -> Self {
        Self { table, fields }
    }

    pub fn alter_statement(&self, field: &FieldShape, backend: DbBackend) -> TableAlterStatement {
        Table::alter()
            .table(Alias::new(self.table))
            .add_column(&mut field.column_def(backend))
            .to_owned()
    }
}

/// Brings existing tables in line with `shapes` by adding missing columns.
///
/// Columns that already exist are left untouched, whatever their current
/// definition, so running this twice is a no-op. Tables are never created:
/// a missing table is reported as [`MigrationError::MissingTable`]. The first
/// failing statement aborts the whole call.
pub async fn auto_migrate(
    manager: &SchemaManager<'_>,
    shapes: &[TableShape],
) -> Result<(), MigrationError> {
    let backend = manager.get_database_backend();
    for shape in shapes {
        if !manager.has_table(shape.table).await? {
            return Err(MigrationError::MissingTable(shape.table.to_owned()));
        }
        for field in shape.fields.iter() {
            if manager.has_column(shape.table, field.name).await? {
                tracing::debug! {table = %shape.table, column = %field.name, "Column already present"};
                continue;
            }
            tracing::info! {table = %shape.table, column = %field.name, kind = ?field.kind, "Adding column"};
            manager
                .alter_table(shape.alter_statement(field, backend))
                .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(shape: &TableShape, field: &FieldShape) -> String {
        shape
            .alter_statement(field, DbBackend::Sqlite)
            .to_string(SqliteQueryBuilder)
            .to_lowercase()
    }

    #[test]
    fn unbounded_string_is_nullable_text() {
        let field = FieldShape::nullable("commit_msg", FieldKind::String { len: None });
        let shape = TableShape::new("cicd_deployment_commits", vec![field.clone()]);
        assert!(field.is_nullable());
        let sql = render(&shape, &field);
        assert!(sql.starts_with("alter table \"cicd_deployment_commits\" add column"));
        assert!(sql.contains("\"commit_msg\" text"));
        assert!(!sql.contains("not null"));
    }

    #[test]
    fn unbounded_string_is_longtext_on_mysql() {
        let field = FieldShape::nullable("commit_msg", FieldKind::String { len: None });
        let shape = TableShape::new("cicd_deployment_commits", vec![field.clone()]);
        let sql = shape
            .alter_statement(&field, DbBackend::MySql)
            .to_string(MysqlQueryBuilder)
            .to_lowercase();
        assert!(sql.contains("`commit_msg` longtext"));
    }

    #[test]
    fn unbounded_string_is_text_on_postgres() {
        let field = FieldShape::nullable("commit_msg", FieldKind::String { len: None });
        let shape = TableShape::new("cicd_deployment_commits", vec![field.clone()]);
        let sql = shape
            .alter_statement(&field, DbBackend::Postgres)
            .to_string(PostgresQueryBuilder)
            .to_lowercase();
        assert!(sql.contains("\"commit_msg\" text"));
    }

    #[test]
    fn bounded_string_is_varchar() {
        let field = FieldShape::nullable("ref_name", FieldKind::String { len: Some(255) });
        let shape = TableShape::new("cicd_deployment_commits", vec![field.clone()]);
        assert!(render(&shape, &field).contains("(255)"));
    }

    #[test]
    fn required_fields_carry_a_default() {
        let field = FieldShape::required("attempts", FieldKind::Integer, 0);
        let shape = TableShape::new("cicd_deployment_commits", vec![field.clone()]);
        let sql = render(&shape, &field);
        assert!(sql.contains("not null"));
        assert!(sql.contains("default 0"));
    }
}
