pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_principals;
mod m20250301_000002_create_registry_records;
mod m20250301_000003_create_publications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_principals::Migration),
            Box::new(m20250301_000002_create_registry_records::Migration),
            Box::new(m20250301_000003_create_publications::Migration),
        ]
    }
}
