//! Database migrations for the marketplace service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_addresses::Migration),
            Box::new(m20250301_000002_create_sectors::Migration),
            Box::new(m20250301_000003_create_parties::Migration),
            Box::new(m20250301_000004_create_jobs::Migration),
            Box::new(m20250301_000005_create_applications::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum Addresses {
    Table,
    Id,
    Details,
    Street,
    City,
    State,
    Pincode,
}

#[derive(DeriveIden)]
enum Sectors {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Workers {
    Table,
    Id,
    Name,
    Phone,
    Gender,
    Sector,
    Rating,
    LocationId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Employers {
    Table,
    Id,
    Name,
    Phone,
    Email,
    Company,
    LocationId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Jobs {
    Table,
    Id,
    EmployerId,
    Title,
    Description,
    Sector,
    Wage,
    RequiredGender,
    Openings,
    StartDate,
    EndDate,
    LocationId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    Id,
    JobId,
    WorkerId,
    Status,
    PickupLocationId,
    CreatedAt,
    UpdatedAt,
}

fn timestamp(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

mod m20250301_000001_create_addresses {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_addresses"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Addresses::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Addresses::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Addresses::Details).string().not_null())
                        .col(ColumnDef::new(Addresses::Street).string().not_null())
                        .col(ColumnDef::new(Addresses::City).string().not_null())
                        .col(ColumnDef::new(Addresses::State).string().not_null())
                        .col(ColumnDef::new(Addresses::Pincode).integer().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_addresses_city")
                        .table(Addresses::Table)
                        .col(Addresses::City)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Addresses::Table).to_owned())
                .await
        }
    }
}

mod m20250301_000002_create_sectors {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_sectors"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sectors::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Sectors::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(Sectors::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Sectors::Description).string().not_null())
                        .col(timestamp(Sectors::CreatedAt))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sectors::Table).to_owned())
                .await
        }
    }
}

/// Workers and employers: the two address-owning account tables
mod m20250301_000003_create_parties {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_parties"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Workers::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Workers::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Workers::Name).string().not_null())
                        .col(
                            ColumnDef::new(Workers::Phone)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Workers::Gender).string().not_null())
                        .col(ColumnDef::new(Workers::Sector).string().not_null())
                        .col(ColumnDef::new(Workers::Rating).double().not_null())
                        .col(ColumnDef::new(Workers::LocationId).uuid().not_null())
                        .col(timestamp(Workers::CreatedAt))
                        .col(timestamp(Workers::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_workers_location")
                                .from(Workers::Table, Workers::LocationId)
                                .to(Addresses::Table, Addresses::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Employers::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Employers::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Employers::Name).string().not_null())
                        .col(ColumnDef::new(Employers::Phone).string().not_null())
                        .col(
                            ColumnDef::new(Employers::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Employers::Company).string().not_null())
                        .col(ColumnDef::new(Employers::LocationId).uuid().not_null())
                        .col(timestamp(Employers::CreatedAt))
                        .col(timestamp(Employers::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_employers_location")
                                .from(Employers::Table, Employers::LocationId)
                                .to(Addresses::Table, Addresses::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_workers_sector")
                        .table(Workers::Table)
                        .col(Workers::Sector)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Employers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Workers::Table).to_owned())
                .await
        }
    }
}

mod m20250301_000004_create_jobs {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000004_create_jobs"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Jobs::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Jobs::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Jobs::EmployerId).uuid().not_null())
                        .col(ColumnDef::new(Jobs::Title).string().not_null())
                        .col(ColumnDef::new(Jobs::Description).text().not_null())
                        .col(ColumnDef::new(Jobs::Sector).string().not_null())
                        .col(ColumnDef::new(Jobs::Wage).big_integer().not_null())
                        .col(ColumnDef::new(Jobs::RequiredGender).string())
                        .col(ColumnDef::new(Jobs::Openings).integer().not_null())
                        .col(ColumnDef::new(Jobs::StartDate).date().not_null())
                        .col(ColumnDef::new(Jobs::EndDate).date().not_null())
                        .col(ColumnDef::new(Jobs::LocationId).uuid().not_null())
                        .col(timestamp(Jobs::CreatedAt))
                        .col(timestamp(Jobs::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_jobs_employer")
                                .from(Jobs::Table, Jobs::EmployerId)
                                .to(Employers::Table, Employers::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_jobs_location")
                                .from(Jobs::Table, Jobs::LocationId)
                                .to(Addresses::Table, Addresses::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_jobs_employer_id")
                        .table(Jobs::Table)
                        .col(Jobs::EmployerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_jobs_start_date")
                        .table(Jobs::Table)
                        .col(Jobs::StartDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Jobs::Table).to_owned())
                .await
        }
    }
}

mod m20250301_000005_create_applications {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000005_create_applications"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Applications::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Applications::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Applications::JobId).uuid().not_null())
                        .col(ColumnDef::new(Applications::WorkerId).uuid().not_null())
                        .col(ColumnDef::new(Applications::Status).string().not_null())
                        .col(
                            ColumnDef::new(Applications::PickupLocationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(timestamp(Applications::CreatedAt))
                        .col(timestamp(Applications::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_applications_job")
                                .from(Applications::Table, Applications::JobId)
                                .to(Jobs::Table, Jobs::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_applications_worker")
                                .from(Applications::Table, Applications::WorkerId)
                                .to(Workers::Table, Workers::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_applications_pickup_location")
                                .from(Applications::Table, Applications::PickupLocationId)
                                .to(Addresses::Table, Addresses::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_applications_job_worker")
                        .table(Applications::Table)
                        .col(Applications::JobId)
                        .col(Applications::WorkerId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Applications::Table).to_owned())
                .await
        }
    }
}
