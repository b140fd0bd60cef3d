//! SeaORM entities for database tables
//!
//! Parent tables hold a foreign key into `addresses`; addresses carry no
//! back-reference to their owner.

/// Normalized postal addresses
pub mod address {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "addresses")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub details: String,
        pub street: String,
        pub city: String,
        pub state: String,
        pub pincode: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Workers table entity
pub mod worker {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "workers")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        #[sea_orm(unique)]
        pub phone: String,
        pub gender: String,
        pub sector: String,
        pub rating: f64,
        /// Home address
        pub location_id: Uuid,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::address::Entity",
            from = "Column::LocationId",
            to = "super::address::Column::Id"
        )]
        Location,
    }

    impl Related<super::address::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Location.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Employers table entity
pub mod employer {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "employers")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub phone: String,
        #[sea_orm(unique)]
        pub email: String,
        pub company: String,
        /// Office address
        pub location_id: Uuid,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::address::Entity",
            from = "Column::LocationId",
            to = "super::address::Column::Id"
        )]
        Location,
        #[sea_orm(has_many = "super::job::Entity")]
        Jobs,
    }

    impl Related<super::address::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Location.def()
        }
    }

    impl Related<super::job::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Jobs.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Jobs table entity
pub mod job {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "jobs")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub employer_id: Uuid,
        pub title: String,
        pub description: String,
        pub sector: String,
        pub wage: i64,
        /// Lowercase gender code, NULL when unrestricted
        pub required_gender: Option<String>,
        pub openings: i32,
        pub start_date: Date,
        pub end_date: Date,
        /// Work site address
        pub location_id: Uuid,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::address::Entity",
            from = "Column::LocationId",
            to = "super::address::Column::Id"
        )]
        Location,
        #[sea_orm(
            belongs_to = "super::employer::Entity",
            from = "Column::EmployerId",
            to = "super::employer::Column::Id"
        )]
        Employer,
    }

    impl Related<super::address::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Location.def()
        }
    }

    impl Related<super::employer::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Employer.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Applications table entity
pub mod application {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "applications")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub job_id: Uuid,
        pub worker_id: Uuid,
        pub status: String,
        /// Pickup point address
        pub pickup_location_id: Uuid,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::address::Entity",
            from = "Column::PickupLocationId",
            to = "super::address::Column::Id"
        )]
        PickupLocation,
        #[sea_orm(
            belongs_to = "super::job::Entity",
            from = "Column::JobId",
            to = "super::job::Column::Id"
        )]
        Job,
        #[sea_orm(
            belongs_to = "super::worker::Entity",
            from = "Column::WorkerId",
            to = "super::worker::Column::Id"
        )]
        Worker,
    }

    impl Related<super::address::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::PickupLocation.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Sector reference table
pub mod sector {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "sectors")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub name: String,
        pub description: String,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
