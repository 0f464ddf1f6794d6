use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== ORGANIZATIONS ==========
        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Organizations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Organizations::Name)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Organizations::Address)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Organizations::Phone)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Organizations::Email)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== PERSONS ==========
        manager
            .create_table(
                Table::create()
                    .table(Persons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Persons::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Persons::Username)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Persons::Email)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Persons::OrganizationId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_persons_organization")
                            .from(Persons::Table, Persons::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_persons_organization_id")
                    .table(Persons::Table)
                    .col(Persons::OrganizationId)
                    .to_owned(),
            )
            .await?;

        // ========== STATIONS ==========
        // Coordinates and description are deliberately not unique: stations may share them.
        manager
            .create_table(
                Table::create()
                    .table(Stations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Stations::Name)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Stations::Lattitude).string_len(80).not_null())
                    .col(ColumnDef::new(Stations::Longitude).string_len(80).not_null())
                    .col(ColumnDef::new(Stations::Streetaddress).string_len(80).not_null())
                    .col(
                        ColumnDef::new(Stations::Numberaddress)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Stations::PersonId).integer().not_null())
                    .col(ColumnDef::new(Stations::Description).string_len(250))
                    .col(ColumnDef::new(Stations::OrganizationId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stations_person")
                            .from(Stations::Table, Stations::PersonId)
                            .to(Persons::Table, Persons::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stations_organization")
                            .from(Stations::Table, Stations::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stations_organization_id")
                    .table(Stations::Table)
                    .col(Stations::OrganizationId)
                    .to_owned(),
            )
            .await?;

        // ========== MEASURES ==========
        manager
            .create_table(
                Table::create()
                    .table(Measures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Measures::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Measures::Name).string_len(80).not_null())
                    .col(ColumnDef::new(Measures::Unit).string_len(80).not_null())
                    .col(ColumnDef::new(Measures::Symbol).string_len(80).not_null())
                    .to_owned(),
            )
            .await?;

        // ========== ASSIGNED MEASURES ==========
        // No (station_id, measure_id) uniqueness: a pair may be assigned more than once.
        manager
            .create_table(
                Table::create()
                    .table(AssignedMeasures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignedMeasures::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AssignedMeasures::MeasureId).integer().not_null())
                    .col(ColumnDef::new(AssignedMeasures::StationId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assigned_measures_measure")
                            .from(AssignedMeasures::Table, AssignedMeasures::MeasureId)
                            .to(Measures::Table, Measures::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assigned_measures_station")
                            .from(AssignedMeasures::Table, AssignedMeasures::StationId)
                            .to(Stations::Table, Stations::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assigned_measures_station_measure")
                    .table(AssignedMeasures::Table)
                    .col(AssignedMeasures::StationId)
                    .col(AssignedMeasures::MeasureId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assigned_measures_measure_id")
                    .table(AssignedMeasures::Table)
                    .col(AssignedMeasures::MeasureId)
                    .to_owned(),
            )
            .await?;

        // ========== DATA ==========
        manager
            .create_table(
                Table::create()
                    .table(Data::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Data::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Data::DataValue).double().not_null())
                    .col(ColumnDef::new(Data::DataTimeMeasure).timestamp().not_null())
                    .col(ColumnDef::new(Data::AssignedmeasureId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_data_assigned_measure")
                            .from(Data::Table, Data::AssignedmeasureId)
                            .to(AssignedMeasures::Table, AssignedMeasures::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Range and latest-value lookups scan one assignment ordered by time
        manager
            .create_index(
                Index::create()
                    .name("idx_data_assignment_time")
                    .table(Data::Table)
                    .col(Data::AssignedmeasureId)
                    .col(Data::DataTimeMeasure)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Data::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(AssignedMeasures::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Measures::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stations::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Persons::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(Organizations::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Organizations {
    Table,
    Id,
    Name,
    Address,
    Phone,
    Email,
}

#[derive(DeriveIden)]
pub enum Persons {
    Table,
    Id,
    Username,
    Email,
    OrganizationId,
}

#[derive(DeriveIden)]
pub enum Stations {
    Table,
    Id,
    Name,
    Lattitude,
    Longitude,
    Streetaddress,
    Numberaddress,
    PersonId,
    Description,
    OrganizationId,
}

#[derive(DeriveIden)]
pub enum Measures {
    Table,
    Id,
    Name,
    Unit,
    Symbol,
}

#[derive(DeriveIden)]
pub enum AssignedMeasures {
    Table,
    Id,
    MeasureId,
    StationId,
}

#[derive(DeriveIden)]
pub enum Data {
    Table,
    Id,
    DataValue,
    DataTimeMeasure,
    AssignedmeasureId,
}
