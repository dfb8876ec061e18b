use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Lastname).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Phone).string())
                    .col(ColumnDef::new(Users::Cedula).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default("technician"),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create workers table
        manager
            .create_table(
                Table::create()
                    .table(Workers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Workers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Workers::Ficha).string().not_null().unique_key())
                    .col(ColumnDef::new(Workers::Name).string().not_null())
                    .col(ColumnDef::new(Workers::Lastname).string().not_null())
                    .col(ColumnDef::new(Workers::Department).string())
                    .col(ColumnDef::new(Workers::Division).string())
                    .col(ColumnDef::new(Workers::BirthDay).integer())
                    .col(ColumnDef::new(Workers::BirthMonth).integer())
                    .col(
                        ColumnDef::new(Workers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create machines table (nro_maquina is not unique)
        manager
            .create_table(
                Table::create()
                    .table(Machines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Machines::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Machines::NroMaquina).string().not_null())
                    .col(ColumnDef::new(Machines::IdUser).integer())
                    .col(ColumnDef::new(Machines::IdWorkers).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_machine_user")
                            .from(Machines::Table, Machines::IdUser)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_machine_worker")
                            .from(Machines::Table, Machines::IdWorkers)
                            .to(Workers::Table, Workers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_machines_nro_maquina")
                    .table(Machines::Table)
                    .col(Machines::NroMaquina)
                    .to_owned(),
            )
            .await?;

        // Create reports table
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reports::IdMachine).integer())
                    .col(ColumnDef::new(Reports::IdUser).integer())
                    .col(ColumnDef::new(Reports::IdWorkers).integer())
                    .col(ColumnDef::new(Reports::Title).string().not_null())
                    .col(ColumnDef::new(Reports::Area).string())
                    .col(ColumnDef::new(Reports::Estado).string().not_null())
                    .col(ColumnDef::new(Reports::Description).text())
                    .col(ColumnDef::new(Reports::NaturalUser).string())
                    .col(ColumnDef::new(Reports::NaturalPassword).string())
                    .col(ColumnDef::new(Reports::WindowsUser).string())
                    .col(ColumnDef::new(Reports::WindowsPassword).string())
                    .col(ColumnDef::new(Reports::Date).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_machine")
                            .from(Reports::Table, Reports::IdMachine)
                            .to(Machines::Table, Machines::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_user")
                            .from(Reports::Table, Reports::IdUser)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_worker")
                            .from(Reports::Table, Reports::IdWorkers)
                            .to(Workers::Table, Workers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create report_cases table. No cascade from reports: deletion is
        // done by the application inside a transaction.
        manager
            .create_table(
                Table::create()
                    .table(ReportCases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReportCases::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReportCases::IdReport).integer().not_null())
                    .col(ColumnDef::new(ReportCases::IdUser).integer().not_null())
                    .col(ColumnDef::new(ReportCases::Diagnosis).text())
                    .col(ColumnDef::new(ReportCases::Resolution).text())
                    .col(ColumnDef::new(ReportCases::Hour).time().not_null())
                    .col(
                        ColumnDef::new(ReportCases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_case_report")
                            .from(ReportCases::Table, ReportCases::IdReport)
                            .to(Reports::Table, Reports::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_case_user")
                            .from(ReportCases::Table, ReportCases::IdUser)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create specializations table
        manager
            .create_table(
                Table::create()
                    .table(Specializations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Specializations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Specializations::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create user_specializations join table
        manager
            .create_table(
                Table::create()
                    .table(UserSpecializations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserSpecializations::IdUser)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserSpecializations::IdSpecialization)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserSpecializations::IdUser)
                            .col(UserSpecializations::IdSpecialization),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_spec_user")
                            .from(UserSpecializations::Table, UserSpecializations::IdUser)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_spec_specialization")
                            .from(
                                UserSpecializations::Table,
                                UserSpecializations::IdSpecialization,
                            )
                            .to(Specializations::Table, Specializations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSpecializations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Specializations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ReportCases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Machines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Workers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Lastname,
    Email,
    Phone,
    Cedula,
    Role,
    Password,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Workers {
    Table,
    Id,
    Ficha,
    Name,
    Lastname,
    Department,
    Division,
    BirthDay,
    BirthMonth,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Machines {
    Table,
    Id,
    NroMaquina,
    IdUser,
    IdWorkers,
}

#[derive(DeriveIden)]
enum Reports {
    Table,
    Id,
    IdMachine,
    IdUser,
    IdWorkers,
    Title,
    Area,
    Estado,
    Description,
    NaturalUser,
    NaturalPassword,
    WindowsUser,
    WindowsPassword,
    Date,
}

#[derive(DeriveIden)]
enum ReportCases {
    Table,
    Id,
    IdReport,
    IdUser,
    Diagnosis,
    Resolution,
    Hour,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Specializations {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum UserSpecializations {
    Table,
    IdUser,
    IdSpecialization,
}
