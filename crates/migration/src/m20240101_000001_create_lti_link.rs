//! Create `lti_link` table.
//!
//! One row per tool placement; `settings` holds the serialized JSON blob and
//! stays NULL until a tool writes settings for the link.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LtiLink::Table)
                    .if_not_exists()
                    .col(big_integer(LtiLink::LinkId).primary_key())
                    .col(string_len(LtiLink::LinkKey, 255).not_null())
                    .col(string_len_null(LtiLink::Title, 2048))
                    .col(text_null(LtiLink::Settings))
                    .col(timestamp_with_time_zone(LtiLink::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(LtiLink::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum LtiLink {
    Table,
    LinkId,
    LinkKey,
    Title,
    Settings,
    CreatedAt,
}
