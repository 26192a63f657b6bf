//! Add indexes for `lti_link` lookups by launch key.
use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_lti_link::LtiLink;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_lti_link_key")
                    .table(LtiLink::Table)
                    .col(LtiLink::LinkKey)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_lti_link_key").table(LtiLink::Table).to_owned())
            .await
    }
}
