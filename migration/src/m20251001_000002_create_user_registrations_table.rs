use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "
                CREATE TABLE user_registrations(
                    id uuid NOT NULL,
                    PRIMARY KEY (id),
                    first_name TEXT,
                    last_name TEXT,
                    email TEXT NOT NULL UNIQUE,
                    phone TEXT,
                    organization TEXT,
                    role TEXT,
                    preferred_theme TEXT,
                    experience_level TEXT,
                    technical_skills TEXT,
                    motivation TEXT,
                    linkedin_post_link TEXT,
                    linkedin_post_screenshot_url TEXT,
                    payment_screenshot_url TEXT,
                    created_at timestamptz NOT NULL,
                    updated_at timestamptz NOT NULL
                )
            ",
        )
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE user_registrations")
            .await?;
        Ok(())
    }
}
