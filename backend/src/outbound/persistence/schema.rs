//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Member profiles keyed by the identity-derived user id.
    profiles (id) {
        id -> Uuid,
        display_name -> Varchar,
        email -> Varchar,
        photo_url -> Nullable<Text>,
        position -> Nullable<Varchar>,
        experience -> Nullable<Varchar>,
        introduction -> Text,
        onboarded -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project postings.
    ///
    /// `recruitment` holds a JSON array of `{position, headcount}` objects so
    /// the position filter can use JSONB containment.
    projects (id) {
        id -> Uuid,
        owner_id -> Uuid,
        title -> Varchar,
        summary -> Text,
        description -> Text,
        category -> Varchar,
        workflow -> Varchar,
        tech_stack -> Array<Text>,
        recruitment -> Jsonb,
        team_size -> Int4,
        duration -> Varchar,
        contact_url -> Nullable<Text>,
        status -> Varchar,
        like_count -> Int4,
        view_count -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Like association records, one per member and posting.
    likes (user_id, project_id) {
        user_id -> Uuid,
        project_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Application association records, one per member and posting.
    applications (user_id, project_id) {
        user_id -> Uuid,
        project_id -> Uuid,
        position -> Varchar,
        message -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> profiles (owner_id));
diesel::joinable!(likes -> projects (project_id));
diesel::joinable!(applications -> projects (project_id));

diesel::allow_tables_to_appear_in_same_query!(applications, likes, profiles, projects,);
