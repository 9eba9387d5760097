//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Display name.
        name -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// Hex SHA-256 digest of the active bearer token, if logged in.
        token_digest -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Contacts, each owned by one user.
    contacts (id) {
        /// Serial primary key.
        id -> Int8,
        /// Owning user.
        user_id -> Uuid,
        first_name -> Varchar,
        last_name -> Nullable<Varchar>,
        email -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Postal addresses, each attached to one contact.
    addresses (id) {
        /// Serial primary key.
        id -> Int8,
        /// Parent contact.
        contact_id -> Int8,
        street -> Nullable<Varchar>,
        city -> Nullable<Varchar>,
        province -> Nullable<Varchar>,
        country -> Varchar,
        postal_code -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(contacts -> users (user_id));
diesel::joinable!(addresses -> contacts (contact_id));

diesel::allow_tables_to_appear_in_same_query!(users, contacts, addresses);
