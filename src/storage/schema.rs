//! Diesel schema for registry persistence.

diesel::table! {
    /// Division records.
    divisions (id) {
        /// Internal division identifier.
        id -> Uuid,
        /// Unique caller-assigned division code.
        #[max_length = 20]
        code -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Foreman unit records.
    foreman_units (id) {
        /// Internal foreman unit identifier.
        id -> Uuid,
        /// Unique generated code (`K<division>-<sequence>`).
        #[max_length = 48]
        code -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Assigned foreman; `NULL` when vacant.
        #[max_length = 255]
        foreman_name -> Nullable<Varchar>,
        /// Owning division.
        division_id -> Uuid,
        /// Optional description.
        description -> Nullable<Text>,
        /// Soft-retirement flag.
        is_active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records referencing a foreman unit.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Foreman unit the task belongs to.
        foreman_unit_id -> Uuid,
        /// Short task title.
        #[max_length = 255]
        title -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(foreman_units -> divisions (division_id));
diesel::joinable!(tasks -> foreman_units (foreman_unit_id));

diesel::allow_tables_to_appear_in_same_query!(divisions, foreman_units, tasks);
