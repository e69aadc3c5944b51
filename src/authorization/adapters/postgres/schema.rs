//! Diesel schema for project memberships.

diesel::table! {
    /// Users' roles within projects.
    project_users (project_id, user_id) {
        /// Project identifier.
        project_id -> Uuid,
        /// Member identifier.
        user_id -> Uuid,
        /// Member role.
        #[max_length = 32]
        role -> Varchar,
    }
}
