//! Diesel schema for task synchronization persistence.

diesel::table! {
    /// Project tasks.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Authoring user.
        user_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional markdown body.
        markdown -> Nullable<Text>,
        /// Task status (`open` or `closed`).
        #[max_length = 16]
        status -> Varchar,
        /// Archive flag.
        archived -> Bool,
        /// Linked GitHub repository.
        github_repo_id -> Nullable<Uuid>,
        /// Linked GitHub issue mirror.
        github_issue_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// GitHub repositories connected to projects.
    github_repos (id) {
        /// Internal repository identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Global GitHub repository id.
        github_id -> Int8,
        /// `owner/repo` name.
        #[max_length = 255]
        full_name -> Varchar,
        /// GitHub App installation token.
        installation_token -> Nullable<Text>,
    }
}

diesel::table! {
    /// Local mirrors of GitHub issues.
    github_issues (id) {
        /// Internal issue identifier.
        id -> Uuid,
        /// Repository the issue belongs to.
        github_repo_id -> Uuid,
        /// Global GitHub issue id.
        github_id -> Int8,
        /// Repository-scoped issue number.
        number -> Int8,
        /// Issue title.
        title -> Text,
        /// Issue body.
        body -> Nullable<Text>,
        /// Issue state (`open` or `closed`).
        #[max_length = 16]
        state -> Varchar,
        /// Browser URL.
        html_url -> Text,
        /// Conversation lock flag.
        locked -> Bool,
        /// Remote creation timestamp.
        github_created_at -> Timestamptz,
        /// Remote update timestamp.
        github_updated_at -> Timestamptz,
        /// Local insertion timestamp.
        inserted_at -> Timestamptz,
        /// Local update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Users able to author tasks.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// Login name.
        #[max_length = 255]
        username -> Varchar,
        /// GitHub OAuth token.
        github_token -> Nullable<Text>,
    }
}
