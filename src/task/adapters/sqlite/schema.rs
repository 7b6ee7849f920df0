//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Dispatch task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> BigInt,
        /// Unique operator-facing task number.
        task_number -> Text,
        /// Task lifecycle status.
        status -> Text,
        /// Optional operator comment.
        comment -> Nullable<Text>,
        /// Number of assemblies covered by the task.
        assembly_count -> Integer,
        /// Creator identity.
        created_by -> Text,
        /// Creation timestamp (UTC).
        created_at -> Timestamp,
        /// Last update timestamp (UTC).
        updated_at -> Timestamp,
    }
}
