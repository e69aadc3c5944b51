//! Identifiers for skills and their task associations.

use crate::task::domain::uuid_identifier;

uuid_identifier!(
    /// Identifier of a task-skill association.
    TaskSkillId
);

uuid_identifier!(
    /// Identifier of a skill.
    SkillId
);
