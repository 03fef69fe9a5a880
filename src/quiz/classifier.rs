use super::domain::{Axis, Role, TypeCode};
use super::tally::Tally;
use serde::Serialize;

/// Inclusive score at which an axis flips to its high letter.
pub const AXIS_THRESHOLD: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub type_code: TypeCode,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleScore {
    pub role: Role,
    pub score: i64,
}

pub fn classify(tally: &Tally) -> Classification {
    Classification {
        type_code: type_code(tally),
        role: best_role(tally),
    }
}

pub fn axis_letter(tally: &Tally, axis: Axis) -> char {
    if tally.axis_score(axis) >= AXIS_THRESHOLD {
        axis.high_letter()
    } else {
        axis.low_letter()
    }
}

pub fn type_code(tally: &Tally) -> TypeCode {
    TypeCode::from_letters(Axis::ordered().map(|axis| axis_letter(tally, axis)))
}

/// Highest scoring role. Ties go to the role that comes first in
/// [`Role::ordered`].
pub fn best_role(tally: &Tally) -> Role {
    role_ranking(tally)
        .first()
        .map(|entry| entry.role)
        .unwrap_or(Role::Duelist)
}

/// Roles sorted by descending score, canonical order on ties.
pub fn role_ranking(tally: &Tally) -> Vec<RoleScore> {
    let mut ranking: Vec<RoleScore> = Role::ordered()
        .into_iter()
        .map(|role| RoleScore {
            role,
            score: tally.role_score(role),
        })
        .collect();
    // sort_by is stable, so canonical order survives among equal scores
    ranking.sort_by(|left, right| right.score.cmp(&left.score));
    ranking
}
