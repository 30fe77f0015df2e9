use quest_core::model::User;
use services::GradeProgress;

use crate::vm::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradeCardVm {
    pub grade: u32,
    pub href: String,
    pub completed: usize,
    pub total: usize,
    pub is_current: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub username: String,
    pub member_since: String,
    pub current_grade: Option<u32>,
    pub completed_total: usize,
    pub grades: Vec<GradeCardVm>,
}

#[must_use]
pub fn map_dashboard(user: &User, overview: &[GradeProgress]) -> DashboardVm {
    let current = user.grade();
    DashboardVm {
        username: user.username().to_owned(),
        member_since: format_date(user.created_at()),
        current_grade: current.map(|g| g.value()),
        completed_total: user.completed().len(),
        grades: overview
            .iter()
            .map(|row| GradeCardVm {
                grade: row.grade.value(),
                href: format!("/quests/{}", row.grade),
                completed: row.completed,
                total: row.total,
                is_current: current == Some(row.grade),
            })
            .collect(),
    }
}
