use quest_core::model::{Grade, Quest, QuestKey};
use services::QuestStatus;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestRowVm {
    pub quest_id: u32,
    pub description: String,
    pub href: String,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestListVm {
    pub grade: u32,
    pub rows: Vec<QuestRowVm>,
    pub completed: usize,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestDetailVm {
    pub grade: u32,
    pub quest_id: u32,
    pub question: String,
    pub description: String,
    pub action: String,
    pub back_href: String,
}

#[must_use]
pub fn map_quest_list(grade: Grade, board: &[QuestStatus]) -> QuestListVm {
    QuestListVm {
        grade: grade.value(),
        rows: board
            .iter()
            .map(|row| QuestRowVm {
                quest_id: row.key.quest.value(),
                description: row.description.clone(),
                href: format!("/quest/{}/{}", row.key.grade, row.key.quest),
                completed: row.completed,
            })
            .collect(),
        completed: board.iter().filter(|row| row.completed).count(),
        total: board.len(),
    }
}

#[must_use]
pub fn map_quest_detail(key: QuestKey, quest: &Quest) -> QuestDetailVm {
    QuestDetailVm {
        grade: key.grade.value(),
        quest_id: key.quest.value(),
        question: quest.question().to_owned(),
        description: quest.description().to_owned(),
        action: format!("/quest/{}/{}", key.grade, key.quest),
        back_href: format!("/quests/{}", key.grade),
    }
}
