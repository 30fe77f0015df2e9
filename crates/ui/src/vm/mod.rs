mod chrome_vm;
mod dashboard_vm;
mod form_vm;
mod quest_vm;
mod time_fmt;

pub use chrome_vm::{FlashVm, PageChrome};
pub use dashboard_vm::{DashboardVm, GradeCardVm, map_dashboard};
pub use form_vm::FormVm;
pub use quest_vm::{QuestDetailVm, QuestListVm, QuestRowVm, map_quest_detail, map_quest_list};
