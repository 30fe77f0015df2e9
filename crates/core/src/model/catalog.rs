use std::collections::BTreeMap;

use thiserror::Error;

use super::quest::{Grade, Quest, QuestId, QuestKey};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("duplicate quest key {0}")]
    DuplicateKey(QuestKey),

    #[error("quest {0} has an empty answer")]
    EmptyAnswer(QuestKey),
}

/// Immutable table of quests, built once at startup and shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestCatalog {
    quests: BTreeMap<QuestKey, Quest>,
}

impl QuestCatalog {
    /// Builds a catalog from explicit entries.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on a repeated key or an empty expected answer.
    pub fn new(
        entries: impl IntoIterator<Item = (QuestKey, Quest)>,
    ) -> Result<Self, CatalogError> {
        let mut quests = BTreeMap::new();
        for (key, quest) in entries {
            if quest.answer().is_empty() {
                return Err(CatalogError::EmptyAnswer(key));
            }
            if quests.insert(key, quest).is_some() {
                return Err(CatalogError::DuplicateKey(key));
            }
        }
        Ok(Self { quests })
    }

    /// The quests shipped with the application: grades 1–4, five each.
    ///
    /// `4_5` expects `"0"` even though its riddle counts six apples; the
    /// content is kept as authored.
    #[must_use]
    pub fn builtin() -> Self {
        let quests = BUILTIN
            .iter()
            .map(|&(grade, quest, question, answer, description)| {
                (
                    QuestKey::from_raw(grade, quest),
                    Quest::new(question, answer, description),
                )
            })
            .collect();
        Self { quests }
    }

    #[must_use]
    pub fn lookup(&self, key: QuestKey) -> Option<&Quest> {
        self.quests.get(&key)
    }

    /// Quests of one grade ordered by quest id.
    pub fn quests_for_grade(&self, grade: Grade) -> impl Iterator<Item = (QuestKey, &Quest)> {
        self.quests
            .range(QuestKey::new(grade, QuestId::new(0))..)
            .take_while(move |(key, _)| key.grade == grade)
            .map(|(key, quest)| (*key, quest))
    }

    /// Distinct grades present in the catalog, ascending.
    #[must_use]
    pub fn grades(&self) -> Vec<Grade> {
        let mut grades: Vec<Grade> = self.quests.keys().map(|key| key.grade).collect();
        grades.dedup();
        grades
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}

type BuiltinQuest = (u32, u32, &'static str, &'static str, &'static str);

const BUILTIN: &[BuiltinQuest] = &[
    (1, 1, "Сколько яблок на картинке? 🍎🍎🍎 (Ответ напиши цифрой)", "3", "Сосчитай фрукты"),
    (1, 2, "Какая фигура похожа на мяч? (напиши: круг, квадрат или треугольник)", "круг", "Найди форму"),
    (1, 3, "Что больше: 5 или 3? (напиши число)", "5", "Сравни числа"),
    (1, 4, "Продолжи ряд: 2, 4, 6, ... (напиши следующее число)", "8", "Продолжи ряд"),
    (1, 5, "Сколько углов у треугольника? (напиши цифру)", "3", "Найди отличия"),
    (2, 1, "Сколько будет 7 + 8? (напиши число)", "15", "Сложение в пределах 20"),
    (2, 2, "Сколько будет 15 - 9? (напиши число)", "6", "Вычитание"),
    (2, 3, "Реши пример: 3 + 4 - 2 = ?", "5", "Примеры в два действия"),
    (2, 4, "У Маши было 5 конфет, а у Пети на 3 больше. Сколько конфет у Пети?", "8", "Задачи на логику"),
    (2, 5, "Сколько сторон у квадрата? (напиши число)", "4", "Геометрические фигуры"),
    (3, 1, "Сколько будет 4 * 3? (напиши число)", "12", "Таблица умножения на 2,3,4"),
    (3, 2, "Сколько будет 6 * 7? (напиши число)", "42", "Таблица умножения на 5,6,7"),
    (3, 3, "Сколько будет 12 * 3? (напиши число)", "36", "Внетабличное умножение"),
    (3, 4, "Раздели 17 на 3 с остатком. Напиши остаток.", "2", "Деление с остатком"),
    (3, 5, "В одной коробке 8 карандашей. Сколько карандашей в 5 коробках?", "40", "Задачи на умножение"),
    (4, 1, "Реши уравнение: x + 5 = 12. Чему равен x?", "7", "Реши уравнение"),
    (4, 2, "Что больше: 1/2 или 1/4? (напиши дробь)", "1/2", "Сравни дроби"),
    (4, 3, "Поезд едет со скоростью 60 км/ч. Сколько км он проедет за 3 часа?", "180", "Задачи на движение"),
    (4, 4, "Вычисли: 10 - 2 * 3 = ?", "4", "Порядок действий"),
    (4, 5, "Загадка: стоит в поле дуб, на дубе 3 ветки, на каждой ветке по 2 яблока. Сколько всего яблок? (напиши число)", "0", "Математический ребус"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_four_grades_of_five() {
        let catalog = QuestCatalog::builtin();
        assert_eq!(catalog.len(), 20);
        assert_eq!(
            catalog.grades(),
            (1..=4).map(Grade::new).collect::<Vec<_>>()
        );
        for grade in catalog.grades() {
            let ids: Vec<u32> = catalog
                .quests_for_grade(grade)
                .map(|(key, _)| key.quest.value())
                .collect();
            assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn builtin_entries_pass_validation() {
        let catalog = QuestCatalog::builtin();
        let rebuilt = QuestCatalog::new(
            catalog
                .quests
                .iter()
                .map(|(key, quest)| (*key, quest.clone())),
        )
        .unwrap();
        assert_eq!(rebuilt, catalog);
    }

    #[test]
    fn lookup_finds_known_and_misses_unknown() {
        let catalog = QuestCatalog::builtin();
        let quest = catalog.lookup(QuestKey::from_raw(2, 3)).unwrap();
        assert_eq!(quest.question(), "Реши пример: 3 + 4 - 2 = ?");
        assert!(quest.accepts("5"));

        assert!(catalog.lookup(QuestKey::from_raw(2, 6)).is_none());
        assert!(catalog.lookup(QuestKey::from_raw(9, 1)).is_none());
    }

    #[test]
    fn riddle_answer_is_kept_as_authored() {
        let catalog = QuestCatalog::builtin();
        let riddle = catalog.lookup(QuestKey::from_raw(4, 5)).unwrap();
        assert!(riddle.accepts("0"));
        assert!(!riddle.accepts("6"));
    }

    #[test]
    fn unknown_grade_lists_nothing() {
        let catalog = QuestCatalog::builtin();
        assert_eq!(catalog.quests_for_grade(Grade::new(7)).count(), 0);
    }

    #[test]
    fn new_rejects_duplicates_and_empty_answers() {
        let key = QuestKey::new(Grade::new(1), QuestId::new(1));
        let err = QuestCatalog::new([
            (key, Quest::new("a", "1", "")),
            (key, Quest::new("b", "2", "")),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateKey(key));

        let err = QuestCatalog::new([(key, Quest::new("a", "", ""))]).unwrap_err();
        assert_eq!(err, CatalogError::EmptyAnswer(key));
    }
}
