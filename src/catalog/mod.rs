//! Task catalog.
//!
//! The catalog is the fixed, ordered set of business tasks a user can run.
//! Each [`TaskDefinition`] declares its form fields and a prompt builder that
//! turns collected [`FieldValues`] into the initial model prompt.

mod category;
mod fields;
mod tasks;
mod values;

pub use category::Category;
pub use fields::{
    Condition, DEFAULT_ACCEPT, FieldDefinition, FieldKind, OTHER_SENTINELS, Requirement,
    extension_accepted,
};
pub use values::{FieldValue, FieldValues, UNSPECIFIED};

use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Builds the initial prompt for a task from its collected values.
pub type PromptBuilder = fn(&FieldValues) -> String;

/// A single task template.
#[derive(Debug, Clone, Copy)]
pub struct TaskDefinition {
    /// Stable identifier.
    pub key: &'static str,
    /// Name shown to the user.
    pub display_name: &'static str,
    /// Ordered form fields.
    pub fields: &'static [FieldDefinition],
    /// Prompt builder.
    pub prompt: PromptBuilder,
}

impl TaskDefinition {
    /// Renders the initial prompt for `values`.
    ///
    /// Never fails: values absent from `values` render as empty text or the
    /// [`UNSPECIFIED`] marker.
    #[must_use]
    pub fn build_prompt(&self, values: &FieldValues) -> String {
        (self.prompt)(values)
    }

    /// Looks up a field by id.
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&'static FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Returns the picker category for this task.
    #[must_use]
    pub fn category(&self) -> Category {
        Category::for_task(self.key)
    }
}

/// A scored search hit.
#[derive(Debug, Clone, Copy)]
pub struct TaskMatch {
    /// The matched task.
    pub task: &'static TaskDefinition,
    /// Fuzzy score (higher is better). Zero for an empty query.
    pub score: u32,
}

/// The ordered set of available tasks.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    tasks: &'static [TaskDefinition],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Returns the built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            tasks: tasks::BUILTIN_TASKS,
        }
    }

    /// Creates a catalog over an arbitrary task list.
    #[must_use]
    pub const fn from_tasks(tasks: &'static [TaskDefinition]) -> Self {
        Self { tasks }
    }

    /// Looks up a task by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'static TaskDefinition> {
        self.tasks.iter().find(|t| t.key == key)
    }

    /// Iterates tasks in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &'static TaskDefinition> {
        self.tasks.iter()
    }

    /// Returns every task key in catalog order.
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        self.tasks.iter().map(|t| t.key).collect()
    }

    /// Returns the first task, if any.
    #[must_use]
    pub fn first(&self) -> Option<&'static TaskDefinition> {
        self.tasks.first()
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the catalog holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Groups tasks by category, in category display order.
    ///
    /// Empty categories are omitted. Within a group tasks keep catalog order.
    #[must_use]
    pub fn grouped(&self) -> Vec<(Category, Vec<&'static TaskDefinition>)> {
        Category::all()
            .iter()
            .filter_map(|category| {
                let members: Vec<_> = self.iter().filter(|t| t.category() == *category).collect();
                (!members.is_empty()).then_some((*category, members))
            })
            .collect()
    }

    /// Fuzzy-searches tasks by display name and key.
    ///
    /// An empty query returns every task in catalog order. Otherwise hits are
    /// sorted by score (best first) with catalog order breaking ties.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<TaskMatch> {
        let query = query.trim();
        if query.is_empty() {
            return self.iter().map(|task| TaskMatch { task, score: 0 }).collect();
        }

        let mut matcher = Matcher::new(Config::DEFAULT);
        let atom = Atom::new(
            query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
            false,
        );

        let mut hits: Vec<(usize, TaskMatch)> = Vec::new();
        for (position, task) in self.iter().enumerate() {
            let haystack_str = format!("{} {}", task.display_name, task.key);
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(&haystack_str, &mut buf);
            if let Some(score) = atom.score(haystack, &mut matcher) {
                hits.push((
                    position,
                    TaskMatch {
                        task,
                        score: u32::from(score),
                    },
                ));
            }
        }

        hits.sort_by(|a, b| b.1.score.cmp(&a.1.score).then_with(|| a.0.cmp(&b.0)));
        hits.into_iter().map(|(_, hit)| hit).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SAMPLE: &str = "サンプル入力";

    /// Fills every required field and the first member of each one-of group.
    fn minimal_values(task: &TaskDefinition) -> FieldValues {
        let mut values = FieldValues::new();
        let mut groups = HashSet::new();
        for field in task.fields {
            let needed = match field.requirement {
                Requirement::Required => true,
                Requirement::OneOf(group) => groups.insert(group),
                Requirement::Optional | Requirement::When(_) => false,
            };
            if !needed {
                continue;
            }
            match field.kind {
                FieldKind::Choice => values.insert_text(field.id, field.choices[0]),
                FieldKind::Number => values.insert_text(field.id, "3"),
                FieldKind::File => values.insert_file(field.id, "sample.txt", SAMPLE),
                FieldKind::Text | FieldKind::Multiline => values.insert_text(field.id, SAMPLE),
            }
        }
        values
    }

    #[test]
    fn builtin_catalog_has_all_tasks() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 36);
        assert_eq!(catalog.first().map(|t| t.key), Some("proofread"));
        assert_eq!(catalog.keys().last(), Some(&"accounting_closing_checklist"));
    }

    #[test]
    fn keys_and_field_ids_are_unique() {
        let catalog = Catalog::builtin();
        let keys: HashSet<_> = catalog.keys().into_iter().collect();
        assert_eq!(keys.len(), catalog.len());

        for task in catalog.iter() {
            let ids: HashSet<_> = task.fields.iter().map(|f| f.id).collect();
            assert_eq!(ids.len(), task.fields.len(), "duplicate field in {}", task.key);
        }
    }

    #[test]
    fn choice_fields_have_choices() {
        for task in Catalog::builtin().iter() {
            for field in task.fields {
                if field.kind == FieldKind::Choice {
                    assert!(!field.choices.is_empty(), "{}.{}", task.key, field.id);
                }
            }
        }
    }

    #[test]
    fn conditional_fields_reference_an_other_choice() {
        for task in Catalog::builtin().iter() {
            for field in task.fields {
                let Requirement::When(condition) = field.requirement else {
                    continue;
                };
                let controller = task
                    .field(condition.field)
                    .unwrap_or_else(|| panic!("{}.{} has no controller", task.key, field.id));
                assert_eq!(controller.kind, FieldKind::Choice);
                assert!(
                    controller
                        .choices
                        .iter()
                        .any(|c| condition.any_of.contains(c)),
                    "{}.{} can never become visible",
                    task.key,
                    field.id
                );
            }
        }
    }

    #[test]
    fn one_of_groups_have_at_least_two_members() {
        for task in Catalog::builtin().iter() {
            for field in task.fields {
                if let Requirement::OneOf(group) = field.requirement {
                    let members = task
                        .fields
                        .iter()
                        .filter(|f| f.requirement == Requirement::OneOf(group))
                        .count();
                    assert!(members >= 2, "{} group {group}", task.key);
                }
            }
        }
    }

    #[test]
    fn every_prompt_renders_with_minimal_values() {
        for task in Catalog::builtin().iter() {
            let prompt = task.build_prompt(&minimal_values(task));
            assert!(!prompt.trim().is_empty(), "{}", task.key);
            assert!(prompt.contains(SAMPLE), "{} dropped its input", task.key);
            assert!(!prompt.contains("undefined"), "{}", task.key);
            assert!(!prompt.contains("{{"), "{}", task.key);
        }
    }

    #[test]
    fn every_prompt_renders_with_no_values() {
        let empty = FieldValues::new();
        for task in Catalog::builtin().iter() {
            assert!(!task.build_prompt(&empty).trim().is_empty(), "{}", task.key);
        }
    }

    #[test]
    fn proofread_resolves_custom_recipient() {
        let task = Catalog::builtin().get("proofread").unwrap();
        let values: FieldValues = [
            ("original_text", "本文です"),
            ("recipient_type_select", "その他"),
            ("recipient_type_custom", "株主"),
            ("tone", "カジュアル"),
        ]
        .into_iter()
        .collect();

        let prompt = task.build_prompt(&values);
        assert!(prompt.contains("送信先が「株主」"));
        assert!(prompt.contains("トーンが「カジュアル」"));
        assert!(prompt.contains("本文です"));
    }

    #[test]
    fn email_suggests_subject_and_defaults_tone() {
        let task = Catalog::builtin().get("email").unwrap();
        let values: FieldValues = [("recipient_type_select", "社内"), ("points", "・報告")]
            .into_iter()
            .collect();

        let prompt = task.build_prompt(&values);
        assert!(prompt.contains("内容に最も適した件名を生成してください。"));
        assert!(prompt.contains("- トーン: 丁寧"));
    }

    #[test]
    fn summarize_prefers_file_content() {
        let task = Catalog::builtin().get("summarize").unwrap();
        let mut values: FieldValues = [("text", "貼り付けた文章"), ("format_select", "箇条書きで")]
            .into_iter()
            .collect();
        values.insert_file("file_upload", "memo.txt", "ファイルの中身");

        let prompt = task.build_prompt(&values);
        assert!(prompt.contains("ファイルの中身"));
        assert!(!prompt.contains("貼り付けた文章"));
    }

    #[test]
    fn translate_omits_auto_detected_source() {
        let task = Catalog::builtin().get("translate").unwrap();
        let mut values: FieldValues = [("target_lang", "英語"), ("text", "こんにちは")]
            .into_iter()
            .collect();
        assert!(task.build_prompt(&values).starts_with("以下の文章を「英語」に"));

        values.insert_text("source_lang", "自動検出");
        assert!(task.build_prompt(&values).starts_with("以下の文章を「英語」に"));

        values.insert_text("source_lang", "日本語");
        assert!(
            task.build_prompt(&values)
                .starts_with("以下の文章を「日本語」から「英語」に")
        );
    }

    #[test]
    fn escalation_summary_switches_template() {
        let task = Catalog::builtin().get("escalation_summary").unwrap();
        let mut values: FieldValues = [("communication_history", "経緯")].into_iter().collect();

        values.insert_text("report_type", "運用不備");
        assert!(task.build_prompt(&values).contains("■発覚日"));

        values.insert_text("report_type", "クライアント報告");
        assert!(task.build_prompt(&values).contains("お世話になっております。"));
    }

    #[test]
    fn code_gen_fences_with_language_tag() {
        let task = Catalog::builtin().get("code_gen").unwrap();
        let mut values: FieldValues = [("language", "HTML/CSS"), ("request", "ボタン")]
            .into_iter()
            .collect();
        let prompt = task.build_prompt(&values);
        assert!(prompt.contains("```html\n"));
        assert!(prompt.contains("言語はHTML/CSSでお願いします。"));
        assert!(!prompt.contains("参考にするサンプルコード"));

        values.insert_text("language", "複数言語（自動検出）");
        values.insert_file("file_upload", "a.py", "print(1)");
        let prompt = task.build_prompt(&values);
        assert!(prompt.contains("# 出力\n```\n"));
        assert!(prompt.contains("print(1)"));
    }

    #[test]
    fn sns_post_defaults_hashtag_count() {
        let task = Catalog::builtin().get("sns_post").unwrap();
        let values: FieldValues = [("platform", "Facebook"), ("topic", "新商品")]
            .into_iter()
            .collect();
        assert!(task.build_prompt(&values).contains("ハッシュタグを5個"));
    }

    #[test]
    fn grouped_covers_every_task_once() {
        let catalog = Catalog::builtin();
        let groups = catalog.grouped();
        let total: usize = groups.iter().map(|(_, tasks)| tasks.len()).sum();
        assert_eq!(total, catalog.len());
        assert_eq!(groups[0].0, Category::Common);
        assert_eq!(groups[0].1[0].key, "proofread");
    }

    #[test]
    fn empty_search_returns_catalog_order() {
        let catalog = Catalog::builtin();
        let hits = catalog.search("  ");
        assert_eq!(hits.len(), catalog.len());
        assert_eq!(hits[0].task.key, "proofread");
    }

    #[test]
    fn search_matches_key_and_display_name() {
        let catalog = Catalog::builtin();

        let hits = catalog.search("sql");
        assert_eq!(hits.first().map(|h| h.task.key), Some("sql_gen"));

        let hits = catalog.search("翻訳");
        assert!(hits.iter().any(|h| h.task.key == "translate"));

        assert!(catalog.search("zzzzqqqq").is_empty());
    }

    #[test]
    fn from_tasks_builds_custom_catalog() {
        fn echo(values: &FieldValues) -> String {
            values.text("body").to_string()
        }
        static ONE: &[TaskDefinition] = &[TaskDefinition {
            key: "echo",
            display_name: "Echo",
            fields: &[FieldDefinition::text("body", "Body").required()],
            prompt: echo,
        }];
        let catalog = Catalog::from_tasks(ONE);
        assert_eq!(catalog.len(), 1);
        let values: FieldValues = [("body", "hi")].into_iter().collect();
        assert_eq!(catalog.get("echo").unwrap().build_prompt(&values), "hi");
        assert!(catalog.get("proofread").is_none());
    }
}
